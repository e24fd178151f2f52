// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! `imdb-scrape legacy <URL>`: markup-only extraction of one page.

use crate::acquisition::http_client::HttpClient;
use crate::cli::output;
use crate::config::Config;
use crate::legacy;
use anyhow::{bail, Result};

/// Run the legacy command.
pub async fn run(config: &Config, url: &str) -> Result<()> {
    let client = HttpClient::try_from_config(config)?;

    if !output::is_quiet() && !output::is_json() {
        eprintln!("Fetching movie data from {url}...");
    }

    match legacy::movie_data(&client, url).await {
        Some(data) => {
            output::print_legacy(&data);
            Ok(())
        }
        None => bail!("page unavailable: {url}"),
    }
}
