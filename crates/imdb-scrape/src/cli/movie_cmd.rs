// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! `imdb-scrape movie <ID>`: scrape one title by identifier.

use crate::acquisition::http_client::HttpClient;
use crate::aggregator::scrape_movie;
use crate::cli::output;
use crate::config::Config;
use anyhow::Result;

/// Run the movie command.
pub async fn run(config: &Config, id: &str, fallback_rating: Option<f64>) -> Result<()> {
    let client = HttpClient::try_from_config(config)?;

    if !output::is_quiet() && !output::is_json() {
        eprintln!("Fetching {}...", config.url_for(id));
    }

    let record = scrape_movie(&client, config, id, fallback_rating).await;
    if record.is_unknown() && !output::is_quiet() && !output::is_json() {
        eprintln!("  No fields could be extracted for {id}.");
    }
    output::print_record(&record);
    Ok(())
}
