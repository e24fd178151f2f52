// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! `imdb-scrape batch <FILE>` and `imdb-scrape metascores <FILE>`.

use crate::acquisition::http_client::HttpClient;
use crate::batch::{self, BatchOptions, BatchRow};
use crate::cli::output;
use crate::config::Config;
use crate::progress::{self, ProgressEventKind, ProgressReceiver};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;
use tokio::sync::broadcast::error::RecvError;

/// Scrape every row of `input` and write the records as a JSON array.
pub async fn run(config: &Config, input: &Path, output_path: Option<&Path>) -> Result<()> {
    let rows = load_rows(input)?;
    let client = HttpClient::try_from_config(config)?;
    let options = BatchOptions::with_concurrency(config.concurrency);

    let (tx, rx) = progress::channel();
    let listener = spawn_progress_bar(rx, rows.len());
    let records = batch::scrape_all(&client, &rows, &options, Some(&tx)).await;
    drop(tx);
    let _ = listener.await;

    let json = serde_json::to_string_pretty(&records).context("failed to serialize records")?;
    match output_path {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if !output::is_quiet() && !output::is_json() {
                eprintln!("  Wrote {} records to {}", records.len(), path.display());
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[derive(Serialize)]
struct ScoreLine<'a> {
    url: &'a str,
    meta_score: Option<f64>,
}

/// Print the 0 to 10 metascore of every row, falling back to its rating.
pub async fn run_metascores(config: &Config, input: &Path) -> Result<()> {
    let rows = load_rows(input)?;
    let client = HttpClient::try_from_config(config)?;
    let options = BatchOptions::with_concurrency(config.concurrency);

    if !output::is_quiet() && !output::is_json() {
        eprintln!("Extracting metascores from IMDb. This may take several minutes...");
    }

    let (tx, rx) = progress::channel();
    let listener = spawn_progress_bar(rx, rows.len());
    let scores = batch::metascore_list(&client, &rows, &options, Some(&tx)).await;
    drop(tx);
    let _ = listener.await;

    if output::is_json() {
        let lines: Vec<ScoreLine<'_>> = rows
            .iter()
            .zip(&scores)
            .map(|(row, score)| ScoreLine {
                url: &row.url,
                meta_score: *score,
            })
            .collect();
        output::print_json(&lines);
    } else {
        for (row, score) in rows.iter().zip(&scores) {
            println!("{}\t{}", row.url, output::or_unknown(*score));
        }
    }
    Ok(())
}

fn load_rows(input: &Path) -> Result<Vec<BatchRow>> {
    batch::read_table(input).with_context(|| format!("failed to read {}", input.display()))
}

/// Render progress events on a terminal bar until the batch completes.
fn spawn_progress_bar(mut rx: ProgressReceiver, total: usize) -> tokio::task::JoinHandle<()> {
    let bar = if output::is_quiet() || output::is_json() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total as u64)
    };
    let style = ProgressStyle::with_template("  [{bar:30}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match event.event {
                    ProgressEventKind::ItemProcessed {
                        index,
                        url,
                        meta_score,
                        ..
                    } => {
                        bar.set_position(index as u64 + 1);
                        bar.set_message(format!("{url}  {}", output::or_unknown(meta_score)));
                    }
                    ProgressEventKind::BatchComplete { .. } => break,
                    ProgressEventKind::BatchStarted { .. } => {}
                },
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
        bar.finish_and_clear();
    })
}
