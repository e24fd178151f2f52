// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Batch driver: scrape every row of an input table.
//!
//! The table is delimited text (comma or tab) with a `URL` column and an
//! optional `IMDb Rating` column, the layout of an IMDb list export. Rows are
//! processed with bounded concurrency and results come back in input order.

use crate::acquisition::http_client::HttpClient;
use crate::aggregator::record_from_body;
use crate::error::InputError;
use crate::extraction::{markup, parse_page};
use crate::progress::{emit, percent, ProgressEventKind, ProgressSender};
use crate::types::MovieRecord;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

pub const URL_COLUMN: &str = "URL";
pub const RATING_COLUMN: &str = "IMDb Rating";

/// One input row: a title URL and the rating to use when no metascore exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    pub url: String,
    pub fallback_rating: Option<f64>,
}

/// Knobs for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum number of rows in flight at once.
    pub concurrency: usize,
    /// Identifies this run in progress events.
    pub request_id: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

impl BatchOptions {
    pub fn with_concurrency(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
            ..Default::default()
        }
    }
}

// ── Input table ─────────────────────────────────────────────────────────────

/// Read and parse an input table from disk.
pub fn read_table(path: &Path) -> Result<Vec<BatchRow>, InputError> {
    let text = std::fs::read_to_string(path)?;
    parse_table(&text)
}

/// Parse an input table. The header row decides the separator: tab if it
/// contains one, comma otherwise. Rows with an empty URL cell are skipped.
pub fn parse_table(text: &str) -> Result<Vec<BatchRow>, InputError> {
    let text = text.trim_start_matches('\u{feff}');
    let header_line = text.lines().next().unwrap_or("");
    let delimiter = if header_line.contains('\t') { b'\t' } else { b',' };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(InputError::Empty);
    }
    let url_idx = column_index(&headers, URL_COLUMN).ok_or(InputError::MissingColumn(URL_COLUMN))?;
    let rating_idx = column_index(&headers, RATING_COLUMN);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let Some(url) = record.get(url_idx).filter(|u| !u.is_empty()) else {
            continue;
        };
        let fallback_rating = rating_idx
            .and_then(|i| record.get(i))
            .and_then(|cell| cell.parse::<f64>().ok())
            .filter(|r| r.is_finite());
        rows.push(BatchRow {
            url: url.to_string(),
            fallback_rating,
        });
    }
    Ok(rows)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

// ── Drivers ─────────────────────────────────────────────────────────────────

/// Scrape every row into a `MovieRecord`, in input order.
///
/// Each row's `fallback_rating` feeds the metascore fallback. Rows whose page
/// cannot be fetched produce an all-unknown record.
pub async fn scrape_all(
    client: &HttpClient,
    rows: &[BatchRow],
    options: &BatchOptions,
    progress: Option<&ProgressSender>,
) -> Vec<MovieRecord> {
    run_ordered(
        rows,
        options,
        progress,
        |row| async move {
            match client.fetch(&row.url).await {
                Some(body) => (true, record_from_body(&body, row.fallback_rating)),
                None => (false, MovieRecord::default()),
            }
        },
        |record: &MovieRecord| record.meta_score.map(|m| m.as_scaled()),
    )
    .await
}

/// Metascore of every row on the 0 to 10 scale, in input order.
///
/// A row without a metascore, including one whose page cannot be fetched,
/// takes its `fallback_rating` instead.
pub async fn metascore_list(
    client: &HttpClient,
    rows: &[BatchRow],
    options: &BatchOptions,
    progress: Option<&ProgressSender>,
) -> Vec<Option<f64>> {
    run_ordered(
        rows,
        options,
        progress,
        |row| async move {
            match client.fetch(&row.url).await {
                Some(body) => {
                    let score = markup::normalized_metascore(&parse_page(&body));
                    (true, score.or(row.fallback_rating))
                }
                None => (false, row.fallback_rating),
            }
        },
        |score: &Option<f64>| *score,
    )
    .await
}

async fn run_ordered<'a, T, F, Fut>(
    rows: &'a [BatchRow],
    options: &BatchOptions,
    progress: Option<&ProgressSender>,
    work: F,
    score_of: fn(&T) -> Option<f64>,
) -> Vec<T>
where
    F: Fn(&'a BatchRow) -> Fut,
    Fut: Future<Output = (bool, T)>,
{
    let started = Instant::now();
    let total = rows.len();
    let request_id = options.request_id.as_str();
    let mut seq = 0u64;
    let mut unavailable = 0usize;
    let mut results = Vec::with_capacity(total);

    info!(total, concurrency = options.concurrency, "starting batch");
    emit(
        progress,
        request_id,
        &mut seq,
        ProgressEventKind::BatchStarted { total },
    );

    let mut outcomes = stream::iter(rows.iter().map(&work)).buffered(options.concurrency.max(1));
    while let Some((fetched, value)) = outcomes.next().await {
        let index = results.len();
        let url = &rows[index].url;
        let meta_score = score_of(&value);
        let percent_complete = percent(index + 1, total);
        if !fetched {
            unavailable += 1;
        }

        debug!(url = %url, ?meta_score, percent_complete, "row complete");
        emit(
            progress,
            request_id,
            &mut seq,
            ProgressEventKind::ItemProcessed {
                index,
                url: url.clone(),
                fetched,
                meta_score,
                percent_complete,
            },
        );
        results.push(value);
    }

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(total, unavailable, elapsed_ms, "batch complete");
    emit(
        progress,
        request_id,
        &mut seq,
        ProgressEventKind::BatchComplete {
            total,
            unavailable,
            elapsed_ms,
        },
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_imdb_export_csv() {
        let text = "Const,Your Rating,Title,URL,IMDb Rating\r\n\
                    tt0111161,10,\"Shawshank Redemption, The\",https://www.imdb.com/title/tt0111161/,9.3\r\n\
                    tt0068646,9,The Godfather,https://www.imdb.com/title/tt0068646/,\r\n";
        let rows = parse_table(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, "https://www.imdb.com/title/tt0111161/");
        assert_eq!(rows[0].fallback_rating, Some(9.3));
        assert_eq!(rows[1].url, "https://www.imdb.com/title/tt0068646/");
        assert_eq!(rows[1].fallback_rating, None);
    }

    #[test]
    fn test_parse_tsv_without_rating_column() {
        let text = "Title\tURL\nHeat\thttps://www.imdb.com/title/tt0113277/\n\n";
        let rows = parse_table(text).unwrap();
        assert_eq!(
            rows,
            vec![BatchRow {
                url: "https://www.imdb.com/title/tt0113277/".to_string(),
                fallback_rating: None,
            }]
        );
    }

    #[test]
    fn test_parse_quoted_fields() {
        let text = "Title,URL,IMDb Rating\n\"Say \"\"Cheese\"\", Please\",\"https://x/tt2\",\" 6.1 \"\n";
        let rows = parse_table(text).unwrap();
        assert_eq!(
            rows,
            vec![BatchRow {
                url: "https://x/tt2".to_string(),
                fallback_rating: Some(6.1),
            }]
        );
    }

    #[test]
    fn test_parse_bom_and_short_rows() {
        let text = "\u{feff}URL,IMDb Rating\nhttps://x/tt1\n  \nhttps://x/tt3,NaN\n";
        let rows = parse_table(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, "https://x/tt1");
        assert_eq!(rows[0].fallback_rating, None);
        assert_eq!(rows[1].fallback_rating, None);
    }

    #[test]
    fn test_parse_skips_rows_without_url() {
        let text = "URL,IMDb Rating\n,7.0\nhttps://x/tt1,bad\n";
        let rows = parse_table(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fallback_rating, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_table(""), Err(InputError::Empty)));
        assert!(matches!(
            parse_table("Title,Rating\nHeat,8.3\n"),
            Err(InputError::MissingColumn("URL"))
        ));
    }

    #[test]
    fn test_batch_options_clamp_concurrency() {
        assert_eq!(BatchOptions::with_concurrency(0).concurrency, 1);
        assert_eq!(BatchOptions::with_concurrency(8).concurrency, 8);
        assert_ne!(
            BatchOptions::default().request_id,
            BatchOptions::default().request_id
        );
    }
}
