// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Output mode flags and shared printing helpers.
//!
//! `main` exports the global `--json` and `--quiet` flags as environment
//! variables so every subcommand reads the same mode.

use crate::types::{LegacyMovieData, MovieRecord};
use serde::Serialize;
use std::fmt::Display;

pub const ENV_JSON: &str = "IMDB_SCRAPE_JSON";
pub const ENV_QUIET: &str = "IMDB_SCRAPE_QUIET";

/// Placeholder printed for unknown values.
const UNKNOWN: &str = "N/A";

pub fn is_json() -> bool {
    std::env::var_os(ENV_JSON).is_some()
}

pub fn is_quiet() -> bool {
    std::env::var_os(ENV_QUIET).is_some()
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("  Error: failed to serialize output: {e}"),
    }
}

pub fn print_record(record: &MovieRecord) {
    if is_json() {
        print_json(record);
        return;
    }
    println!("  Genres:          {}", list_or_unknown(&record.genres));
    println!("  IMDb rating:     {}", or_unknown(record.imdb_rating));
    println!("  Votes:           {}", or_unknown(record.num_votes));
    println!("  Metascore:       {}", or_unknown(record.meta_score));
    println!("  Year:            {}", or_unknown(record.production_year.as_deref()));
    println!("  Content rating:  {}", or_unknown(record.content_rating.as_deref()));
    println!("  Image:           {}", or_unknown(record.image_url.as_deref()));
    println!(
        "  Tags:            {}",
        record
            .tags
            .as_deref()
            .map(list_or_unknown)
            .unwrap_or_else(|| UNKNOWN.to_string())
    );
    println!("  Synopsis:        {}", or_unknown(record.synopsis.as_deref()));
}

pub fn print_legacy(data: &LegacyMovieData) {
    if is_json() {
        print_json(data);
        return;
    }
    println!("  Title:           {}", or_unknown(data.title.as_deref()));
    println!("  IMDb rating:     {}", or_unknown(data.imdb_rating));
    println!("  Metascore:       {}", or_unknown(data.meta_score));
    println!("  Genres:          {}", list_or_unknown(&data.genres));
    println!("  Year:            {}", or_unknown(data.production_year.as_deref()));
    println!("  Release date:    {}", or_unknown(data.release_date.as_deref()));
}

pub fn or_unknown<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn list_or_unknown(items: &[String]) -> String {
    if items.is_empty() {
        UNKNOWN.to_string()
    } else {
        items.join(", ")
    }
}
