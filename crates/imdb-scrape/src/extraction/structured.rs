// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Read the JSON-LD block embedded in a title page.
//!
//! This is the primary extraction path. The page carries one
//! `<script type="application/ld+json">` describing the title; each field is
//! pulled from it independently, so a missing key or a value of the wrong
//! shape only loses that one field.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

const JSONLD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// `@type` values that describe a title page.
const MOVIE_TYPES: &[&str] = &["Movie", "TVSeries", "TVEpisode", "TVMovie", "CreativeWork"];

/// Fields the JSON-LD block can supply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredFields {
    pub genres: Vec<String>,
    pub image_url: Option<String>,
    pub content_rating: Option<String>,
    pub num_votes: Option<u64>,
    pub imdb_rating: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub synopsis: Option<String>,
    pub production_year: Option<String>,
}

/// Extract the title fields from the page's JSON-LD block.
///
/// An absent or unparsable block yields `StructuredFields::default()`.
pub fn extract_movie_jsonld(document: &Html) -> StructuredFields {
    match find_jsonld(document) {
        Some(value) => fields_from_value(&value),
        None => StructuredFields::default(),
    }
}

/// Map an already-parsed JSON-LD node onto the title fields.
pub fn fields_from_value(v: &Value) -> StructuredFields {
    let rating = v.get("aggregateRating");

    StructuredFields {
        genres: v.get("genre").map(string_list).unwrap_or_default(),
        image_url: v.get("image").and_then(|i| {
            i.as_str()
                .or_else(|| {
                    i.as_array()
                        .and_then(|a| a.first())
                        .and_then(|v| v.as_str())
                })
                .map(|s| s.to_string())
        }),
        content_rating: v
            .get("contentRating")
            .and_then(|c| c.as_str())
            .map(|s| s.to_string()),
        num_votes: rating.and_then(|r| r.get("ratingCount")).and_then(coerce_u64),
        imdb_rating: rating.and_then(|r| r.get("ratingValue")).and_then(coerce_f64),
        tags: v.get("keywords").and_then(keyword_list),
        synopsis: v
            .get("description")
            .and_then(|d| d.as_str())
            .map(|s| s.to_string()),
        production_year: v
            .get("datePublished")
            .and_then(|d| d.as_str())
            .and_then(year_prefix),
    }
}

fn find_jsonld(document: &Html) -> Option<Value> {
    let sel = Selector::parse(JSONLD_SELECTOR).ok()?;
    for element in document.select(&sel) {
        let text: String = element.text().collect();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(text) {
            Ok(value) => return Some(select_title_node(value)),
            Err(e) => debug!(error = %e, "skipping unparsable JSON-LD block"),
        }
    }
    None
}

/// Unwrap `@graph` wrappers and top-level arrays down to the title node.
fn select_title_node(value: Value) -> Value {
    let nodes = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("@graph") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                map.insert("@graph".to_string(), other);
                return Value::Object(map);
            }
            None => return Value::Object(map),
        },
        other => return other,
    };

    let pos = nodes.iter().position(is_title_node).unwrap_or(0);
    nodes.into_iter().nth(pos).unwrap_or(Value::Null)
}

fn is_title_node(v: &Value) -> bool {
    match v.get("@type") {
        Some(Value::String(t)) => MOVIE_TYPES.contains(&t.as_str()),
        Some(Value::Array(ts)) => ts
            .iter()
            .filter_map(|t| t.as_str())
            .any(|t| MOVIE_TYPES.contains(&t)),
        _ => false,
    }
}

/// A single string becomes a one-element list; arrays keep their strings.
fn string_list(v: &Value) -> Vec<String> {
    match v {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|i| i.as_str())
            .map(|s| s.to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// Keywords arrive as one comma-separated string or as an array.
fn keyword_list(v: &Value) -> Option<Vec<String>> {
    match v {
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| k.to_string())
                .collect(),
        ),
        Value::Array(_) => Some(string_list(v)),
        _ => None,
    }
}

fn coerce_u64(v: &Value) -> Option<u64> {
    v.as_u64()
        .or_else(|| {
            v.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

fn coerce_f64(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        .filter(|f: &f64| f.is_finite())
}

/// First four characters of a date such as `"1994-10-14"`.
fn year_prefix(date: &str) -> Option<String> {
    let year: String = date.chars().take(4).collect();
    (year.chars().count() == 4).then_some(year)
}
