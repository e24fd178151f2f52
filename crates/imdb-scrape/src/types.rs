// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Output records produced by one extraction pass.

use serde::{Deserialize, Serialize};

/// Everything extracted for one title.
///
/// Every field starts out unknown (`None`, or an empty list for `genres`),
/// so `MovieRecord::default()` is the record of a page that was never
/// fetched. Unknown serializes as `null`, never as `0` or `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub genres: Vec<String>,
    pub image_url: Option<String>,
    /// No extractor populates this; kept so the record shape is stable.
    pub language: Option<String>,
    pub content_rating: Option<String>,
    pub num_votes: Option<u64>,
    /// IMDb user rating on a 0 to 10 scale.
    pub imdb_rating: Option<f64>,
    pub meta_score: Option<MetaScore>,
    /// No extractor populates this; see `synopsis`.
    pub summary: Option<String>,
    pub synopsis: Option<String>,
    /// Four-character year, e.g. `"1994"`.
    pub production_year: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl MovieRecord {
    /// True when no field carries a value.
    pub fn is_unknown(&self) -> bool {
        *self == Self::default()
    }
}

/// A critic score together with the scale it is expressed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaScore {
    /// Raw review-bar value, 0 to 100.
    Percent(u32),
    /// Rescaled to 0 to 10, either from the review bar or a substituted rating.
    Scaled(f64),
}

impl MetaScore {
    /// The score on the 0 to 10 scale used by `imdb_rating`.
    pub fn as_scaled(&self) -> f64 {
        match self {
            Self::Percent(p) => f64::from(*p) / 10.0,
            Self::Scaled(s) => *s,
        }
    }
}

impl std::fmt::Display for MetaScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{p}"),
            Self::Scaled(s) => write!(f, "{s:.1}"),
        }
    }
}

/// The markup-only extraction of the older page layout.
///
/// Mirrors what the legacy scraper returned: rating, title, metascore on the
/// 0 to 10 scale and genres, plus the year and release date decoded from the
/// same anchor list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMovieData {
    pub imdb_rating: Option<f64>,
    pub title: Option<String>,
    pub meta_score: Option<f64>,
    pub genres: Vec<String>,
    pub production_year: Option<String>,
    pub release_date: Option<String>,
}
