// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Positional decoding of the anchor list under a title heading.
//!
//! The older title layout renders a flat run of links beneath the heading:
//! the production year, then one link per genre, then the release date.
//! [`LabeledLinks::decode`] is the only place that index arithmetic lives.
//!
//! Contract, for `n` labels in document order:
//!
//! | n   | production_year | genres        | release_date |
//! |-----|-----------------|---------------|--------------|
//! | 0   | `None`          | empty         | `None`       |
//! | 1   | label 0         | empty         | `None`       |
//! | ≥ 2 | label 0         | labels 1..n-1 | label n-1    |
//!
//! Positions are fixed before any label is inspected. An empty label leaves
//! its slot unknown (year, release date) or is skipped (genres); it never
//! shifts the labels after it.

use serde::{Deserialize, Serialize};

/// Year, genres and release date decoded from a list of link labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledLinks {
    pub production_year: Option<String>,
    pub genres: Vec<String>,
    pub release_date: Option<String>,
}

impl LabeledLinks {
    /// Decode labels by position. See the module docs for the contract.
    pub fn decode<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Self::default();
        }

        let production_year = non_empty(labels.remove(0));
        let release_date = labels.pop().and_then(non_empty);
        labels.retain(|genre| !genre.is_empty());

        Self {
            production_year,
            genres: labels,
            release_date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.production_year.is_none() && self.genres.is_empty() && self.release_date.is_none()
    }
}

fn non_empty(label: String) -> Option<String> {
    (!label.is_empty()).then_some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_list() {
        let links = LabeledLinks::decode(["2004", "Action", "Drama", "15 October 2004"]);
        assert_eq!(links.production_year.as_deref(), Some("2004"));
        assert_eq!(links.genres, vec!["Action", "Drama"]);
        assert_eq!(links.release_date.as_deref(), Some("15 October 2004"));
    }

    #[test]
    fn test_decode_single_label_is_year_only() {
        let links = LabeledLinks::decode(["2004"]);
        assert_eq!(links.production_year.as_deref(), Some("2004"));
        assert!(links.genres.is_empty());
        assert_eq!(links.release_date, None);
    }

    #[test]
    fn test_decode_two_labels_has_no_genres() {
        let links = LabeledLinks::decode(["1999", "31 March 1999"]);
        assert_eq!(links.production_year.as_deref(), Some("1999"));
        assert!(links.genres.is_empty());
        assert_eq!(links.release_date.as_deref(), Some("31 March 1999"));
    }

    #[test]
    fn test_decode_empty_labels_hold_their_slot() {
        let links = LabeledLinks::decode(["", "Action", "", "Drama", ""]);
        assert_eq!(links.production_year, None);
        assert_eq!(links.genres, vec!["Action", "Drama"]);
        assert_eq!(links.release_date, None);
    }

    #[test]
    fn test_decode_empty() {
        let links = LabeledLinks::decode(Vec::<String>::new());
        assert!(links.is_empty());
        assert_eq!(links, LabeledLinks::default());
    }
}
