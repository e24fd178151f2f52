// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! imdb-scrape library: fetch IMDb title pages and extract structured fields.
//!
//! The primary path reads the page's JSON-LD block; the markup path reads the
//! older rating, review-bar and title-wrapper elements. Every field degrades
//! to unknown on its own, so one shifted element never costs the others.

pub mod acquisition;
pub mod aggregator;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod legacy;
pub mod progress;
pub mod types;

pub use acquisition::http_client::HttpClient;
pub use aggregator::{build_record, scrape_movie, scrape_url};
pub use config::{url_for, Config};
pub use types::{LegacyMovieData, MetaScore, MovieRecord};
