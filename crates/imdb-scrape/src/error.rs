// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the transport, configuration and batch input layers.
//!
//! Extraction itself has no error type: every extractor reports a missing or
//! malformed value as `None`.

/// Why a page could not be used.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("response has no Content-Type header")]
    MissingContentType,

    #[error("response is not HTML (Content-Type: {0})")]
    NotHtml(String),
}

/// Invalid configuration values.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid value for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("invalid user agent {0:?}: not a valid header value")]
    InvalidUserAgent(String),

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Problems reading a batch input table.
#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input table is empty")]
    Empty,

    #[error("input table has no {0:?} column")]
    MissingColumn(&'static str),
}

/// Convenience result type for fetches.
pub type FetchResult<T> = Result<T, FetchError>;
