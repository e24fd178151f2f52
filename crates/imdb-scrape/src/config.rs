// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration: defaults, environment overrides and validation.

use crate::error::ConfigError;
use reqwest::header::HeaderValue;

/// Base of every title URL; the identifier is appended verbatim.
pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com/title/";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/131.0.0.0 Safari/537.36";

const ENV_BASE_URL: &str = "IMDB_SCRAPE_BASE_URL";
const ENV_TIMEOUT_MS: &str = "IMDB_SCRAPE_TIMEOUT_MS";
const ENV_USER_AGENT: &str = "IMDB_SCRAPE_USER_AGENT";
const ENV_CONCURRENCY: &str = "IMDB_SCRAPE_CONCURRENCY";

/// Scraper settings shared by the library and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Maximum number of titles fetched at once by the batch driver.
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrency: 1,
        }
    }
}

impl Config {
    /// Defaults overridden by any `IMDB_SCRAPE_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup(ENV_BASE_URL) {
            config.base_url = base;
        }
        if let Some(ua) = lookup(ENV_USER_AGENT) {
            config.user_agent = ua;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_ms = parse_number(ENV_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CONCURRENCY) {
            config.concurrency = parse_number(ENV_CONCURRENCY, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL parses, the user agent is a legal header value
    /// and concurrency is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ConfigError::InvalidUserAgent(self.user_agent.clone()));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }

    /// Title URL for `id` under the configured base.
    pub fn url_for(&self, id: &str) -> String {
        format!("{}{}", self.base_url, id)
    }
}

/// Title URL for `id` under the public IMDb base. No validation of `id`.
pub fn url_for(id: &str) -> String {
    format!("{DEFAULT_BASE_URL}{id}")
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}
