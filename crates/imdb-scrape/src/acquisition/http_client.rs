// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Async HTTP client wrapping reqwest.
//!
//! One GET per page, no retries. A response is only handed to the
//! extractors when it is a 200 with an HTML Content-Type; everything else is
//! reported as unavailable.

use crate::config::Config;
use crate::error::{ConfigError, FetchError, FetchResult};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for title pages.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client with the default user agent and the given timeout.
    pub fn new(timeout_ms: u64) -> Self {
        Self::build(timeout_ms, crate::config::DEFAULT_USER_AGENT)
    }

    /// Create a client from the timeout and user agent in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::build(config.timeout_ms, &config.user_agent)
    }

    /// Create a client from `config`, rejecting settings reqwest cannot use.
    pub fn try_from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn build(timeout_ms: u64, user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "client settings rejected, using reqwest defaults");
                reqwest::Client::default()
            });

        Self { client }
    }

    /// Fetch `url`, returning its body only if the response is usable.
    ///
    /// Failures are logged once with the URL and cause and then discarded.
    pub async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        match self.try_fetch(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(url, error = %e, "page unavailable");
                None
            }
        }
    }

    /// Fetch `url` and report why it was rejected.
    ///
    /// Status and headers are checked before the body is read, so rejected
    /// responses never download their payload.
    pub async fn try_fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        classify_response(status, content_type.as_deref())?;

        let body = resp.bytes().await?;
        debug!(url, bytes = body.len(), "fetched page");
        Ok(body.to_vec())
    }
}

/// Whether a response with this status and Content-Type may be parsed.
pub fn is_good_response(status: u16, content_type: Option<&str>) -> bool {
    classify_response(status, content_type).is_ok()
}

fn classify_response(status: u16, content_type: Option<&str>) -> FetchResult<()> {
    if status != 200 {
        return Err(FetchError::Status(status));
    }
    let content_type = content_type.ok_or(FetchError::MissingContentType)?;
    if !content_type.to_lowercase().contains("html") {
        return Err(FetchError::NotHtml(content_type.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new(10000);
        let _ = client;
        let _ = HttpClient::from_config(&Config::default());
    }

    #[test]
    fn test_try_from_config_rejects_bad_user_agent() {
        let config = Config {
            user_agent: "bad\nagent".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpClient::try_from_config(&config),
            Err(ConfigError::InvalidUserAgent(_))
        ));
        assert!(HttpClient::try_from_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_good_response_requires_200() {
        assert!(is_good_response(200, Some("text/html")));
        assert!(!is_good_response(404, Some("text/html")));
        assert!(!is_good_response(301, Some("text/html")));
        assert!(matches!(
            classify_response(503, Some("text/html")),
            Err(FetchError::Status(503))
        ));
    }

    #[test]
    fn test_good_response_requires_html_content_type() {
        assert!(is_good_response(200, Some("text/html; charset=utf-8")));
        assert!(is_good_response(200, Some("TEXT/HTML")));
        assert!(is_good_response(200, Some("application/xhtml+xml")));
        assert!(!is_good_response(200, Some("application/json")));
        assert!(matches!(
            classify_response(200, None),
            Err(FetchError::MissingContentType)
        ));
        assert!(matches!(
            classify_response(200, Some("image/png")),
            Err(FetchError::NotHtml(ct)) if ct == "image/png"
        ));
    }
}
