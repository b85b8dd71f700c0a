//! HTTP download source.

use std::time::Duration;

use async_trait::async_trait;

use crate::raw::parse_body;
use crate::retry::{self, RetryPolicy};
use crate::{FetchOptions, IncidentSource, SourceError};

/// The Washington Post fatal police shootings dataset.
pub const WASHINGTON_POST_CSV_URL: &str = "https://raw.githubusercontent.com/washingtonpost/data-police-shootings/master/fatal-police-shootings-data.csv";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Downloads raw records (CSV or a JSON array) from a URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpSource {
    /// Creates a source for `url` with the default retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
            retry: RetryPolicy::default(),
        })
    }

    /// Source for [`WASHINGTON_POST_CSV_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn washington_post() -> Result<Self, SourceError> {
        Self::new(WASHINGTON_POST_CSV_URL)
    }

    /// Replaces the retry policy used for the download.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// URL being downloaded.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IncidentSource for HttpSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch_raw(
        &self,
        options: &FetchOptions,
    ) -> Result<Vec<serde_json::Value>, SourceError> {
        log::info!("Downloading {}", self.url);
        let text = retry::send_text(&self.retry, || self.client.get(&self.url)).await?;
        parse_body(&text, options.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_default_source() {
        let source = HttpSource::washington_post().unwrap();

        assert_eq!(source.url(), WASHINGTON_POST_CSV_URL);
        assert_eq!(source.name(), WASHINGTON_POST_CSV_URL);
    }

    #[test]
    fn retry_policy_is_configurable() {
        let source = HttpSource::new("http://localhost/data.csv")
            .unwrap()
            .with_retry(RetryPolicy::none());

        assert_eq!(source.retry, RetryPolicy::none());
    }
}
