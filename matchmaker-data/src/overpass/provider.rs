//! HTTP client for the Overpass interpreter endpoint.

use std::time::Duration;

use async_trait::async_trait;
use matchmaker_core::{AmenityCounts, AmenityKind, AmenityLookup, Coordinate, LookupError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::query::build_query;
use super::response::OverpassResponse;

/// Public Overpass instance.
pub const DEFAULT_BASE_URL: &str = "https://overpass-api.de";

/// Default user agent for Overpass requests.
pub const DEFAULT_USER_AGENT: &str = "matchmaker-overpass/0.1";

/// Default search radius around a neighborhood.
pub const DEFAULT_RADIUS_METERS: u32 = 1000;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RATE_LIMIT_BACKOFF_SECS: u64 = 30;
const DEFAULT_MAX_RATE_LIMIT_RETRIES: u32 = 2;

/// Error raised while constructing an [`OverpassAmenityLookup`].
#[derive(Debug, Error)]
pub enum OverpassBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Configuration for [`OverpassAmenityLookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassConfig {
    /// Base URL of the Overpass instance, without the `/api/interpreter` path.
    pub base_url: String,
    /// Search radius around each location.
    pub radius_meters: u32,
    /// Connect and total request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Wait after an HTTP 429 before retrying.
    pub rate_limit_backoff: Duration,
    /// Retries allowed after the first rate-limited attempt.
    pub max_rate_limit_retries: u32,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            radius_meters: DEFAULT_RADIUS_METERS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            rate_limit_backoff: Duration::from_secs(DEFAULT_RATE_LIMIT_BACKOFF_SECS),
            max_rate_limit_retries: DEFAULT_MAX_RATE_LIMIT_RETRIES,
        }
    }
}

impl OverpassConfig {
    /// Create a configuration targeting `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the search radius.
    #[must_use]
    pub const fn with_radius_meters(mut self, radius_meters: u32) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the wait between rate-limited attempts.
    #[must_use]
    pub const fn with_rate_limit_backoff(mut self, backoff: Duration) -> Self {
        self.rate_limit_backoff = backoff;
        self
    }

    /// Set how many times a rate-limited request is retried.
    #[must_use]
    pub const fn with_max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.max_rate_limit_retries = retries;
        self
    }
}

/// [`AmenityLookup`] backed by an Overpass interpreter.
///
/// One POST is sent per call with the Overpass QL query as a `text/plain`
/// body. Rate-limited responses are retried after
/// [`OverpassConfig::rate_limit_backoff`]; every other failure is returned
/// immediately.
#[derive(Debug)]
pub struct OverpassAmenityLookup {
    client: Client,
    config: OverpassConfig,
}

impl OverpassAmenityLookup {
    /// Create a lookup against `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, OverpassBuildError> {
        Self::with_config(OverpassConfig::new(base_url))
    }

    /// Create a lookup with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: OverpassConfig) -> Result<Self, OverpassBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(OverpassBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &OverpassConfig {
        &self.config
    }

    fn interpreter_url(&self) -> String {
        format!(
            "{}/api/interpreter",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn post_query(&self, url: &str, query: &str) -> Result<OverpassResponse, LookupError> {
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            let response = self
                .client
                .post(url)
                .header(CONTENT_TYPE, "text/plain")
                .body(query.to_owned())
                .send()
                .await
                .map_err(|err| convert_reqwest_error(&err, url))?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                if attempts > self.config.max_rate_limit_retries {
                    return Err(LookupError::RateLimited {
                        url: url.to_owned(),
                        attempts,
                    });
                }
                log::warn!(
                    "overpass rate limited request {attempts}; retrying in {:?}",
                    self.config.rate_limit_backoff
                );
                tokio::time::sleep(self.config.rate_limit_backoff).await;
                continue;
            }

            let accepted = response
                .error_for_status()
                .map_err(|err| convert_reqwest_error(&err, url))?;
            return accepted
                .json::<OverpassResponse>()
                .await
                .map_err(|err| LookupError::Parse {
                    message: err.to_string(),
                });
        }
    }
}

/// Convert a reqwest error to a `LookupError`.
fn convert_reqwest_error(error: &reqwest::Error, url: &str) -> LookupError {
    if error.is_timeout() {
        return LookupError::Timeout {
            url: url.to_owned(),
        };
    }

    if let Some(status) = error.status() {
        return LookupError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
        };
    }

    LookupError::Network {
        url: url.to_owned(),
        message: error.to_string(),
    }
}

#[async_trait]
impl AmenityLookup for OverpassAmenityLookup {
    async fn resolve(
        &self,
        location: Coordinate,
        kinds: &[AmenityKind],
    ) -> Result<AmenityCounts, LookupError> {
        if kinds.is_empty() {
            return Ok(AmenityCounts::new());
        }
        let url = self.interpreter_url();
        let query = build_query(location, self.config.radius_meters, kinds);
        log::debug!(
            "querying overpass for {} kinds around ({}, {})",
            kinds.len(),
            location.lat(),
            location.lon()
        );
        let response = self.post_query(&url, &query).await?;
        Ok(response.count(kinds))
    }
}
