//! Transport layer for the lobbying-disclosure API.
//!
//! The lookup operations never talk to reqwest directly. They hand an
//! [`Endpoint`] and a parameter map to an [`ApiFetcher`] and get parsed JSON
//! back. This keeps the response mapping testable without a network:
//!
//! - `HttpFetcher` makes real requests
//! - `mock::MockFetcher` returns canned JSON and records every call
//!
//! # Example
//!
//! ```ignore
//! use sunlight_lobbying::lobbying::{ApiFetcher, Endpoint, HttpFetcher, QueryParams};
//!
//! let fetcher = HttpFetcher::new("http://services.sunlightlabs.com/api", "my-api-key");
//! let mut params = QueryParams::new();
//! params.insert("id".into(), "29D4D19E-CB7D-46D2-99F0-27FF15901A4C".into());
//! let json = fetcher.fetch(Endpoint::GetFiling, &params).await?;
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::ApiConfig;

/// Base URL of the public Sunlight Labs API.
pub const DEFAULT_BASE_URL: &str = "http://services.sunlightlabs.com/api";

/// Query parameters for a single request, sorted by name.
pub type QueryParams = BTreeMap<String, String>;

/// Errors that can occur when calling the lobbying API.
#[derive(Debug, Error)]
pub enum LobbyingApiError {
    /// HTTP request failed (connect, timeout, or body decode)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}

/// The remote methods this client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `lobbyists.getFiling`: one filing by id.
    GetFiling,
    /// `lobbyists.getFilingList`: filings by client/registrant name.
    GetFilingList,
    /// `lobbyists.search`: fuzzy lobbyist name search.
    SearchLobbyists,
}

impl Endpoint {
    /// Method name as it appears in the request path.
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::GetFiling => "lobbyists.getFiling",
            Self::GetFilingList => "lobbyists.getFilingList",
            Self::SearchLobbyists => "lobbyists.search",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// One request/response round trip against the lobbying API.
///
/// Implementations supply the API credential themselves; callers only pass
/// the method-specific parameters.
#[async_trait]
pub trait ApiFetcher: Send + Sync {
    /// Call `endpoint` with `params` and return the parsed JSON body.
    async fn fetch(&self, endpoint: Endpoint, params: &QueryParams)
        -> Result<Value, LobbyingApiError>;
}

/// HTTP-based implementation of `ApiFetcher`.
///
/// Requests go to `{base_url}/{method}.json?apikey={key}&{params}`.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpFetcher {
    /// Create a fetcher with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a fetcher with a custom `reqwest::Client` (for testing with custom config).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a fetcher from loaded configuration, applying the request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self, LobbyingApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_client(client, &config.base_url, &config.key))
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}/{}.json",
            self.base_url.trim_end_matches('/'),
            endpoint.method()
        )
    }
}

#[async_trait]
impl ApiFetcher for HttpFetcher {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<Value, LobbyingApiError> {
        let url = self.endpoint_url(endpoint);

        tracing::debug!(
            %endpoint,
            params = ?params.keys().collect::<Vec<_>>(),
            "Sending lobbying API request"
        );

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LobbyingApiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        Ok(body)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{ApiFetcher, Endpoint, LobbyingApiError, QueryParams};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Mock implementation of `ApiFetcher` for unit tests.
    ///
    /// Configure the next reply with `set_result` and verify calls with
    /// `calls()`. Without a configured reply every fetch fails.
    pub struct MockFetcher {
        result: Mutex<Option<Result<Value, LobbyingApiError>>>,
        calls: Mutex<Vec<(Endpoint, QueryParams)>>,
    }

    impl MockFetcher {
        pub fn new() -> Self {
            Self {
                result: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for the next `fetch` call.
        pub fn set_result(&self, result: Result<Value, LobbyingApiError>) {
            *self.result.lock().unwrap() = Some(result);
        }

        /// Get every endpoint and parameter map passed to `fetch`.
        pub fn calls(&self) -> Vec<(Endpoint, QueryParams)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for MockFetcher {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ApiFetcher for MockFetcher {
        async fn fetch(
            &self,
            endpoint: Endpoint,
            params: &QueryParams,
        ) -> Result<Value, LobbyingApiError> {
            self.calls.lock().unwrap().push((endpoint, params.clone()));

            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| {
                    Err(LobbyingApiError::ApiError {
                        status: 503,
                        message: format!("no canned reply for {endpoint}"),
                    })
                })
        }
    }
}
