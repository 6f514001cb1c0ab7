//! Filing and lobbyist lookups.
//!
//! Each operation makes at most one request through the [`ApiFetcher`] and
//! returns `None` whenever there is nothing to hand back: the request failed,
//! the reply lacked the expected payload, or the result list came back empty.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use super::client::{ApiFetcher, Endpoint, QueryParams};
use super::types::{number, Filing, Lobbyist, NonEmpty};

/// Minimum fuzzy score a search candidate must beat.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Threshold(f64);

impl Threshold {
    /// Scores at or below 0.8 are not reliable matches.
    pub const DEFAULT: Self = Self(0.8);

    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether `score` is strictly above the threshold.
    #[must_use]
    pub fn admits(self, score: f64) -> bool {
        score > self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl FromStr for Threshold {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Filters for [`LobbyingClient::filings_where`].
///
/// At least one of `client_name` or `registrant_name` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingFilter {
    pub client_name: Option<String>,
    pub registrant_name: Option<String>,
    pub year: Option<String>,
}

impl FilingFilter {
    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_registrant_name(mut self, name: impl Into<String>) -> Self {
        self.registrant_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Whether the filter names a client or a registrant.
    #[must_use]
    pub const fn has_name(&self) -> bool {
        self.client_name.is_some() || self.registrant_name.is_some()
    }

    fn to_params(&self) -> QueryParams {
        [
            ("client_name", &self.client_name),
            ("registrant_name", &self.registrant_name),
            ("year", &self.year),
        ]
        .into_iter()
        .filter_map(|(key, value)| Some((key.to_string(), value.clone()?)))
        .collect()
    }
}

/// Options for [`LobbyingClient::search_lobbyists_by_name`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub year: Option<String>,
    pub threshold: Threshold,
}

impl SearchOptions {
    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: impl Into<Threshold>) -> Self {
        self.threshold = threshold.into();
        self
    }
}

/// Lookup operations over an [`ApiFetcher`].
pub struct LobbyingClient<F> {
    fetcher: F,
}

impl<F: ApiFetcher> LobbyingClient<F> {
    pub const fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// The underlying fetcher.
    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Get a single filing by its id.
    ///
    /// Returns `None` if the request fails or the reply has no filing.
    pub async fn get_filing(&self, id: &str) -> Option<Filing> {
        let params = QueryParams::from([("id".to_string(), id.to_string())]);
        let response = self.fetch(Endpoint::GetFiling, &params).await?;

        let Some(filing) = response
            .get("response")
            .and_then(|r| r.get("filing"))
            .and_then(Value::as_object)
        else {
            tracing::debug!(id, "Reply carried no filing");
            return None;
        };

        Some(Filing::from_json(filing))
    }

    /// Search filings by client and/or registrant name, optionally by year.
    ///
    /// A filter without any name returns `None` without making a request.
    pub async fn filings_where(&self, filter: &FilingFilter) -> Option<NonEmpty<Filing>> {
        if !filter.has_name() {
            tracing::debug!("Filing search needs a client or registrant name");
            return None;
        }

        let response = self
            .fetch(Endpoint::GetFilingList, &filter.to_params())
            .await?;

        let entries = response
            .get("response")
            .and_then(|r| r.get("filings"))
            .and_then(Value::as_array)?;

        let filings = entries
            .iter()
            .filter_map(|entry| entry.get("filing")?.as_object())
            .map(Filing::from_json)
            .collect();

        NonEmpty::from_vec(filings)
    }

    /// Fuzzy name search for lobbyists.
    ///
    /// The threshold is sent to the service and applied again here: only
    /// candidates scoring strictly above it are returned, each with
    /// `fuzzy_score` set. Order follows the service reply.
    pub async fn search_lobbyists_by_name(
        &self,
        name: &str,
        options: &SearchOptions,
    ) -> Option<NonEmpty<Lobbyist>> {
        let mut params = QueryParams::new();
        params.insert("name".into(), name.to_string());
        params.insert("threshold".into(), options.threshold.to_string());
        if let Some(year) = &options.year {
            params.insert("year".into(), year.clone());
        }

        let response = self.fetch(Endpoint::SearchLobbyists, &params).await?;

        let results = response
            .get("response")
            .and_then(|r| r.get("results"))
            .and_then(Value::as_array)?;

        let lobbyists = results
            .iter()
            .filter_map(|entry| entry.get("result"))
            .filter_map(|result| {
                let score = result.get("score").and_then(number)?;
                if !options.threshold.admits(score) {
                    return None;
                }

                let mut lobbyist = result
                    .get("lobbyist")
                    .and_then(Value::as_object)
                    .map(Lobbyist::from_json)
                    .unwrap_or_default();
                lobbyist.fuzzy_score = Some(score);
                Some(lobbyist)
            })
            .collect();

        NonEmpty::from_vec(lobbyists)
    }

    async fn fetch(&self, endpoint: Endpoint, params: &QueryParams) -> Option<Value> {
        match self.fetcher.fetch(endpoint, params).await {
            Ok(body) => Some(body),
            Err(err) => {
                tracing::warn!(%endpoint, error = %err, "Lobbying API request failed");
                None
            }
        }
    }
}
