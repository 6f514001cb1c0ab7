//! Lobbying-disclosure API module.
//!
//! Fetches filings, lobbyists and issues from the Sunlight `lobbyists.*`
//! API and maps the JSON replies into typed records.
//!
//! # Architecture
//!
//! - [`ApiFetcher`] - Trait for one request/response round trip
//! - [`HttpFetcher`] - Real HTTP implementation using reqwest
//! - [`LobbyingClient`] - Lookup operations built on any fetcher
//! - [`mock::MockFetcher`] - Recording fetcher for tests (behind `test-utils` feature)
//!
//! Every lookup reports "nothing to return" the same way: `None`. A failed
//! request, a reply without the expected payload, an empty result list and a
//! search filter without a name all end up there.
//!
//! # Example
//!
//! ```ignore
//! use sunlight_lobbying::lobbying::{
//!     FilingFilter, HttpFetcher, LobbyingClient, DEFAULT_BASE_URL,
//! };
//!
//! let client = LobbyingClient::new(HttpFetcher::new(DEFAULT_BASE_URL, "my-api-key"));
//!
//! if let Some(filings) = client
//!     .filings_where(&FilingFilter::default().with_client_name("SUNLIGHT FOUNDATION"))
//!     .await
//! {
//!     for filing in &filings {
//!         println!("{:?} {:?}", filing.filing_id, filing.registrant_name);
//!     }
//! }
//! ```
//!
//! # Testing
//!
//! ```ignore
//! use sunlight_lobbying::lobbying::mock::MockFetcher;
//!
//! let fetcher = MockFetcher::new();
//! fetcher.set_result(Ok(json!({ "response": { "filing": { "client_name": "ABC" } } })));
//!
//! let client = LobbyingClient::new(fetcher);
//! let filing = client.get_filing("some-id").await.unwrap();
//! assert_eq!(client.fetcher().calls().len(), 1);
//! ```

mod client;
mod lookup;
mod types;

pub use client::{
    ApiFetcher, Endpoint, HttpFetcher, LobbyingApiError, QueryParams, DEFAULT_BASE_URL,
};
pub use lookup::{FilingFilter, LobbyingClient, SearchOptions, Threshold};
pub use types::{Filing, Issue, JsonObject, Lobbyist, NonEmpty};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
