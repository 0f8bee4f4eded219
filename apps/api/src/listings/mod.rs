//! Listing sources — one adapter per job-search provider.
//!
//! Each adapter turns a normalized `Filter` into a single provider GET request
//! and the provider's JSON into `ListingRecord`s. A non-200 answer is not an
//! error at this layer: it becomes one `ErrorRecord` so the agent still gets an
//! observation to reason about. Transport and body-decoding failures do bubble up.
//!
//! The agent holds adapters as `Arc<dyn ListingAdapter>`.

pub mod active_jobs;
pub mod filter;
pub mod linkedin;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use active_jobs::ActiveJobsAdapter;
pub use filter::{Filter, FilterError};
pub use linkedin::LinkedInAdapter;

// ────────────────────────────────────────────────────────────────────────────
// Normalized records
// ────────────────────────────────────────────────────────────────────────────

/// Which adapter produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingSource {
    #[serde(rename = "ActiveJobsDB")]
    ActiveJobsDb,
    LinkedIn,
}

/// A single job posting. Fields the provider omitted stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub source: ListingSource,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
}

/// Stands in for the listings of a failed provider call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
}

/// One element of an adapter's output: serializes as the bare record object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultRecord {
    Listing(ListingRecord),
    Error(ErrorRecord),
}

impl ResultRecord {
    pub fn is_error(&self) -> bool {
        matches!(self, ResultRecord::Error(_))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Adapter trait
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("request to {provider} failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned a body that is not a job list: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// A job-search provider the agent can call as a tool.
#[async_trait]
pub trait ListingAdapter: Send + Sync {
    /// Tool name shown to the reasoning model.
    fn name(&self) -> &'static str;

    /// Tool description shown to the reasoning model.
    fn description(&self) -> &'static str;

    fn source(&self) -> ListingSource;

    /// One provider call. Non-200 statuses come back as a single `ErrorRecord`.
    async fn fetch(&self, filter: &Filter) -> Result<Vec<ResultRecord>, AdapterError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Shared RapidAPI transport
// ────────────────────────────────────────────────────────────────────────────

/// Both providers sit behind RapidAPI and share its key-header authentication.
#[derive(Clone)]
pub struct RapidApi {
    client: Client,
    api_key: String,
}

impl RapidApi {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    async fn get(
        &self,
        url: &str,
        host: &str,
        params: &[(&str, String)],
    ) -> Result<Response, reqwest::Error> {
        self.client
            .get(url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", host)
            .query(params)
            .send()
            .await
    }
}

/// Reads an optional provider field as text: strings verbatim, other JSON
/// values by their JSON text, `null` as absent.
pub(crate) fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
