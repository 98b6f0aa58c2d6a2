//! Client for a Prometheus-compatible query endpoint.
//!
//! The client issues one instant query per call. Every failure (transport
//! error, non-success status, malformed body) is logged and reported as
//! "no data" so the dashboard can fall back to empty values.
//!
//! ## Example
//!
//! ```rust,no_run
//! use promdash::client::{MetricsBackend, PrometheusClient};
//!
//! # tokio_test::block_on(async {
//! let client = PrometheusClient::builder()
//!     .endpoint("http://localhost:3000/api/prometheus")
//!     .build()
//!     .unwrap();
//!
//! if let Some(series) = client.fetch("up").await {
//!     println!("{} series", series.len());
//! }
//! # });
//! ```

mod error;
mod response;

pub use error::FetchError;
pub use response::parse_response;

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::data::MetricSample;

/// Default query endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/prometheus";

/// Anything that can answer a metric query.
///
/// Implemented by [`PrometheusClient`]; tests provide in-memory fakes.
#[async_trait]
pub trait MetricsBackend: Send + Sync + Debug {
    /// Run `query` and return its series, or `None` if the query failed.
    async fn fetch(&self, query: &str) -> Option<Vec<MetricSample>>;

    /// Returns a human-readable description of the backend.
    fn description(&self) -> &str;
}

/// HTTP client for the query endpoint.
#[derive(Debug, Clone)]
pub struct PrometheusClient {
    client: Client,
    endpoint: String,
}

impl PrometheusClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> PrometheusClientBuilder {
        PrometheusClientBuilder::default()
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `query`, keeping the failure cause.
    pub async fn try_fetch(&self, query: &str) -> Result<Vec<MetricSample>, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query)])
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        parse_response(&body)
    }
}

#[async_trait]
impl MetricsBackend for PrometheusClient {
    async fn fetch(&self, query: &str) -> Option<Vec<MetricSample>> {
        match self.try_fetch(query).await {
            Ok(samples) => {
                tracing::debug!(query, series = samples.len(), "query succeeded");
                Some(samples)
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "error fetching metrics");
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.endpoint
    }
}

/// Builder for [`PrometheusClient`].
#[derive(Debug, Default)]
pub struct PrometheusClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    no_proxy: bool,
}

impl PrometheusClientBuilder {
    /// Set the query endpoint (e.g., "http://localhost:3000/api/prometheus").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set a request timeout. Without one the transport default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ignore proxies from the environment (`HTTP_PROXY` and friends).
    pub fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PrometheusClient, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if self.no_proxy {
            builder = builder.no_proxy();
        }

        Ok(PrometheusClient {
            client: builder.build()?,
            endpoint: self.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }
}
