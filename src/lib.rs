//! # promdash
//!
//! A terminal dashboard for CPU, memory and disk metrics served by a
//! Prometheus-compatible query endpoint.
//!
//! Every refresh tick runs three fixed queries concurrently, turns the
//! results into a [`SystemSnapshot`] plus a CPU chart, and hands them to the
//! TUI as one [`DashboardUpdate`]. A failed query shows as zero; nothing is
//! retried.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌───────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │ client  │───▶│ dashboard │───▶│   app   │───▶│   ui    │  │
//! │  │ (HTTP)  │    │  (tick)   │    │ (state) │    │(render) │  │
//! │  └─────────┘    └─────┬─────┘    └────▲────┘    └─────────┘  │
//! │                       │ Poller        │ DataSource::poll     │
//! │                       └──── mpsc ─────┘                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`client`]**: [`PrometheusClient`] and the [`MetricsBackend`] trait
//! - **[`dashboard`]**: the refresh tick ([`Dashboard`]) and its scoped
//!   periodic runner ([`Poller`])
//! - **[`source`]**: the [`DataSource`] trait the TUI reads updates through
//! - **[`data`]**: series, snapshot and chart models, JSON export
//! - **[`app`]**: display state and navigation
//! - **[`ui`]**: ratatui rendering of the Overview, Historical and Alerts views
//! - **[`config`]**: layered settings
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the default endpoint every 30 seconds
//! promdash
//!
//! # Another endpoint, faster refresh
//! promdash --endpoint http://prom.local:9090/api/v1/query --refresh 5
//!
//! # One tick, written as JSON
//! promdash --export snapshot.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use promdash::{App, Dashboard, Poller, PrometheusClient, Theme};
//!
//! # tokio_test::block_on(async {
//! let client = PrometheusClient::builder()
//!     .endpoint("http://localhost:3000/api/prometheus")
//!     .build()
//!     .unwrap();
//! let dashboard = Dashboard::new(Arc::new(client));
//!
//! // The poller stops when dropped
//! let (poller, source) = Poller::spawn(dashboard, Duration::from_secs(30));
//! let app = App::new(Box::new(source), Theme::dark(), Duration::from_secs(30));
//! # drop(poller);
//! # });
//! ```

pub mod app;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use client::{FetchError, MetricsBackend, PrometheusClient};
pub use config::Settings;
pub use dashboard::{Dashboard, DashboardUpdate, Poller, PollerSource, QueryKind};
pub use data::{ChartPoint, MetricSample, SamplePoint, SystemSnapshot};
pub use source::DataSource;
pub use ui::Theme;
