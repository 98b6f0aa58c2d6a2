//! Data models for query results and display state.
//!
//! ## Submodules
//!
//! - [`sample`]: Series returned by the query endpoint ([`MetricSample`])
//! - [`snapshot`]: Display state derived from a tick ([`SystemSnapshot`], [`ChartPoint`])
//! - [`export`]: JSON export of the current display state
//!
//! ## Data Flow
//!
//! ```text
//! query response (raw JSON)
//!        │
//!        ▼
//! Vec<MetricSample>  (one per series)
//!        │
//!        ├──▶ latest_percent()  ──▶ SystemSnapshot
//!        │
//!        └──▶ chart_points()    ──▶ Vec<ChartPoint>   (CPU only)
//! ```

pub mod export;
pub mod sample;
pub mod snapshot;

pub use sample::{MetricSample, SamplePoint};
pub use snapshot::{chart_points, format_time, latest_percent, ChartPoint, SystemSnapshot};
