//! Series returned by a metric query.

use std::collections::BTreeMap;

/// A single `(timestamp, value)` pair of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Unix timestamp in seconds (may carry a fractional part).
    pub timestamp: f64,
    /// Sample value.
    pub value: f64,
}

impl SamplePoint {
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// One labeled series of a query result.
///
/// Instant queries yield a single point, range queries an ordered sequence.
/// Points keep the order in which the backend emitted them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSample {
    /// Label set identifying the series (e.g. `instance`, `job`).
    pub labels: BTreeMap<String, String>,
    /// Points in backend order (ascending by timestamp).
    pub points: Vec<SamplePoint>,
}

impl MetricSample {
    pub fn new(labels: BTreeMap<String, String>, points: Vec<SamplePoint>) -> Self {
        Self { labels, points }
    }

    /// The most recent point of the series.
    pub fn latest(&self) -> Option<SamplePoint> {
        self.points.last().copied()
    }

    /// Look up a label value.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }
}
