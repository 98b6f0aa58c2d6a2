//! Display state derived from one refresh tick.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use super::sample::MetricSample;

/// Time format used for chart labels.
const TIME_FORMAT: &str = "%H:%M:%S";

/// Summary values shown in the Overview and Alerts views.
///
/// Replaced as a whole on every tick, never patched field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SystemSnapshot {
    /// CPU busy percentage.
    pub cpu_percent: f64,
    /// Available memory percentage.
    pub memory_percent: f64,
    /// Available disk percentage on the root mountpoint.
    pub disk_percent: f64,
    /// Active alert descriptions, in display order.
    pub alerts: Vec<String>,
}

/// A point of the historical CPU chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Wall-clock time in the local timezone.
    pub time: String,
    /// Unix timestamp in seconds, used to place the point on the x-axis.
    pub timestamp: f64,
    /// Sample value.
    pub value: f64,
}

/// Most recent value of the first series, or 0 when there is nothing to show.
pub fn latest_percent(result: Option<&[MetricSample]>) -> f64 {
    result
        .and_then(|series| series.first())
        .and_then(MetricSample::latest)
        .map(|point| point.value)
        .unwrap_or(0.0)
}

/// Chart points for every sample of the first series.
///
/// An absent or empty result yields an empty chart.
pub fn chart_points(result: Option<&[MetricSample]>) -> Vec<ChartPoint> {
    let Some(series) = result.and_then(|series| series.first()) else {
        return Vec::new();
    };

    series
        .points
        .iter()
        .map(|point| ChartPoint {
            time: format_time(point.timestamp),
            timestamp: point.timestamp,
            value: point.value,
        })
        .collect()
}

/// Format a unix timestamp (seconds) as local wall-clock time.
pub fn format_time(timestamp: f64) -> String {
    format_time_in(timestamp, &Local)
}

/// Format a unix timestamp (seconds) as wall-clock time in `tz`.
pub fn format_time_in<Tz>(timestamp: f64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if !timestamp.is_finite() {
        return "-".to_string();
    }

    let secs = timestamp.floor();
    let nanos = ((timestamp - secs) * 1e9) as u32;

    match DateTime::from_timestamp(secs as i64, nanos) {
        Some(utc) => utc.with_timezone(tz).format(TIME_FORMAT).to_string(),
        None => "-".to_string(),
    }
}
