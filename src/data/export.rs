//! JSON export of the dashboard state.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use super::snapshot::{ChartPoint, SystemSnapshot};

/// Build the export document for a snapshot and its chart.
pub fn to_json(snapshot: &SystemSnapshot, chart: &[ChartPoint], failed: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "summary": {
            "cpu_percent": snapshot.cpu_percent,
            "memory_percent": snapshot.memory_percent,
            "disk_percent": snapshot.disk_percent,
        },
        "alerts": snapshot.alerts,
        "failed_queries": failed,
        "cpu_history": chart,
    })
}

/// Write the export document to `path` as pretty-printed JSON.
pub fn write_to_file(
    path: &Path,
    snapshot: &SystemSnapshot,
    chart: &[ChartPoint],
    failed: &[&str],
) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_json(snapshot, chart, failed))?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
