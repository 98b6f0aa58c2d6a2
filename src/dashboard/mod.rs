//! The refresh tick: three queries in, one display update out.

mod poller;

pub use poller::{Poller, PollerSource};

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::client::MetricsBackend;
use crate::data::{chart_points, latest_percent, ChartPoint, MetricSample, SystemSnapshot};

/// The fixed queries issued on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// CPU busy percentage per instance.
    Cpu,
    /// Available memory ratio.
    Memory,
    /// Available disk ratio on the root mountpoint.
    Disk,
}

impl QueryKind {
    /// All queries, in display order.
    pub const ALL: [QueryKind; 3] = [QueryKind::Cpu, QueryKind::Memory, QueryKind::Disk];

    /// The query expression sent to the backend.
    pub fn query(&self) -> &'static str {
        match self {
            QueryKind::Cpu => {
                r#"sum(rate(node_cpu_seconds_total{mode!="idle"}[5m])) by (instance) * 100"#
            }
            QueryKind::Memory => {
                "node_memory_MemAvailable_bytes / node_memory_MemTotal_bytes * 100"
            }
            QueryKind::Disk => {
                r#"node_filesystem_avail_bytes{mountpoint="/"} / node_filesystem_size_bytes{mountpoint="/"} * 100"#
            }
        }
    }

    /// Short name used in logs, the status bar and exports.
    pub fn label(&self) -> &'static str {
        match self {
            QueryKind::Cpu => "cpu",
            QueryKind::Memory => "memory",
            QueryKind::Disk => "disk",
        }
    }
}

/// Everything one tick produces. Applied to the display state as a unit.
#[derive(Debug, Clone)]
pub struct DashboardUpdate {
    pub snapshot: SystemSnapshot,
    pub chart: Vec<ChartPoint>,
    /// Queries that returned no data this tick.
    pub failed: Vec<QueryKind>,
    pub fetched_at: Instant,
}

/// Runs the refresh tick against a metrics backend.
#[derive(Debug, Clone)]
pub struct Dashboard {
    backend: Arc<dyn MetricsBackend>,
    deadline: Option<Duration>,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn MetricsBackend>) -> Self {
        Self {
            backend,
            deadline: None,
        }
    }

    /// Bound every query of a tick. A query still pending at the deadline
    /// counts as failed.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// The per-query deadline, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Returns a description of the backend being polled.
    pub fn description(&self) -> &str {
        self.backend.description()
    }

    /// Run one tick.
    ///
    /// The three queries are in flight together; the update is built only
    /// once all of them have settled. A failed query contributes 0 (and an
    /// empty chart for CPU), regardless of earlier ticks.
    pub async fn refresh(&self) -> DashboardUpdate {
        let (cpu, memory, disk) = tokio::join!(
            self.fetch(QueryKind::Cpu),
            self.fetch(QueryKind::Memory),
            self.fetch(QueryKind::Disk),
        );

        let failed: Vec<QueryKind> = [
            (QueryKind::Cpu, &cpu),
            (QueryKind::Memory, &memory),
            (QueryKind::Disk, &disk),
        ]
        .into_iter()
        .filter(|(_, result)| result.is_none())
        .map(|(kind, _)| kind)
        .collect();

        let snapshot = SystemSnapshot {
            cpu_percent: latest_percent(cpu.as_deref()),
            memory_percent: latest_percent(memory.as_deref()),
            disk_percent: latest_percent(disk.as_deref()),
            // No alert query is wired up yet
            alerts: Vec::new(),
        };
        let chart = chart_points(cpu.as_deref());

        tracing::debug!(
            cpu = snapshot.cpu_percent,
            memory = snapshot.memory_percent,
            disk = snapshot.disk_percent,
            chart_points = chart.len(),
            failed = failed.len(),
            "refresh complete"
        );

        DashboardUpdate {
            snapshot,
            chart,
            failed,
            fetched_at: Instant::now(),
        }
    }

    async fn fetch(&self, kind: QueryKind) -> Option<Vec<MetricSample>> {
        let request = self.backend.fetch(kind.query());
        let Some(deadline) = self.deadline else {
            return request.await;
        };

        match tokio::time::timeout(deadline, request).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    query = kind.label(),
                    deadline_secs = deadline.as_secs_f64(),
                    "query timed out"
                );
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory backend shared by the dashboard and poller tests.

    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::QueryKind;
    use crate::client::MetricsBackend;
    use crate::data::{MetricSample, SamplePoint};

    #[derive(Debug, Default)]
    pub struct FakeBackend {
        responses: Mutex<HashMap<&'static str, Option<Vec<MetricSample>>>>,
        hang_once: Mutex<HashSet<&'static str>>,
        calls: AtomicUsize,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, kind: QueryKind, result: Option<Vec<MetricSample>>) -> Self {
            self.responses.lock().unwrap().insert(kind.query(), result);
            self
        }

        pub fn respond_value(self, kind: QueryKind, value: f64) -> Self {
            self.respond(kind, Some(vec![series(&[(1_700_000_000.0, value)])]))
        }

        /// The next request for `kind` never completes.
        pub fn hang_once(self, kind: QueryKind) -> Self {
            self.hang_once.lock().unwrap().insert(kind.query());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetricsBackend for FakeBackend {
        async fn fetch(&self, query: &str) -> Option<Vec<MetricSample>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let hang = self.hang_once.lock().unwrap().remove(query);
            if hang {
                std::future::pending::<()>().await;
            }
            self.responses.lock().unwrap().get(query).cloned().flatten()
        }

        fn description(&self) -> &str {
            "fake"
        }
    }

    pub fn series(points: &[(f64, f64)]) -> MetricSample {
        MetricSample::new(
            Default::default(),
            points.iter().map(|&(t, v)| SamplePoint::new(t, v)).collect(),
        )
    }
}
