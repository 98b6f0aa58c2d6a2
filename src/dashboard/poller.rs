//! Periodic refresh as a scoped subscription.
//!
//! [`Poller::spawn`] starts a background task that ticks immediately and then
//! once per interval. Dropping (or stopping) the [`Poller`] aborts the task,
//! so no fetches are issued after the dashboard is torn down.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{Dashboard, DashboardUpdate};
use crate::source::DataSource;

/// Handle to the background refresh task.
///
/// The task lives exactly as long as this handle.
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
    refresh_tx: mpsc::Sender<()>,
}

impl Poller {
    /// Spawn the refresh task on the current tokio runtime.
    ///
    /// Returns the handle that owns the task and the source the TUI reads
    /// updates from. Queries are bounded by the interval unless the dashboard
    /// already carries a deadline, so a hung request cannot stall later ticks.
    pub fn spawn(dashboard: Dashboard, interval: Duration) -> (Self, PollerSource) {
        let dashboard = match dashboard.deadline() {
            Some(_) => dashboard,
            None => dashboard.with_deadline(interval),
        };
        let (update_tx, update_rx) = mpsc::channel(4);
        let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(1);
        let description = format!("poll: {} every {}s", dashboard.description(), interval.as_secs());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // Ticks never overlap; a slow tick pushes the schedule back
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    request = refresh_rx.recv() => {
                        if request.is_none() {
                            break;
                        }
                        tracing::debug!("manual refresh requested");
                        ticker.reset();
                    }
                }

                let update = dashboard.refresh().await;

                if update_tx.send(update).await.is_err() {
                    // Receiver gone: the dashboard was detached mid-tick
                    tracing::debug!("dashboard detached, dropping update");
                    break;
                }
            }
        });

        let source = PollerSource {
            receiver: update_rx,
            refresh_tx: refresh_tx.clone(),
            description,
            last_error: None,
        };

        (Self { handle, refresh_tx }, source)
    }

    /// Ask the task to tick now.
    pub fn request_refresh(&self) -> bool {
        self.refresh_tx.try_send(()).is_ok()
    }

    /// Cancel the task. No further fetches are issued.
    pub fn stop(&self) {
        self.handle.abort();
    }

    /// Whether the task has ended (stopped, detached or panicked).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The receiving side of a [`Poller`].
#[derive(Debug)]
pub struct PollerSource {
    receiver: mpsc::Receiver<DashboardUpdate>,
    refresh_tx: mpsc::Sender<()>,
    description: String,
    last_error: Option<String>,
}

impl DataSource for PollerSource {
    fn poll(&mut self) -> Option<DashboardUpdate> {
        let mut latest = None;

        // Drain the channel and keep only the newest tick
        loop {
            match self.receiver.try_recv() {
                Ok(update) => latest = Some(update),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.last_error = Some("Poller stopped".to_string());
                    break;
                }
            }
        }

        latest
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn request_refresh(&mut self) -> bool {
        self.refresh_tx.try_send(()).is_ok()
    }
}
