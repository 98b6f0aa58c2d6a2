//! Data source abstraction for receiving dashboard updates.
//!
//! The TUI loop never waits on the network. It asks its [`DataSource`] for
//! the newest finished tick and redraws with whatever is there.

use std::fmt::Debug;

use crate::dashboard::DashboardUpdate;

/// Trait for receiving dashboard updates.
///
/// The production implementation is [`PollerSource`](crate::dashboard::PollerSource),
/// fed by a background [`Poller`](crate::dashboard::Poller).
pub trait DataSource: Send + Debug {
    /// Poll for the latest update.
    ///
    /// Returns `Some(update)` if a tick finished since the last call, `None`
    /// otherwise. This method must not block.
    fn poll(&mut self) -> Option<DashboardUpdate>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;

    /// Check if the source has stopped delivering updates.
    fn error(&self) -> Option<&str>;

    /// Ask for a tick outside the regular schedule.
    ///
    /// Returns `false` if the request could not be queued.
    fn request_refresh(&mut self) -> bool {
        false
    }
}
