//! Application state and navigation logic.

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::layout::Rect;

use crate::dashboard::{DashboardUpdate, QueryKind};
use crate::data::{export, ChartPoint, SystemSnapshot};
use crate::source::DataSource;
use crate::ui::Theme;

/// The current view/tab in the TUI. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Summary cards for CPU, memory and disk.
    #[default]
    Overview,
    /// CPU usage over time.
    Historical,
    /// Active alerts.
    Alerts,
}

impl View {
    /// All views, in tab order.
    pub const ALL: [View; 3] = [View::Overview, View::Historical, View::Alerts];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Historical,
            View::Historical => View::Alerts,
            View::Alerts => View::Overview,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Overview => View::Alerts,
            View::Historical => View::Overview,
            View::Alerts => View::Historical,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Historical => "Historical",
            View::Alerts => "Alerts",
        }
    }

    /// Position of this view in the tab bar.
    pub fn index(&self) -> usize {
        match self {
            View::Overview => 0,
            View::Historical => 1,
            View::Alerts => 2,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub snapshot: SystemSnapshot,
    pub chart: Vec<ChartPoint>,
    pub failed: Vec<QueryKind>,
    pub last_updated: Option<Instant>,
    pub load_error: Option<String>,
    pub refresh_interval: Duration,

    // Historical view cursor (index into `chart`)
    pub hover: Option<usize>,
    /// Area the chart was last drawn in, for mouse hit-testing.
    pub chart_area: Option<Rect>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading updates from `source`.
    pub fn new(source: Box<dyn DataSource>, theme: Theme, refresh_interval: Duration) -> Self {
        Self {
            running: true,
            current_view: View::default(),
            show_help: false,
            source,
            snapshot: SystemSnapshot::default(),
            chart: Vec::new(),
            failed: Vec::new(),
            last_updated: None,
            load_error: None,
            refresh_interval,
            hover: None,
            chart_area: None,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for a finished tick.
    ///
    /// Returns Ok(true) if new data was applied, Ok(false) otherwise.
    pub fn reload_data(&mut self) -> Result<bool> {
        if let Some(update) = self.source.poll() {
            self.apply(update);
            return Ok(true);
        }

        // Check for errors from the source
        self.load_error = self.source.error().map(str::to_string);
        Ok(false)
    }

    /// Replace the display state with the result of one tick.
    pub fn apply(&mut self, update: DashboardUpdate) {
        self.snapshot = update.snapshot;
        self.chart = update.chart;
        self.failed = update.failed;
        self.last_updated = Some(update.fetched_at);
        self.load_error = None;

        // Clamp chart cursor
        if let Some(index) = self.hover {
            self.hover = if self.chart.is_empty() {
                None
            } else {
                Some(index.min(self.chart.len() - 1))
            };
        }
    }

    /// Ask the source for an immediate tick.
    pub fn request_refresh(&mut self) {
        if self.source.request_refresh() {
            self.set_status_message("Refreshing...".to_string());
        } else {
            self.set_status_message("Refresh already pending".to_string());
        }
    }

    /// Time until the next scheduled tick, if one has happened yet.
    pub fn next_refresh_in(&self) -> Option<Duration> {
        self.last_updated
            .map(|at| self.refresh_interval.saturating_sub(at.elapsed()))
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        if view != View::Historical {
            self.hover = None;
        }
    }

    /// Move the chart cursor one point to the right.
    pub fn hover_next(&mut self) {
        if self.chart.is_empty() {
            return;
        }
        let last = self.chart.len() - 1;
        self.hover = Some(match self.hover {
            Some(index) => (index + 1).min(last),
            None => last,
        });
    }

    /// Move the chart cursor one point to the left.
    pub fn hover_prev(&mut self) {
        if self.chart.is_empty() {
            return;
        }
        self.hover = Some(match self.hover {
            Some(index) => index.saturating_sub(1),
            None => self.chart.len() - 1,
        });
    }

    /// Place the chart cursor on the point nearest to a terminal column.
    ///
    /// Columns outside the last drawn chart area leave the cursor unchanged.
    pub fn set_hover_from_column(&mut self, column: u16, row: u16) {
        let Some(area) = self.chart_area else {
            return;
        };
        if self.chart.is_empty() || area.width < 3 {
            return;
        }

        // Plot area lies inside the border
        let left = area.x + 1;
        let right = area.x + area.width - 2;
        let top = area.y + 1;
        let bottom = area.y + area.height.saturating_sub(2);
        if column < left || column > right || row < top || row > bottom {
            return;
        }

        let span = (right - left).max(1) as f64;
        let fraction = (column - left) as f64 / span;
        let index = (fraction * (self.chart.len() - 1) as f64).round() as usize;
        self.hover = Some(index.min(self.chart.len() - 1));
    }

    /// Remove the chart cursor.
    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// The point under the chart cursor.
    pub fn hovered_point(&self) -> Option<&ChartPoint> {
        self.hover.and_then(|index| self.chart.get(index))
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        if self.last_updated.is_none() {
            anyhow::bail!("No data to export");
        }

        let failed: Vec<&str> = self.failed.iter().map(QueryKind::label).collect();
        export::write_to_file(path, &self.snapshot, &self.chart, &failed)
    }
}
