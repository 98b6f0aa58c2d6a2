//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`overview`]: Summary cards for CPU, memory and disk
//! - [`historical`]: CPU usage line chart with grid, legend and tooltip
//! - [`alerts`]: Alert boxes, or a placeholder when there are none
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (overview/historical/alerts::render) │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod alerts;
pub mod common;
pub mod historical;
pub mod overview;
pub mod theme;

pub use theme::{Theme, ThemeChoice};

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};

/// Minimum terminal size for usable display.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 12;

/// Row of the tab bar, used for mouse hit-testing.
pub const TAB_ROW: u16 = 1;

/// Draw a full frame: header, tabs, the current view, status bar and overlays.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let y = (area.height / 2).saturating_sub(2);
        let centered = Rect::new(0, y, area.width, 5u16.min(area.height - y));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    // Only the selected view is drawn
    app.chart_area = None;
    match app.current_view {
        View::Overview => overview::render(frame, app, chunks[2]),
        View::Historical => historical::render(frame, app, chunks[2]),
        View::Alerts => alerts::render(frame, app, chunks[2]),
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::testing::draw_to_string;
    use super::*;
    use crate::app::testing::{update, ScriptedSource};

    fn app() -> App {
        let source = ScriptedSource {
            updates: vec![update(42.1234, 63.5, 80.0, 5)].into(),
            ..Default::default()
        };
        let mut app = App::new(Box::new(source), Theme::dark(), Duration::from_secs(30));
        app.reload_data().unwrap();
        app
    }

    #[test]
    fn test_default_view_is_overview() {
        let mut app = app();
        let text = draw_to_string(&mut app, 100, 24);

        assert!(text.contains("Current CPU Utilization"));
        assert!(!text.contains("CPU Usage Over Time"));
        assert!(!text.contains("System Alerts"));
    }

    #[test]
    fn test_exactly_one_view_visible() {
        let mut app = app();

        app.set_view(View::Historical);
        let text = draw_to_string(&mut app, 100, 24);
        assert!(text.contains("CPU Usage Over Time"));
        assert!(!text.contains("Current CPU Utilization"));
        assert!(!text.contains("System Alerts"));

        app.set_view(View::Alerts);
        let text = draw_to_string(&mut app, 100, 24);
        assert!(text.contains("System Alerts"));
        assert!(!text.contains("Current CPU Utilization"));
        assert!(!text.contains("CPU Usage Over Time"));
    }

    #[test]
    fn test_chart_area_only_on_historical() {
        let mut app = app();
        draw_to_string(&mut app, 100, 24);
        assert!(app.chart_area.is_none());

        app.set_view(View::Historical);
        draw_to_string(&mut app, 100, 24);
        assert!(app.chart_area.is_some());
    }

    #[test]
    fn test_terminal_too_small() {
        let mut app = app();
        let text = draw_to_string(&mut app, 40, 10);
        assert!(text.contains("Terminal too small"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = app();
        app.toggle_help();
        let text = draw_to_string(&mut app, 100, 30);
        assert!(text.contains("Keyboard Shortcuts"));
    }
}
