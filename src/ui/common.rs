//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::dashboard::QueryKind;

/// Tab titles, in [`View::ALL`] order.
pub const TAB_TITLES: [&str; 3] = ["1:Overview", "2:Historical", "3:Alerts"];

/// Format a percentage with two decimals, e.g. `42.1234` -> `"42.12%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Render the header bar with the current readings.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" PROMDASH ", Style::default().add_modifier(Modifier::BOLD));

    if app.last_updated.is_none() {
        let line = Line::from(vec![title, Span::raw("| Loading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let reading = |label: &'static str, kind: QueryKind, value: f64| -> Vec<Span<'static>> {
        let style = if app.failed.contains(&kind) {
            Style::default().fg(app.theme.warning)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        vec![Span::raw(label), Span::styled(format_percent(value), style)]
    };

    let mut spans = vec![title, Span::raw("│ ")];
    spans.extend(reading("CPU ", QueryKind::Cpu, app.snapshot.cpu_percent));
    spans.push(Span::raw(" │ "));
    spans.extend(reading("MEM ", QueryKind::Memory, app.snapshot.memory_percent));
    spans.push(Span::raw(" │ "));
    spans.extend(reading("DISK ", QueryKind::Disk, app.snapshot.disk_percent));
    spans.push(Span::raw(" │ "));
    if app.snapshot.alerts.is_empty() {
        spans.push(Span::styled("0 alerts", Style::default().add_modifier(Modifier::DIM)));
    } else {
        spans.push(Span::styled(
            format!("{} alerts", app.snapshot.alerts.len()),
            app.theme.alert_style(),
        ));
    }
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        app.source_description().to_string(),
        Style::default().add_modifier(Modifier::DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TAB_TITLES.iter().map(|t| Line::from(*t)).collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Map a column of the tab bar to the tab drawn there.
///
/// Mirrors the layout of [`Tabs`]: one space of padding on each side of a
/// title, a one-column divider between titles.
pub fn tab_at_column(column: u16) -> Option<View> {
    let mut start = 0u16;
    for (title, view) in TAB_TITLES.iter().zip(View::ALL) {
        let end = start + title.len() as u16 + 2;
        if column < end {
            return Some(view);
        }
        start = end + 1;
        if column < start {
            // On the divider
            return None;
        }
    }
    None
}

/// Render the status bar at the bottom.
///
/// Shows: time since last update, time to next refresh, failed queries,
/// available controls. Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit", err)
    } else if let Some(updated) = app.last_updated {
        let next = app
            .next_refresh_in()
            .map(|d| format!("next in {}s", d.as_secs()))
            .unwrap_or_default();

        let failed = if app.failed.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = app.failed.iter().map(QueryKind::label).collect();
            format!(" | failed: {}", names.join(", "))
        };

        let controls = match app.current_view {
            View::Historical => "[/]:inspect Tab:switch r:refresh ?:help q:quit",
            _ => "Tab:switch r:refresh e:export ?:help q:quit",
        };

        format!(
            " {} | Updated {:.1}s ago, {}{} | {}",
            app.current_view.label(),
            updated.elapsed().as_secs_f64(),
            next,
            failed,
            controls,
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  Tab         Next view"),
        Line::from("  1/2/3       Overview/Historical/Alerts"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Historical",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  [ / ]       Inspect previous/next point"),
        Line::from("  mouse       Hover to inspect a point"),
        Line::from("  Esc         Clear inspection"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Refresh now"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
