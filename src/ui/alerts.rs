//! Alerts view rendering.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// Placeholder shown when no alert is active.
pub const NO_ALERTS: &str = "No active alerts";

/// Height of one alert box (border + title line + description).
const ALERT_HEIGHT: u16 = 4;

/// Render the Alerts view: one box per alert, in order.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" System Alerts ")
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.snapshot.alerts.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::styled(NO_ALERTS, Style::default().add_modifier(Modifier::DIM)),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    }

    let visible = (inner.height / ALERT_HEIGHT).max(1) as usize;
    let alerts = &app.snapshot.alerts;
    let shown = alerts.len().min(visible);

    let mut constraints = vec![Constraint::Length(ALERT_HEIGHT); shown];
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(inner);

    for (alert, row) in alerts.iter().zip(rows.iter()).take(shown) {
        let alert_block = Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(app.theme.alert_style());
        let paragraph = Paragraph::new(alert_lines(alert, app.theme.alert_style()))
            .wrap(Wrap { trim: true })
            .block(alert_block);
        frame.render_widget(paragraph, *row);
    }

    if shown < alerts.len() {
        let more = Paragraph::new(format!("… {} more", alerts.len() - shown))
            .style(Style::default().add_modifier(Modifier::DIM));
        let last = rows[rows.len() - 1];
        if last.height > 0 {
            frame.render_widget(more, last);
        }
    }
}

/// Content of a single alert box.
pub fn alert_lines(alert: &str, title_style: Style) -> Vec<Line<'static>> {
    vec![
        Line::styled("⚠ Alert Detected", title_style),
        Line::from(alert.to_string()),
    ]
}
