//! Overview rendering.
//!
//! Three summary cards, one per query, each showing its latest percentage.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::common::format_percent;
use crate::app::App;
use crate::dashboard::QueryKind;

/// Card title and caption for a query.
fn card_text(kind: QueryKind) -> (&'static str, &'static str) {
    match kind {
        QueryKind::Cpu => ("CPU Usage", "Current CPU Utilization"),
        QueryKind::Memory => ("Memory Available", "Memory Usage"),
        QueryKind::Disk => ("Disk Space", "Disk Usage"),
    }
}

/// Render the Overview: CPU, memory and disk cards side by side.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    let values = [
        app.snapshot.cpu_percent,
        app.snapshot.memory_percent,
        app.snapshot.disk_percent,
    ];

    for ((kind, value), column) in QueryKind::ALL.into_iter().zip(values).zip(columns.iter()) {
        render_card(frame, app, kind, value, *column);
    }
}

fn render_card(frame: &mut Frame, app: &App, kind: QueryKind, value: f64, area: Rect) {
    let (title, caption) = card_text(kind);
    let failed = app.failed.contains(&kind);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.card_border(failed));

    let mut lines = vec![
        Line::from(""),
        Line::styled(format_percent(value), app.theme.value),
        Line::styled(caption, Style::default().add_modifier(Modifier::DIM)),
    ];
    if failed {
        lines.push(Line::from(""));
        lines.push(Line::styled("no data", Style::default().fg(app.theme.warning)));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::app::testing::{update, ScriptedSource};
    use crate::ui::testing::buffer_text;
    use crate::ui::Theme;

    fn render_overview(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 10)).unwrap();
        terminal.draw(|frame| render(frame, app, frame.area())).unwrap();
        buffer_text(&terminal)
    }

    fn app_with(update: crate::dashboard::DashboardUpdate) -> App {
        let source = ScriptedSource {
            updates: vec![update].into(),
            ..Default::default()
        };
        let mut app = App::new(Box::new(source), Theme::dark(), Duration::from_secs(30));
        app.reload_data().unwrap();
        app
    }

    #[test]
    fn test_cards_show_two_decimals() {
        let mut app = app_with(update(42.1234, 63.456, 7.0, 0));
        let text = render_overview(&mut app);

        assert!(text.contains("42.12%"));
        assert!(text.contains("63.46%"));
        assert!(text.contains("7.00%"));
        assert!(text.contains("CPU Usage"));
        assert!(text.contains("Memory Available"));
        assert!(text.contains("Disk Space"));
    }

    #[test]
    fn test_failed_query_shows_zero() {
        let mut failed = update(0.0, 55.5, 12.25, 0);
        failed.failed = vec![QueryKind::Cpu];
        let mut app = app_with(failed);
        let text = render_overview(&mut app);

        assert!(text.contains("0.00%"));
        assert!(text.contains("55.50%"));
        assert!(text.contains("12.25%"));
        assert_eq!(text.matches("no data").count(), 1);
    }

    #[test]
    fn test_default_state_all_zero() {
        let mut app = App::new(
            Box::new(ScriptedSource::default()),
            Theme::dark(),
            Duration::from_secs(30),
        );
        let text = render_overview(&mut app);
        assert_eq!(text.matches("0.00%").count(), 3);
    }
}
