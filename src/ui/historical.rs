//! Historical view rendering.
//!
//! Plots the CPU series of the last tick as a line chart with a dotted grid,
//! a legend and a tooltip for the point under the cursor.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Clear, Dataset, GraphType, LegendPosition, Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::data::ChartPoint;

/// Number of horizontal grid lines (including the bounds).
const GRID_LINES: usize = 5;

/// Dots per grid line.
const GRID_RESOLUTION: usize = 60;

/// Render the Historical view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    app.chart_area = Some(area);

    let block = Block::default()
        .title(" CPU Usage Over Time ")
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.chart.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::styled("No data", Style::default().add_modifier(Modifier::DIM)),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let points: Vec<(f64, f64)> = app.chart.iter().map(|p| (p.timestamp, p.value)).collect();
    let (x_bounds, y_bounds) = chart_bounds(&app.chart);
    let grid = grid_points(x_bounds, y_bounds);
    let hovered: Vec<(f64, f64)> = app
        .hovered_point()
        .map(|p| vec![(p.timestamp, p.value)])
        .unwrap_or_default();

    let mut datasets = vec![
        // Unnamed datasets stay out of the legend
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(app.theme.grid))
            .data(&grid),
        Dataset::default()
            .name("value")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.series))
            .data(&points),
    ];
    if !hovered.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(app.theme.highlight))
                .data(&hovered),
        );
    }

    let x_labels: Vec<Span> = time_labels(&app.chart).into_iter().map(Span::raw).collect();
    let y_labels: Vec<Span> = value_labels(y_bounds).into_iter().map(Span::raw).collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([x_bounds.0, x_bounds.1])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([y_bounds.0, y_bounds.1])
                .labels(y_labels),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Min(0), Constraint::Min(0)));

    frame.render_widget(chart, area);

    if let Some(point) = app.hovered_point() {
        render_tooltip(frame, app, point, area);
    }
}

/// Small box with the time and value of the hovered point.
fn render_tooltip(frame: &mut Frame, app: &App, point: &ChartPoint, area: Rect) {
    let lines = tooltip_lines(point);
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 4;
    let height = lines.len() as u16 + 2;

    if area.width < width + 10 || area.height < height + 2 {
        return;
    }

    // Top-left corner of the plot, clear of the legend
    let tooltip_area = Rect::new(area.x + 9, area.y + 1, width, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));
    let paragraph = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
        .block(block);

    frame.render_widget(Clear, tooltip_area);
    frame.render_widget(paragraph, tooltip_area);
}

/// Tooltip text for a point.
pub fn tooltip_lines(point: &ChartPoint) -> Vec<String> {
    vec![point.time.clone(), format!("value : {:.2}", point.value)]
}

/// Axis bounds `((x_min, x_max), (y_min, y_max))` for a non-empty chart.
///
/// Degenerate ranges are widened so the chart always has some extent.
/// Non-finite values are ignored for the y-axis.
pub fn chart_bounds(chart: &[ChartPoint]) -> ((f64, f64), (f64, f64)) {
    let x_min = chart.first().map(|p| p.timestamp).unwrap_or(0.0);
    let x_max = chart.last().map(|p| p.timestamp).unwrap_or(0.0);
    let x_bounds = if x_max > x_min {
        (x_min, x_max)
    } else {
        (x_min - 1.0, x_min + 1.0)
    };

    let finite = chart.iter().map(|p| p.value).filter(|v| v.is_finite());
    let (y_min, y_max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let y_bounds = if !y_min.is_finite() {
        (0.0, 1.0)
    } else if y_max > y_min {
        let pad = (y_max - y_min) * 0.1;
        (y_min - pad, y_max + pad)
    } else {
        (y_min - 1.0, y_max + 1.0)
    };

    (x_bounds, y_bounds)
}

/// Dotted horizontal grid lines spanning the bounds.
pub fn grid_points(x_bounds: (f64, f64), y_bounds: (f64, f64)) -> Vec<(f64, f64)> {
    let dx = (x_bounds.1 - x_bounds.0) / (GRID_RESOLUTION - 1) as f64;
    let dy = (y_bounds.1 - y_bounds.0) / (GRID_LINES - 1) as f64;

    (0..GRID_LINES)
        .flat_map(|row| {
            let y = y_bounds.0 + dy * row as f64;
            (0..GRID_RESOLUTION).map(move |col| (x_bounds.0 + dx * col as f64, y))
        })
        .collect()
}

/// X-axis labels: first, middle and last formatted time.
///
/// A lone point sits in the middle of the axis, so its label does too.
pub fn time_labels(chart: &[ChartPoint]) -> Vec<String> {
    match chart.len() {
        0 => Vec::new(),
        1 => vec![String::new(), chart[0].time.clone(), String::new()],
        2 => vec![chart[0].time.clone(), chart[1].time.clone()],
        n => vec![
            chart[0].time.clone(),
            chart[n / 2].time.clone(),
            chart[n - 1].time.clone(),
        ],
    }
}

/// Y-axis labels: lower bound, midpoint and upper bound.
pub fn value_labels(y_bounds: (f64, f64)) -> Vec<String> {
    let mid = (y_bounds.0 + y_bounds.1) / 2.0;
    vec![
        format!("{:.1}", y_bounds.0),
        format!("{:.1}", mid),
        format!("{:.1}", y_bounds.1),
    ]
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::app::testing::{update, ScriptedSource};
    use crate::ui::testing::buffer_text;
    use crate::ui::Theme;

    fn point(timestamp: f64, value: f64) -> ChartPoint {
        ChartPoint {
            time: format!("t{}", timestamp),
            timestamp,
            value,
        }
    }

    fn app_with_chart(len: usize) -> App {
        let source = ScriptedSource {
            updates: vec![update(1.0, 2.0, 3.0, len)].into(),
            ..Default::default()
        };
        let mut app = App::new(Box::new(source), Theme::dark(), Duration::from_secs(30));
        app.reload_data().unwrap();
        app
    }

    fn render_historical(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| render(frame, app, frame.area())).unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_bounds() {
        let chart = vec![point(100.0, 10.0), point(200.0, 30.0)];
        let (x, y) = chart_bounds(&chart);
        assert_eq!(x, (100.0, 200.0));
        assert_eq!(y, (8.0, 32.0));
    }

    #[test]
    fn test_bounds_single_point() {
        let (x, y) = chart_bounds(&[point(100.0, 5.0)]);
        assert_eq!(x, (99.0, 101.0));
        assert_eq!(y, (4.0, 6.0));
    }

    #[test]
    fn test_bounds_ignore_non_finite() {
        let chart = vec![point(1.0, f64::NAN), point(2.0, 4.0), point(3.0, f64::INFINITY)];
        let (_, y) = chart_bounds(&chart);
        assert_eq!(y, (3.0, 5.0));

        let (_, y) = chart_bounds(&[point(1.0, f64::NAN)]);
        assert_eq!(y, (0.0, 1.0));
    }

    #[test]
    fn test_grid_spans_bounds() {
        let grid = grid_points((0.0, 10.0), (0.0, 4.0));
        assert_eq!(grid.len(), GRID_LINES * GRID_RESOLUTION);
        assert_eq!(grid.first(), Some(&(0.0, 0.0)));
        let last = grid.last().unwrap();
        assert!((last.0 - 10.0).abs() < 1e-9);
        assert!((last.1 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_labels() {
        let chart: Vec<ChartPoint> = (0..5).map(|i| point(i as f64, 0.0)).collect();
        assert_eq!(time_labels(&chart), vec!["t0", "t2", "t4"]);
        assert_eq!(time_labels(&chart[..1]), vec!["", "t0", ""]);
        assert!(time_labels(&[]).is_empty());
    }

    #[test]
    fn test_value_labels() {
        assert_eq!(value_labels((0.0, 10.0)), vec!["0.0", "5.0", "10.0"]);
    }

    #[test]
    fn test_tooltip_lines() {
        let lines = tooltip_lines(&point(1.0, 12.3456));
        assert_eq!(lines, vec!["t1".to_string(), "value : 12.35".to_string()]);
    }

    #[test]
    fn test_render_chart_with_legend() {
        let mut app = app_with_chart(10);
        let text = render_historical(&mut app);

        assert!(text.contains("CPU Usage Over Time"));
        assert!(text.contains("value"));
        assert!(text.contains("10:00:00"));
        assert!(text.contains("10:00:09"));
        assert_eq!(app.chart_area, Some(Rect::new(0, 0, 80, 20)));
    }

    #[test]
    fn test_render_empty_chart() {
        let mut app = app_with_chart(0);
        let text = render_historical(&mut app);
        assert!(text.contains("No data"));
    }

    #[test]
    fn test_render_tooltip() {
        let mut app = app_with_chart(10);
        app.hover = Some(3);
        let text = render_historical(&mut app);

        assert!(text.contains("10:00:03"));
        assert!(text.contains("value : 3.00"));
    }
}
