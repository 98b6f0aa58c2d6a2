//! Keyboard and mouse handling.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::ui::common::tab_at_column;
use crate::ui::TAB_ROW;

/// File written by the export key.
pub const EXPORT_FILE: &str = "dashboard_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Historical),
        KeyCode::Char('3') => app.set_view(View::Alerts),

        // Chart inspection
        KeyCode::Char('[') if app.current_view == View::Historical => app.hover_prev(),
        KeyCode::Char(']') if app.current_view == View::Historical => app.hover_next(),
        KeyCode::Esc => app.clear_hover(),

        // Refresh
        KeyCode::Char('r') => app.request_refresh(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    tracing::info!(path = %export_path.display(), "exported dashboard state");
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "export failed");
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Click on the tab bar selects a view
        MouseEventKind::Down(MouseButton::Left) if mouse.row == TAB_ROW => {
            if let Some(view) = tab_at_column(mouse.column) {
                app.set_view(view);
            }
        }

        // Hovering over the chart moves the cursor
        MouseEventKind::Moved | MouseEventKind::Down(MouseButton::Left)
            if app.current_view == View::Historical =>
        {
            app.set_hover_from_column(mouse.column, mouse.row);
        }

        // Wheel steps through points
        MouseEventKind::ScrollUp if app.current_view == View::Historical => app.hover_prev(),
        MouseEventKind::ScrollDown if app.current_view == View::Historical => app.hover_next(),

        MouseEventKind::Down(MouseButton::Right) => app.clear_hover(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;
    use ratatui::layout::Rect;

    use super::*;
    use crate::app::testing::{update, ScriptedSource};
    use crate::ui::Theme;

    fn app() -> App {
        let source = ScriptedSource {
            updates: vec![update(1.0, 2.0, 3.0, 5)].into(),
            ..Default::default()
        };
        let mut app = App::new(Box::new(source), Theme::dark(), Duration::from_secs(30));
        app.reload_data().unwrap();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_number_keys_select_view() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.current_view, View::Historical);
        handle_key_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.current_view, View::Alerts);
        handle_key_event(&mut app, key(KeyCode::Char('1')));
        assert_eq!(app.current_view, View::Overview);
    }

    #[test]
    fn test_tab_cycles_views() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_view, View::Historical);
        handle_key_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.current_view, View::Overview);
        handle_key_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.current_view, View::Alerts);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_bracket_keys_only_on_historical() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char(']')));
        assert_eq!(app.hover, None);

        app.set_view(View::Historical);
        handle_key_event(&mut app, key(KeyCode::Char('[')));
        assert_eq!(app.hover, Some(4));
        handle_key_event(&mut app, key(KeyCode::Char('[')));
        assert_eq!(app.hover, Some(3));
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.hover, None);
    }

    #[test]
    fn test_refresh_key() {
        let mut app = app();
        let press = KeyEvent::new_with_kind(KeyCode::Char('r'), KeyModifiers::NONE, KeyEventKind::Press);
        handle_key_event(&mut app, press);
        assert_eq!(app.get_status_message(), Some("Refreshing..."));
    }

    #[test]
    fn test_click_on_tab_bar() {
        let mut app = app();
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 15, TAB_ROW));
        assert_eq!(app.current_view, View::Historical);
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 30, TAB_ROW));
        assert_eq!(app.current_view, View::Alerts);
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 2, TAB_ROW));
        assert_eq!(app.current_view, View::Overview);
    }

    #[test]
    fn test_mouse_hover_on_chart() {
        let mut app = app();
        app.set_view(View::Historical);
        app.chart_area = Some(Rect::new(0, 2, 42, 10));

        handle_mouse_event(&mut app, mouse(MouseEventKind::Moved, 1, 5));
        assert_eq!(app.hover, Some(0));
        handle_mouse_event(&mut app, mouse(MouseEventKind::Moved, 40, 5));
        assert_eq!(app.hover, Some(4));
        handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollUp, 0, 0));
        assert_eq!(app.hover, Some(3));
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Right), 0, 0));
        assert_eq!(app.hover, None);
    }

    #[test]
    fn test_mouse_hover_ignored_elsewhere() {
        let mut app = app();
        app.chart_area = Some(Rect::new(0, 2, 42, 10));
        handle_mouse_event(&mut app, mouse(MouseEventKind::Moved, 10, 5));
        assert_eq!(app.hover, None);
    }
}
