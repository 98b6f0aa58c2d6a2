//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;
use serde::Deserialize;

/// Theme selection from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for cards whose query failed.
    pub warning: Color,
    /// Color for alert boxes.
    pub critical: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Color of the CPU line in the historical chart.
    pub series: Color,
    /// Color of the chart grid.
    pub grid: Color,
    /// Style for titles and headings.
    pub header: Style,
    /// Style for the large metric values on the cards.
    pub value: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::Gray,
            series: Color::Rgb(0x88, 0x84, 0xd8),
            grid: Color::DarkGray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            value: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::DarkGray,
            series: Color::Rgb(0x55, 0x50, 0xb0),
            grid: Color::Gray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            value: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a configured theme choice.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Border style for a summary card.
    pub fn card_border(&self, failed: bool) -> Style {
        if failed {
            Style::default().fg(self.warning)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Border and title style for an alert box.
    pub fn alert_style(&self) -> Style {
        Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_border() {
        let theme = Theme::dark();
        assert_eq!(theme.card_border(true).fg, Some(Color::Yellow));
        assert_eq!(theme.card_border(false).fg, Some(Color::Gray));
    }

    #[test]
    fn test_from_explicit_choice() {
        assert_eq!(Theme::from_choice(ThemeChoice::Light).highlight, Color::Blue);
        assert_eq!(Theme::from_choice(ThemeChoice::Dark).highlight, Color::Cyan);
    }
}
