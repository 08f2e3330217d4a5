//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::config::ThemeChoice;
use crate::data::{EventLevel, Severity};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for WARNING severity and soft thresholds (capacity, latency).
    pub warning: Color,
    /// Color for CRITICAL/ERROR severity, locks and failed sanity.
    pub critical: Color,
    /// Color for INFO/NONE severity and healthy values.
    pub healthy: Color,
    /// Color for INFO event badges and version strings.
    pub info: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
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
            healthy: Color::Green,
            info: Color::LightBlue,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
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
            healthy: Color::Green,
            info: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
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

    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Indicator style for a node's highest severity: red, amber or green.
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Critical => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            Severity::Error => Style::default().fg(self.critical),
            Severity::Warning => Style::default().fg(self.warning),
            Severity::Info | Severity::None => Style::default().fg(self.healthy),
        }
    }

    /// Badge style for an event level.
    pub fn level_badge(&self, level: EventLevel) -> Style {
        let style = match level {
            EventLevel::Critical => Style::default()
                .fg(Color::White)
                .bg(self.critical)
                .add_modifier(Modifier::SLOW_BLINK),
            EventLevel::Error => Style::default().fg(Color::Black).bg(Color::LightRed),
            EventLevel::Warning => Style::default().fg(Color::Black).bg(self.warning),
            EventLevel::Info => Style::default().fg(Color::White).bg(self.info),
        };
        style.add_modifier(Modifier::BOLD)
    }

    /// Amber when `alert` holds, plain otherwise.
    pub fn threshold_style(&self, alert: bool) -> Style {
        if alert {
            Style::default().fg(self.warning)
        } else {
            Style::default().fg(self.healthy)
        }
    }
}
