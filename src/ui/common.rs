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
use crate::data::Severity;

use super::centered;

/// Render the header bar with the fleet overview.
///
/// Displays: overall indicator, node counts per severity, systems online and
/// locked systems.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    if app.last_loaded.is_none() {
        let line = Line::from(vec![
            Span::styled(" IBOX OVERVIEW ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let fleet = app.fleet();
    let overall = fleet.highest_severity();

    let mut spans = vec![
        Span::styled(" ● ", app.theme.severity_style(overall)),
        Span::styled("IBOX OVERVIEW ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
    ];

    for severity in Severity::ALL {
        let count = fleet.count_with(severity);
        let label = match severity {
            Severity::Critical => "crit",
            Severity::Error => "err",
            Severity::Warning => "warn",
            Severity::Info => "info",
            Severity::None => "ok",
        };
        if count > 0 {
            spans.push(Span::styled(count.to_string(), app.theme.severity_style(severity)));
        } else {
            spans.push(Span::styled("0", Style::default().add_modifier(Modifier::DIM)));
        }
        spans.push(Span::raw(format!(" {} ", label)));
    }

    spans.push(Span::raw("│ Systems Online: "));
    spans.push(Span::styled(
        fleet.len().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(" │ Locked: "));
    spans.push(Span::raw(fleet.locked_count().to_string()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Fleet "), Line::from(" 2:Events ")];

    let selected = match app.current_view {
        View::Fleet => 0,
        View::Events => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the source, time since last load and the available controls, or a
/// temporary status message / load error when there is one.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.load_error {
        let paragraph = Paragraph::new(format!(" Error: {} | r:retry q:quit", err))
            .style(Style::default().fg(app.theme.critical));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(loaded) = app.last_loaded {
        let controls = if app.editor_open() {
            "F1-F3:presets Enter:create ^D:clear Esc:close"
        } else if app.filter_active {
            "Type to search | Enter:apply Esc:cancel"
        } else {
            match app.current_view {
                View::Fleet => "/:search Enter:query d:detail s:sanity Tab:switch ?:help q:quit",
                View::Events => "/:search Enter:detail Tab:switch ?:help q:quit",
            }
        };

        format!(
            " {} | {} | Loaded {:.0}s ago | {}",
            app.current_view.label(),
            app.source_description(),
            loaded.elapsed().as_secs_f64(),
            controls,
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  Tab 1/2     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Fleet"),
        Line::from("  Enter       Edit event query"),
        Line::from("  d           Node detail"),
        Line::from("  s           Run sanity"),
        Line::from("  /  c        Filter by id / clear"),
        Line::from(""),
        section(" Query editor"),
        Line::from("  F1/F2/F3    Toggle CRITICAL/ERROR/WARNING"),
        Line::from("  Alt+1/2/3   Same, where F-keys are taken"),
        Line::from("  type+Enter  Create manual event"),
        Line::from("  Ctrl-D      Clear all events"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Reload fleet (drops edits)"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
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

    let height = help_text.len() as u16 + 2;
    let help_area = centered(area, 46u16.min(area.width.saturating_sub(4)), height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}
