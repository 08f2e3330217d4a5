//! Query editor overlay.
//!
//! Shown while a node is being edited: the three level presets with their
//! membership markers, the manual event input, and the node's current events.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::Preset;

/// Render the query editor for the node being edited.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(node) = app.editing_node() else {
        return;
    };
    let monitor = &node.event_monitor;
    let theme = &app.theme;
    let dim = Style::default().add_modifier(Modifier::DIM);

    let events = monitor.events_by_urgency();
    let height = 12 + events.len().clamp(1, 8) as u16;
    let overlay_area = super::centered(area, 64, height);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(format!(" Event Query: {} ", node.id))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(2), // Current label
        Constraint::Length(4), // Presets
        Constraint::Length(2), // Manual input
        Constraint::Min(1),    // Events
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    let label = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(monitor.query_label(), Style::default().fg(theme.info)),
    ]));
    frame.render_widget(label, chunks[0]);

    let presets: Vec<Line> = Preset::ALL
        .iter()
        .enumerate()
        .map(|(i, preset)| {
            let active = monitor.query().contains(*preset);
            let marker = if active { "[x]" } else { "[ ]" };
            let style = if active {
                theme.severity_style(preset.level().into())
            } else {
                dim
            };
            Line::from(vec![
                Span::raw(format!(" F{} ", i + 1)),
                Span::styled(marker, style),
                Span::raw(" "),
                Span::styled(preset.option_label(), style),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(presets), chunks[1]);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(" Manual event: "),
        Span::styled(
            format!("{}_", app.state.editor.manual_code()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(input, chunks[2]);

    let event_lines: Vec<Line> = if events.is_empty() {
        vec![Line::from(Span::styled(" No events", dim))]
    } else {
        events
            .iter()
            .map(|e| {
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(format!(" {} ", e.level), theme.level_badge(e.level)),
                    Span::raw(format!(" {} ", e.code)),
                    Span::styled(e.timestamp.as_str(), dim),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(event_lines), chunks[3]);

    let footer = Paragraph::new(Line::from(Span::styled(
        " F1/F2/F3:toggle  Enter:create  Ctrl-D:clear all  Esc:close",
        dim,
    )));
    frame.render_widget(footer, chunks[4]);
}
