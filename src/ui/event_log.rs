//! Events view rendering.
//!
//! Every event of the visible nodes in one table, most urgent first.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;

/// Render the Events view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let events = app.fleet_events();

    let position_info = if events.is_empty() {
        String::new()
    } else {
        let selected = app.selected_event_index.min(events.len() - 1);
        format!(" [{}/{}]", selected + 1, events.len())
    };
    let filter_info = if app.filter_text.is_empty() {
        String::new()
    } else {
        format!(" /{}/", app.filter_text)
    };

    let block = Block::default()
        .title(format!(" Events ({}){}{} ", events.len(), filter_info, position_info))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if events.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  ✓ No events reported",
                Style::default().fg(app.theme.healthy).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Toggle a query preset from the Fleet view to start monitoring",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Level"),
        Cell::from("System"),
        Cell::from("Time"),
        Cell::from("Code"),
        Cell::from("Description"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = events
        .iter()
        .map(|(node, event)| {
            Row::new(vec![
                Cell::from(format!(" {} ", event.level)).style(app.theme.level_badge(event.level)),
                Cell::from(node.id.as_str()),
                Cell::from(event.timestamp.as_str()),
                Cell::from(event.code.as_str())
                    .style(app.theme.severity_style(event.level.into())),
                Cell::from(event.description.as_str()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10), // Level
        Constraint::Length(10), // System
        Constraint::Length(19), // Time
        Constraint::Fill(1),    // Code
        Constraint::Fill(3),    // Description
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_event_index.min(events.len() - 1)));

    frame.render_stateful_widget(table, area, &mut state);
}
