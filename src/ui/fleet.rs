//! Fleet view rendering.
//!
//! One row per node: identity, telemetry summary, the active event query with
//! its headline event, and the node's highest severity.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{IoMetrics, Node, SanityStatus};
use crate::ui::Theme;

/// Render the Fleet view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let nodes = app.visible_nodes();

    let block = Block::default()
        .title(title(app, nodes.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if nodes.is_empty() {
        let message = if app.fleet().is_empty() {
            "  No systems in the fleet"
        } else {
            "  No systems match the filter"
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().add_modifier(Modifier::DIM))),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("System"),
        Cell::from("Version"),
        Cell::from("Encryption"),
        Cell::from("Owner"),
        Cell::from("Capacity"),
        Cell::from("I/O"),
        Cell::from("Event Query"),
        Cell::from("RMR"),
        Cell::from("Upgrade"),
        Cell::from("Sanity"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = nodes.iter().map(|node| node_row(app, node)).collect();

    let widths = [
        Constraint::Min(11),   // System
        Constraint::Fill(1),   // Version
        Constraint::Length(10), // Encryption
        Constraint::Fill(2),   // Owner
        Constraint::Fill(1),   // Capacity
        Constraint::Fill(2),   // I/O
        Constraint::Fill(3),   // Event Query
        Constraint::Fill(1),   // RMR
        Constraint::Fill(1),   // Upgrade
        Constraint::Min(10),   // Sanity
    ];

    let selected = app.selected_node_index.min(nodes.len().saturating_sub(1));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn title(app: &App, shown: usize) -> String {
    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let position_info = if shown > 0 {
        format!(" [{}/{}]", app.selected_node_index.min(shown - 1) + 1, shown)
    } else {
        String::new()
    };

    format!(
        " Systems ({}/{}){}{} ",
        shown,
        app.fleet().len(),
        filter_info,
        position_info
    )
}

fn node_row<'a>(app: &App, node: &'a Node) -> Row<'a> {
    let t = &node.telemetry;
    let theme = &app.theme;
    let monitor = &node.event_monitor;

    let system = Line::from(vec![
        Span::styled("● ", theme.severity_style(monitor.highest_severity())),
        Span::styled(node.id.as_str(), Style::default().add_modifier(Modifier::BOLD)),
    ]);

    let lock = if node.is_locked() {
        Span::styled(
            format!("LOCKED: {}", t.supervisor.locking_reason),
            Style::default().fg(theme.critical),
        )
    } else {
        Span::styled("Available", Style::default().fg(theme.healthy))
    };
    let owner = Line::from(vec![Span::raw(format!("{} ", t.supervisor.email)), lock]);

    let capacity = Cell::from(format!("{:.1}% {}", t.capacity.percentage, t.capacity.used))
        .style(theme.threshold_style(t.capacity.is_high()));

    let io = Cell::from(io_line(&t.io, theme));

    let mut query = vec![Span::styled(
        monitor.query_label(),
        Style::default().fg(theme.info),
    )];
    if let Some(event) = monitor.headline_event() {
        query.push(Span::raw(" "));
        query.push(Span::styled(event.code.as_str(), theme.severity_style(event.level.into())));
    }

    let rmr = format!("{} / {}", t.rmr.async_link.status, t.rmr.sync_aa.status);

    let sanity_style = match t.sanity.status {
        SanityStatus::Failed => Style::default().fg(theme.critical).add_modifier(Modifier::BOLD),
        SanityStatus::Warning | SanityStatus::CantRead => Style::default().fg(theme.warning),
        SanityStatus::Success => Style::default().fg(theme.healthy),
    };

    Row::new(vec![
        Cell::from(system),
        Cell::from(t.version.as_str()),
        Cell::from(t.encryption.display()),
        Cell::from(owner),
        capacity,
        io,
        Cell::from(Line::from(query)),
        Cell::from(rmr),
        Cell::from(t.upgrade.path.as_str()),
        Cell::from(t.sanity.status.as_str()).style(sanity_style),
    ])
}

/// One span per protocol, amber when that protocol's latency is high.
fn io_line(io: &[IoMetrics], theme: &Theme) -> Line<'static> {
    if io.is_empty() {
        return Line::from("-");
    }
    let mut spans = Vec::with_capacity(io.len() * 2);
    for (i, metrics) in io.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            io_entry(metrics),
            theme.threshold_style(metrics.is_slow()),
        ));
    }
    Line::from(spans)
}

fn io_entry(metrics: &IoMetrics) -> String {
    let protocol = metrics.protocol.as_str();
    match metrics.latency_ms() {
        Some(ms) => format!("{} {} {:.1}ms", protocol, format_count(metrics.iops), ms),
        None => format!("{} {}", protocol, format_count(metrics.iops)),
    }
}

/// Format large numbers with K/M suffixes
fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
