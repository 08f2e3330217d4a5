//! Detail overlay rendering.
//!
//! Displays a modal overlay with the full telemetry and event list of one node.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::{Node, ServiceStatus};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 60;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 20;

/// 95% of the width clamped to [MIN_OVERLAY_WIDTH, 110], 90% of the height
/// clamped to [MIN_OVERLAY_HEIGHT, 50].
fn overlay_size(area: Rect) -> (u16, u16) {
    let width = (u32::from(area.width) * 95 / 100) as u16;
    let height = (u32::from(area.height) * 90 / 100) as u16;
    (
        width.clamp(MIN_OVERLAY_WIDTH, 110),
        height.clamp(MIN_OVERLAY_HEIGHT, 50),
    )
}

/// Render the node detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(node) = app.detail_node() else {
        return;
    };

    let (overlay_width, overlay_height) = overlay_size(area);
    let overlay_area = super::centered(area, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(5), // Identity
        Constraint::Min(8),    // Telemetry
        Constraint::Min(5),    // Events
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    render_identity(frame, app, node, chunks[0]);
    render_telemetry(frame, app, node, chunks[1]);
    render_events(frame, app, node, chunks[2]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[3]);
}

fn render_identity(frame: &mut Frame, app: &App, node: &Node, area: Rect) {
    let t = &node.telemetry;
    let severity = node.event_monitor.highest_severity();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", node.id), bold),
            Span::styled(format!("● {}", severity), app.theme.severity_style(severity)),
        ]),
        Line::from(vec![
            Span::raw(" Version: "),
            Span::styled(t.version.as_str(), Style::default().fg(app.theme.info)),
            Span::raw("    SA Utils: "),
            Span::raw(t.sa_utils_version.as_str()),
            Span::raw("    Encryption: "),
            Span::styled(t.encryption.display(), bold),
        ]),
        Line::from(vec![
            Span::raw(" Query: "),
            Span::styled(node.event_monitor.query_label(), Style::default().fg(app.theme.info)),
        ]),
    ];

    let block = Block::default()
        .title(" System Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_telemetry(frame: &mut Frame, app: &App, node: &Node, area: Rect) {
    let t = &node.telemetry;
    let theme = &app.theme;
    let dim = Style::default().add_modifier(Modifier::DIM);

    let halves = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // ----- Left: ownership, capacity, services, sanity -----
    let lock = if node.is_locked() {
        Line::from(vec![
            Span::raw(" Locked by: "),
            Span::styled(t.supervisor.locking_email.as_str(), Style::default().fg(theme.critical)),
            Span::styled(format!(" ({})", t.supervisor.locking_reason), dim),
        ])
    } else {
        Line::from(vec![Span::raw(" Locked by: "), Span::styled("-", dim)])
    };

    let service_style = match t.services.status {
        ServiceStatus::Active => Style::default().fg(theme.healthy),
        ServiceStatus::Warning => Style::default().fg(theme.warning),
        ServiceStatus::Error => Style::default().fg(theme.critical),
    };

    let sanity_style = if node.sanity_failed() {
        Style::default().fg(theme.critical).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut left = vec![
        Line::from(format!(" Owner: {}  TL: {}", t.supervisor.email, t.supervisor.tl)),
        lock,
        Line::from(vec![
            Span::raw(" Capacity: "),
            Span::styled(
                format!("{:.1}%", t.capacity.percentage),
                theme.threshold_style(t.capacity.is_high()),
            ),
            Span::raw(format!(" ({})", t.capacity.used)),
        ]),
        Line::from(vec![
            Span::raw(" Services: "),
            Span::styled(format!("{:?}", t.services.status), service_style),
            Span::styled(format!(" {}", t.services.message), dim),
        ]),
        Line::from(format!(" Network: ETH {}  FC {}", t.networking.eth, t.networking.fc)),
        Line::from(vec![
            Span::raw(" Sanity: "),
            Span::styled(t.sanity.status.as_str(), sanity_style),
            Span::raw(format!(" ({})", t.sanity.last_run())),
        ]),
    ];
    if let Some(hw) = t.sanity.hw_status.as_deref() {
        left.push(Line::from(format!(" HW: {}", hw)));
    }
    left.push(Line::from(vec![Span::raw(" Log: "), Span::styled(t.sanity.log_path.as_str(), dim)]));
    left.push(Line::from(format!(
        " Last event: {} ({})",
        t.last_event.relative, t.last_event.timestamp
    )));

    let left_block = Block::default()
        .title(" Telemetry ")
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(left).block(left_block), halves[0]);

    // ----- Right: I/O, replication, upgrade -----
    let mut right: Vec<Line> = t
        .io
        .iter()
        .map(|m| {
            Line::from(vec![
                Span::styled(format!(" {:<4}", m.protocol.as_str()), Style::default().fg(theme.info)),
                Span::raw(format!("{} IOPS  {}  ", m.iops, m.throughput)),
                Span::styled(m.latency.as_str(), theme.threshold_style(m.is_slow())),
            ])
        })
        .collect();

    let link = |name: &str, status: &str, detail: Option<&str>| match detail {
        Some(detail) => Line::from(format!(" {}: {} ({})", name, status, detail)),
        None => Line::from(format!(" {}: {}", name, status)),
    };
    right.push(Line::from(""));
    right.push(link(
        "Async",
        &t.rmr.async_link.status,
        t.rmr.async_link.detail.as_deref(),
    ));
    right.push(link("Sync AA", &t.rmr.sync_aa.status, t.rmr.sync_aa.detail.as_deref()));
    right.push(Line::from(""));
    right.push(Line::from(format!(" Upgrade: {}", t.upgrade.path)));
    for upgrade in &t.upgrade.nodes {
        right.push(Line::from(vec![
            Span::raw(format!("   {}: ", upgrade.node)),
            Span::styled(upgrade.display_time(), dim),
        ]));
    }

    let right_block = Block::default()
        .title(" I/O & Replication ")
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(right).block(right_block), halves[1]);
}

fn render_events(frame: &mut Frame, app: &App, node: &Node, area: Rect) {
    let events = node.event_monitor.events_by_urgency();
    let block = Block::default()
        .title(format!(" Events ({}) ", events.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if events.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  No events", Style::default().add_modifier(Modifier::DIM))),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Level"),
        Cell::from("Time"),
        Cell::from("Code"),
        Cell::from("Description"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = events
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(format!(" {} ", e.level)).style(app.theme.level_badge(e.level)),
                Cell::from(e.timestamp.as_str()),
                Cell::from(e.code.as_str()),
                Cell::from(e.description.as_str()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10), // Level
        Constraint::Length(19), // Time
        Constraint::Fill(1),    // Code
        Constraint::Fill(2),    // Description
    ];

    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
