use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::warn;

use crate::app::{App, View};
use crate::data::Preset;

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

    // The query editor is modal and captures every key
    if app.editor_open() {
        handle_editor_input(app, key);
        return;
    }

    // If detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Allow scrolling through nodes while overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab | KeyCode::BackTab => app.next_view(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Right | KeyCode::Char('l') => {
            app.next_view()
        }
        KeyCode::Char('1') => app.set_view(View::Fleet),
        KeyCode::Char('2') => app.set_view(View::Events),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Enter edits the query on the Fleet view, shows detail on Events
        KeyCode::Enter => match app.current_view {
            View::Fleet => app.open_editor(),
            View::Events => app.enter_detail(),
        },
        KeyCode::Char('d') => app.enter_detail(),

        // Sanity run on the selected node
        KeyCode::Char('s') => {
            if app.current_view == View::Fleet {
                app.run_sanity();
            }
        }

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Reload
        KeyCode::Char('r') => match app.reload_data() {
            Ok(true) => app.set_status_message("Fleet reloaded".to_string()),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "reload failed"),
        },

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Filter (start typing to filter)
        KeyCode::Char('/') => app.start_filter(),

        // Clear filter
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        // Export
        KeyCode::Char('e') => app.export_to_default(),

        _ => {}
    }
}

/// Handle key input while the query editor is open.
///
/// Plain characters always go to the manual event input. Presets toggle on
/// `F1`/`F2`/`F3`, or `Alt+1`/`Alt+2`/`Alt+3` where function keys are taken.
fn handle_editor_input(app: &mut App, key: KeyEvent) {
    if let Some(preset) = preset_key(&key) {
        app.toggle_preset(preset);
        return;
    }

    match key.code {
        KeyCode::Esc => app.close_editor(),

        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_events();
        }

        KeyCode::Enter => app.submit_manual_event(),

        KeyCode::Backspace => app.editor_pop(),

        KeyCode::Char(c)
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.editor_push(c);
        }

        _ => {}
    }
}

/// The preset bound to `key` in the query editor, in [`Preset::ALL`] order.
fn preset_key(key: &KeyEvent) -> Option<Preset> {
    let index = match key.code {
        KeyCode::F(n @ 1..=3) => n as usize - 1,
        KeyCode::Char(c @ '1'..='3') if key.modifiers.contains(KeyModifiers::ALT) => {
            c as usize - '1' as usize
        }
        _ => return None,
    };
    Preset::ALL.get(index).copied()
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        // Backspace
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    // Overlays own the screen; only right-click (back) gets through
    let overlay = app.editor_open() || app.show_help;

    match mouse.kind {
        MouseEventKind::ScrollUp if !overlay => app.select_prev(),
        MouseEventKind::ScrollDown if !overlay => app.select_next(),

        // Click to select
        MouseEventKind::Down(MouseButton::Left) if !overlay => {
            let clicked_row = mouse.row;

            // Content area starts after header, tabs, table border and header
            if clicked_row > content_start_row {
                let item_row = (clicked_row - content_start_row - 1) as usize;
                app.select_row(item_row);
            }

            // Tab clicks (row 1, after header): Fleet (0-10), Events (11-22)
            if clicked_row == 1 {
                let col = mouse.column;
                if col < 11 {
                    app.set_view(View::Fleet);
                } else if col < 23 {
                    app.set_view(View::Events);
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.go_back();
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FixedClock, Severity};
    use crate::source::BuiltinSource;
    use crate::ui::Theme;
    use chrono::{TimeZone, Utc};
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn app() -> App {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 19, 18, 45, 0).unwrap());
        let mut app = App::new(Box::new(BuiltinSource::new()), Box::new(clock), Theme::dark());
        app.reload_data().unwrap();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn alt(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::ALT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key_event(app, key(KeyCode::Char(c)));
        }
    }

    fn mouse(kind: MouseEventKind, row: u16, column: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_enter_opens_editor_on_fleet_view() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.editing_node().map(|n| n.id.as_str()), Some("ibox2531"));
    }

    #[test]
    fn test_preset_keys_toggle() {
        let mut app = app();
        // ibox2531 starts with CRITICAL active and no events
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Enter));
        handle_key_event(&mut app, key(KeyCode::F(3)));

        let node = app.fleet().get("ibox2531").unwrap();
        assert_eq!(node.event_monitor.query_label(), "event.query level=CRITICAL,WARNING");
        assert_eq!(node.event_monitor.highest_severity(), Severity::Critical);
        assert!(app.editor_open());

        handle_key_event(&mut app, alt('1'));
        let node = app.fleet().get("ibox2531").unwrap();
        assert_eq!(node.event_monitor.query_label(), "event.query level=WARNING");
        assert_eq!(node.event_monitor.highest_severity(), Severity::Warning);
        assert_eq!(app.state.editor.manual_code(), "");
    }

    #[test]
    fn test_code_may_start_with_digit() {
        let mut app = app();
        let query_before = app.fleet().get("ibox2101").unwrap().event_monitor.query_label();

        handle_key_event(&mut app, key(KeyCode::Enter));
        type_text(&mut app, "3PAR_LINK");
        handle_key_event(&mut app, key(KeyCode::Enter));

        assert!(!app.editor_open());
        let monitor = &app.fleet().get("ibox2101").unwrap().event_monitor;
        assert_eq!(monitor.events()[0].code, "3PAR_LINK");
        assert_eq!(monitor.query_label(), query_before);
    }

    #[test]
    fn test_typed_digits_are_part_of_code() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Enter));
        type_text(&mut app, "RAID1");
        assert_eq!(app.state.editor.manual_code(), "RAID1");
        handle_key_event(&mut app, key(KeyCode::Enter));

        assert!(!app.editor_open());
        let events = app.fleet().get("ibox2101").unwrap().event_monitor.events();
        assert_eq!(events[0].code, "RAID1");
    }

    #[test]
    fn test_ctrl_d_clears_and_closes() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::End));
        handle_key_event(&mut app, key(KeyCode::Enter));
        handle_key_event(&mut app, ctrl('d'));

        assert!(!app.editor_open());
        let monitor = &app.fleet().get("ibox3958").unwrap().event_monitor;
        assert!(monitor.events().is_empty());
        assert_eq!(monitor.highest_severity(), Severity::None);
    }

    #[test]
    fn test_esc_closes_editor_without_changes() {
        let mut app = app();
        let before = app.fleet().clone();
        handle_key_event(&mut app, key(KeyCode::Enter));
        type_text(&mut app, "abc");
        handle_key_event(&mut app, key(KeyCode::Esc));

        assert!(!app.editor_open());
        assert_eq!(app.fleet(), &before);
        assert!(app.running);
    }

    #[test]
    fn test_q_in_editor_is_text() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Enter));
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.state.editor.manual_code(), "q");
    }

    #[test]
    fn test_filter_input() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        type_text(&mut app, "3958");
        handle_key_event(&mut app, key(KeyCode::Enter));

        assert!(!app.filter_active);
        assert_eq!(app.visible_nodes().len(), 1);

        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.editing_node().map(|n| n.id.as_str()), Some("ibox3958"));
    }

    #[test]
    fn test_events_view_enter_shows_detail() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('2')));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(app.show_detail_overlay);
        assert!(!app.editor_open());
        assert_eq!(app.detail_node().map(|n| n.id.as_str()), Some("ibox3958"));

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(!app.show_detail_overlay);
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
    fn test_mouse_click_selects_row() {
        let mut app = app();
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 6, 5), 3);
        assert_eq!(app.selected_node_index, 2);

        // beyond the last row is ignored
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 20, 5), 3);
        assert_eq!(app.selected_node_index, 2);

        handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollDown, 10, 5), 3);
        assert_eq!(app.selected_node_index, 3);
    }

    #[test]
    fn test_mouse_tab_click_and_right_click_back() {
        let mut app = app();
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 1, 14), 3);
        assert_eq!(app.current_view, View::Events);

        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Right), 5, 5), 3);
        assert_eq!(app.current_view, View::Fleet);
    }

    #[test]
    fn test_sanity_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('s')));
        assert_eq!(
            app.get_status_message(),
            Some("Sanity workflow dispatched for ibox2101")
        );
    }
}
