//! Application state and navigation logic.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::data::{
    Action, Clock, DashboardState, Event, Fleet, Node, Preset, Severity,
};
use crate::source::FleetSource;
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Node detail and the query editor are overlays rather than views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// One row per node.
    Fleet,
    /// Every event in the fleet, most urgent first.
    Events,
}

impl View {
    /// Cycle to the other view.
    pub fn next(self) -> Self {
        match self {
            View::Fleet => View::Events,
            View::Events => View::Fleet,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Fleet => "Fleet",
            View::Events => "Events",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn FleetSource>,
    clock: Box<dyn Clock>,
    pub state: DashboardState,
    pub last_loaded: Option<Instant>,
    pub load_error: Option<String>,

    // Navigation state
    pub selected_node_index: usize,
    pub selected_event_index: usize,

    // Search/filter on node id
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,
    pub export_path: PathBuf,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given fleet source, clock and theme.
    ///
    /// The fleet is empty until [`App::reload_data`] is called.
    pub fn new(source: Box<dyn FleetSource>, clock: Box<dyn Clock>, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Fleet,
            show_help: false,
            show_detail_overlay: false,
            source,
            clock,
            state: DashboardState::default(),
            last_loaded: None,
            load_error: None,
            selected_node_index: 0,
            selected_event_index: 0,
            filter_text: String::new(),
            filter_active: false,
            theme,
            export_path: PathBuf::from("fleet_export.json"),
            status_message: None,
        }
    }

    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = path;
        self
    }

    /// Returns a description of the current fleet source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.state.fleet
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// (Re)seed the dashboard from the source.
    ///
    /// Local edits and any open editor session are discarded. Returns
    /// `Ok(false)` when the source had nothing to offer (see `load_error`).
    pub fn reload_data(&mut self) -> Result<bool> {
        let Some(snapshot) = self.source.load() else {
            self.load_error = self.source.error().map(str::to_string);
            return Ok(false);
        };

        let fleet = match Fleet::from_snapshot(snapshot) {
            Ok(fleet) => fleet,
            Err(e) => {
                warn!(error = %e, source = self.source.description(), "rejected fleet snapshot");
                self.load_error = Some(e.to_string());
                return Err(e).context("invalid fleet snapshot");
            }
        };

        info!(
            nodes = fleet.len(),
            source = self.source.description(),
            "fleet loaded"
        );
        self.state = DashboardState::initial(fleet);
        self.last_loaded = Some(Instant::now());
        self.load_error = None;
        self.show_detail_overlay = false;
        self.clamp_selection();
        Ok(true)
    }

    /// Run one reducer step against the dashboard state.
    pub fn dispatch(&mut self, action: Action) {
        let now = self.clock.now();
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action, now);
        self.clamp_selection();
    }

    // ----- Query editor -----

    /// Open the query editor for the selected node.
    pub fn open_editor(&mut self) {
        if let Some(id) = self.selected_node().map(|n| n.id.clone()) {
            self.dispatch(Action::OpenEditor(id));
        }
    }

    pub fn editor_open(&self) -> bool {
        self.state.editor.is_open()
    }

    /// The node being edited, if the editor is open.
    pub fn editing_node(&self) -> Option<&Node> {
        let id = self.state.editor.node_id()?;
        self.state.fleet.get(id)
    }

    pub fn toggle_preset(&mut self, preset: Preset) {
        self.dispatch(Action::TogglePreset(preset));
    }

    /// Submit whatever has been typed into the manual event input.
    pub fn submit_manual_event(&mut self) {
        let code = self.state.editor.manual_code().to_string();
        let node_id = self.state.editor.node_id().map(str::to_string);
        self.dispatch(Action::ManualCreate(code.clone()));

        if let Some(id) = node_id {
            if !self.editor_open() {
                self.set_status_message(format!("Event {} created on {}", code.trim(), id));
            }
        }
    }

    pub fn clear_events(&mut self) {
        if let Some(id) = self.state.editor.node_id().map(str::to_string) {
            self.dispatch(Action::ClearAll);
            self.set_status_message(format!("Cleared all events on {}", id));
        }
    }

    pub fn close_editor(&mut self) {
        self.dispatch(Action::CloseEditor);
    }

    pub fn editor_push(&mut self, c: char) {
        self.dispatch(Action::InputChar(c));
    }

    pub fn editor_pop(&mut self) {
        self.dispatch(Action::InputBackspace);
    }

    // ----- Sanity -----

    /// Request a sanity run on the selected node.
    ///
    /// There is no scheduler behind the dashboard; the request is logged and
    /// acknowledged in the status bar.
    pub fn run_sanity(&mut self) {
        let Some(id) = self.selected_node().map(|n| n.id.clone()) else {
            return;
        };
        info!(node_id = %id, "sanity workflow requested");
        self.set_status_message(format!("Sanity workflow dispatched for {}", id));
    }

    // ----- Views and selection -----

    /// Switch to the other view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Nodes that match the filter, in fleet order.
    pub fn visible_nodes(&self) -> Vec<&Node> {
        self.state
            .fleet
            .nodes()
            .iter()
            .filter(|n| self.matches_filter(&n.id))
            .collect()
    }

    /// Every event of the visible nodes, most urgent first.
    ///
    /// Ties keep fleet order, then each node's own event order.
    pub fn fleet_events(&self) -> Vec<(&Node, &Event)> {
        let mut events: Vec<(&Node, &Event)> = self
            .visible_nodes()
            .into_iter()
            .flat_map(|n| n.event_monitor.events().iter().map(move |e| (n, e)))
            .collect();
        events.sort_by_key(|(_, e)| Severity::from(e.level).priority());
        events
    }

    /// The node under the cursor in the Fleet view.
    pub fn selected_node(&self) -> Option<&Node> {
        self.visible_nodes().get(self.selected_node_index).copied()
    }

    /// The node the detail overlay describes in the current view.
    pub fn detail_node(&self) -> Option<&Node> {
        match self.current_view {
            View::Fleet => self.selected_node(),
            View::Events => {
                self.fleet_events().get(self.selected_event_index).map(|(n, _)| *n)
            }
        }
    }

    fn item_count(&self) -> usize {
        match self.current_view {
            View::Fleet => self.visible_nodes().len(),
            View::Events => self.fleet_events().len(),
        }
    }

    fn selection_mut(&mut self) -> &mut usize {
        match self.current_view {
            View::Fleet => &mut self.selected_node_index,
            View::Events => &mut self.selected_event_index,
        }
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.item_count().saturating_sub(1);
        let selected = self.selection_mut();
        *selected = (*selected + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        let selected = self.selection_mut();
        *selected = selected.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        *self.selection_mut() = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        let last = self.item_count().saturating_sub(1);
        *self.selection_mut() = last;
    }

    /// Select a row by its on-screen index, if it exists.
    pub fn select_row(&mut self, row: usize) {
        if row < self.item_count() {
            *self.selection_mut() = row;
        }
    }

    fn clamp_selection(&mut self) {
        let nodes = self.visible_nodes().len();
        let events = self.fleet_events().len();
        self.selected_node_index = self.selected_node_index.min(nodes.saturating_sub(1));
        self.selected_event_index = self.selected_event_index.min(events.saturating_sub(1));
    }

    /// Open the node detail overlay.
    pub fn enter_detail(&mut self) {
        if self.detail_node().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlays first, then return to the Fleet view.
    pub fn go_back(&mut self) {
        if self.editor_open() {
            self.close_editor();
        } else if self.show_detail_overlay {
            self.show_detail_overlay = false;
        } else {
            self.current_view = View::Fleet;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // ----- Filter -----

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.clamp_selection();
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    /// Check if a node id matches the current filter.
    pub fn matches_filter(&self, id: &str) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        id.to_lowercase().contains(&self.filter_text.to_lowercase())
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    // ----- Export -----

    /// Export the current fleet to `path`.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        if self.last_loaded.is_none() {
            bail!("No fleet to export");
        }
        write_export(&self.state.fleet, path)
    }

    /// Export to the configured path and report the outcome in the status bar.
    pub fn export_to_default(&mut self) {
        let path = self.export_path.clone();
        match self.export_state(&path) {
            Ok(()) => {
                info!(path = %path.display(), "fleet exported");
                self.set_status_message(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.set_status_message(format!("Export failed: {}", e));
            }
        }
    }
}

/// Export document: node counts per highest severity plus the fleet in
/// seed-data shape.
pub fn export_document(fleet: &Fleet) -> serde_json::Value {
    let mut summary = serde_json::Map::new();
    summary.insert("total_nodes".to_string(), serde_json::json!(fleet.len()));
    for severity in Severity::ALL {
        summary.insert(
            severity.as_str().to_lowercase(),
            serde_json::json!(fleet.count_with(severity)),
        );
    }
    summary.insert("locked".to_string(), serde_json::json!(fleet.locked_count()));

    serde_json::json!({
        "summary": serde_json::Value::Object(summary),
        "nodes": fleet.to_snapshot(),
    })
}

/// Write [`export_document`] as pretty JSON.
pub fn write_export(fleet: &Fleet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&export_document(fleet))?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write export to {}", path.display()))
}
