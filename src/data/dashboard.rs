//! Dashboard state and the query-editor reducers.
//!
//! [`DashboardState`] owns the fleet and the editing session. Each
//! [`Action`] consumes the current state and yields the next one. Actions that
//! are not valid in the current editor state return it unchanged.
//!
//! ```text
//!            open_editor(id)
//!   Closed ───────────────────▶ Editing(id) ──┐ toggle_preset(level)
//!     ▲                            │  ▲        │ (stays Editing)
//!     │  close / manual_create /   │  └────────┘
//!     └──────── clear_all ─────────┘
//! ```

use tracing::{debug, info};

use super::clock::format_timestamp;
use super::fleet::Fleet;
use super::query::Preset;
use chrono::{DateTime, Utc};

/// The query editor session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    /// Exactly one node is being edited. `manual_code` is the text typed so
    /// far into the manual event input.
    Editing { node_id: String, manual_code: String },
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        matches!(self, EditorState::Editing { .. })
    }

    /// Id of the node being edited, if any.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            EditorState::Closed => None,
            EditorState::Editing { node_id, .. } => Some(node_id),
        }
    }

    pub fn manual_code(&self) -> &str {
        match self {
            EditorState::Closed => "",
            EditorState::Editing { manual_code, .. } => manual_code,
        }
    }
}

/// A user action against the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenEditor(String),
    TogglePreset(Preset),
    /// Submit a manual event with the given code.
    ManualCreate(String),
    ClearAll,
    CloseEditor,
    /// Append a character to the manual-code input.
    InputChar(char),
    /// Remove the last character of the manual-code input.
    InputBackspace,
}

/// Fleet plus editing session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub fleet: Fleet,
    pub editor: EditorState,
}

impl DashboardState {
    /// Fresh state for a seeded fleet, editor closed.
    pub fn initial(fleet: Fleet) -> Self {
        Self {
            fleet,
            editor: EditorState::Closed,
        }
    }

    /// Apply `action`. `now` stamps any event the action synthesizes.
    pub fn apply(self, action: Action, now: DateTime<Utc>) -> Self {
        match action {
            Action::OpenEditor(id) => self.open_editor(&id),
            Action::TogglePreset(preset) => self.toggle_preset(preset, now),
            Action::ManualCreate(code) => self.manual_create(&code, now),
            Action::ClearAll => self.clear_all(),
            Action::CloseEditor => self.close_editor(),
            Action::InputChar(c) => self.edit_input(|code| code.push(c)),
            Action::InputBackspace => self.edit_input(|code| {
                code.pop();
            }),
        }
    }

    /// `Closed -> Editing(id)`.
    ///
    /// Ignored for unknown ids and while another session is open.
    pub fn open_editor(self, node_id: &str) -> Self {
        if let Some(current) = self.editor.node_id() {
            debug!(current, requested = node_id, "editor already open, ignoring");
            return self;
        }
        if !self.fleet.contains(node_id) {
            debug!(node_id, "no such node, editor stays closed");
            return self;
        }

        debug!(node_id, "opening query editor");
        Self {
            editor: EditorState::Editing {
                node_id: node_id.to_string(),
                manual_code: String::new(),
            },
            ..self
        }
    }

    /// Toggle a preset on the edited node. The editor stays open.
    pub fn toggle_preset(self, preset: Preset, now: DateTime<Utc>) -> Self {
        let Some(node_id) = self.editor.node_id().map(str::to_string) else {
            debug!(%preset, "toggle ignored, editor closed");
            return self;
        };

        let timestamp = format_timestamp(now);
        let fleet = self
            .fleet
            .replace_monitor(&node_id, |m| Some(m.toggled_preset(preset, &timestamp)));

        if let Some(node) = fleet.get(&node_id) {
            info!(
                node_id = %node_id,
                query = %node.event_monitor.query(),
                highest = %node.event_monitor.highest_severity(),
                "query preset toggled"
            );
        }

        Self { fleet, ..self }
    }

    /// Prepend a manual `INFO` event and close the editor.
    ///
    /// A blank code leaves the state untouched, editor included.
    pub fn manual_create(self, code: &str, now: DateTime<Utc>) -> Self {
        let Some(node_id) = self.editor.node_id().map(str::to_string) else {
            debug!("manual event ignored, editor closed");
            return self;
        };
        if code.trim().is_empty() {
            debug!(node_id = %node_id, "manual event ignored, empty code");
            return self;
        }

        let timestamp = format_timestamp(now);
        let fleet = self
            .fleet
            .replace_monitor(&node_id, |m| m.with_manual_event(code, &timestamp));

        info!(node_id = %node_id, code = code.trim(), "manual event created");
        Self {
            fleet,
            editor: EditorState::Closed,
        }
    }

    /// Clear every event on the edited node and close the editor.
    pub fn clear_all(self) -> Self {
        let Some(node_id) = self.editor.node_id().map(str::to_string) else {
            debug!("clear ignored, editor closed");
            return self;
        };

        let fleet = self.fleet.replace_monitor(&node_id, |m| Some(m.cleared()));

        info!(node_id = %node_id, "events cleared");
        Self {
            fleet,
            editor: EditorState::Closed,
        }
    }

    /// `Editing -> Closed`, discarding any typed input.
    pub fn close_editor(self) -> Self {
        if self.editor.is_open() {
            debug!("closing query editor");
        }
        Self {
            editor: EditorState::Closed,
            ..self
        }
    }

    fn edit_input<F: FnOnce(&mut String)>(mut self, edit: F) -> Self {
        if let EditorState::Editing { manual_code, .. } = &mut self.editor {
            edit(manual_code);
        }
        self
    }
}
