//! Events observed on a node.

use serde::{Deserialize, Serialize};

use super::severity::EventLevel;

/// Description attached to every manually created event.
pub const MANUAL_EVENT_DESCRIPTION: &str = "User generated custom event.";

/// A single timestamped occurrence on a node.
///
/// Events are immutable once built. The timestamp is a display string in
/// `YYYY-MM-DD HH:MM:SS` form and is never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: String,
    pub level: EventLevel,
    pub code: String,
    pub description: String,
}

impl Event {
    /// Event produced by an active preset query for `level`.
    pub fn simulated(level: EventLevel, timestamp: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            level,
            code: format!("MONITOR_{}", level),
            description: format!("Active monitoring for {} events.", level),
        }
    }

    /// User-authored `INFO` event. `code` is stored as given.
    pub fn manual(code: &str, timestamp: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            level: EventLevel::Info,
            code: code.to_string(),
            description: MANUAL_EVENT_DESCRIPTION.to_string(),
        }
    }

    /// Manual events are the only ones that survive a preset toggle.
    pub fn is_manual(&self) -> bool {
        self.level == EventLevel::Info
    }
}
