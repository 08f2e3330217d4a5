//! Severity levels and fleet-wide ranking.
//!
//! [`EventLevel`] is the level carried by a concrete [`Event`]; [`Severity`]
//! adds `None` for "no events at all". Both derive `Ord` in ascending order of
//! urgency, so `max()` picks the most urgent value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::event::Event;

/// Level attached to a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl EventLevel {
    /// Wire/display name, e.g. `"CRITICAL"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLevel::Info => "INFO",
            EventLevel::Warning => "WARNING",
            EventLevel::Error => "ERROR",
            EventLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity level: {0:?}")]
pub struct UnknownLevel(pub String);

impl FromStr for EventLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INFO" => Ok(EventLevel::Info),
            "WARNING" => Ok(EventLevel::Warning),
            "ERROR" => Ok(EventLevel::Error),
            "CRITICAL" => Ok(EventLevel::Critical),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}

/// Highest severity of a node's events, or `None` when it has none.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    None,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// All severities, most urgent first.
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::None,
    ];

    /// Most urgent level present in `events`, `None` for an empty slice.
    pub fn highest(events: &[Event]) -> Severity {
        events.iter().map(|e| e.level).max().map_or(Severity::None, Severity::from)
    }

    /// Display priority: 1 for CRITICAL through 5 for NONE.
    ///
    /// Sorting ascending by priority lists the most urgent entries first.
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Critical => 1,
            Severity::Error => 2,
            Severity::Warning => 3,
            Severity::Info => 4,
            Severity::None => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "NONE",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl From<EventLevel> for Severity {
    fn from(level: EventLevel) -> Self {
        match level {
            EventLevel::Info => Severity::Info,
            EventLevel::Warning => Severity::Warning,
            EventLevel::Error => Severity::Error,
            EventLevel::Critical => Severity::Critical,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
