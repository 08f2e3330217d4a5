//! Structured event-query filter.
//!
//! The active filter is an ordered set of [`Preset`] levels. The display
//! label (`event.query level=CRITICAL,WARNING`) is derived from it and is
//! only parsed when seed data arrives in label form.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::severity::{EventLevel, UnknownLevel};

/// Label shown when no preset is active.
pub const NO_QUERY_LABEL: &str = "No Query Active";

/// Prefix of every non-empty query label.
pub const QUERY_LABEL_PREFIX: &str = "event.query level=";

/// Marker that precedes the level list in a label.
const LEVEL_MARKER: &str = "level=";

/// Errors produced when parsing a query label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{0:?} is not a query preset (expected CRITICAL, ERROR or WARNING)")]
    NotAPreset(String),
}

impl From<UnknownLevel> for QueryError {
    fn from(err: UnknownLevel) -> Self {
        QueryError::NotAPreset(err.0)
    }
}

/// Severity levels that can be watched through the query editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Critical,
    Error,
    Warning,
}

impl Preset {
    /// Presets in the order the editor lists them.
    pub const ALL: [Preset; 3] = [Preset::Critical, Preset::Error, Preset::Warning];

    pub fn level(&self) -> EventLevel {
        match self {
            Preset::Critical => EventLevel::Critical,
            Preset::Error => EventLevel::Error,
            Preset::Warning => EventLevel::Warning,
        }
    }

    /// The single-preset label the editor shows for this option.
    pub fn option_label(&self) -> String {
        format!("{}{}", QUERY_LABEL_PREFIX, self.level())
    }
}

impl TryFrom<EventLevel> for Preset {
    type Error = QueryError;

    fn try_from(level: EventLevel) -> Result<Self, QueryError> {
        match level {
            EventLevel::Critical => Ok(Preset::Critical),
            EventLevel::Error => Ok(Preset::Error),
            EventLevel::Warning => Ok(Preset::Warning),
            EventLevel::Info => Err(QueryError::NotAPreset(level.to_string())),
        }
    }
}

impl FromStr for Preset {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::try_from(s.parse::<EventLevel>()?)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.level(), f)
    }
}

/// Ordered set of active presets.
///
/// Membership order is insertion order: toggling a preset on appends it,
/// toggling it off removes it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    active: Vec<Preset>,
}

impl QueryFilter {
    /// An empty filter ("No Query Active").
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from presets, keeping the first occurrence of each.
    pub fn from_presets<I: IntoIterator<Item = Preset>>(presets: I) -> Self {
        let mut filter = Self::new();
        for preset in presets {
            if !filter.contains(preset) {
                filter.active.push(preset);
            }
        }
        filter
    }

    /// Parse a display label.
    ///
    /// The sentinel and labels without a `level=` marker give an empty filter.
    /// Otherwise the text after the marker is split on commas; blank tokens and
    /// repeats are dropped.
    pub fn from_label(label: &str) -> Result<Self, QueryError> {
        if label == NO_QUERY_LABEL {
            return Ok(Self::new());
        }
        let Some((_, levels)) = label.split_once(LEVEL_MARKER) else {
            return Ok(Self::new());
        };

        let presets = levels
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::parse::<Preset>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_presets(presets))
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn contains(&self, preset: Preset) -> bool {
        self.active.contains(&preset)
    }

    /// Active presets in membership order.
    pub fn active(&self) -> &[Preset] {
        &self.active
    }

    /// A copy with `preset` removed if present, appended otherwise.
    pub fn toggled(&self, preset: Preset) -> Self {
        let mut active = self.active.clone();
        if let Some(pos) = active.iter().position(|p| *p == preset) {
            active.remove(pos);
        } else {
            active.push(preset);
        }
        Self { active }
    }

    /// Display label derived from the active set.
    pub fn label(&self) -> String {
        if self.active.is_empty() {
            return NO_QUERY_LABEL.to_string();
        }
        let levels: Vec<&str> = self.active.iter().map(|p| p.level().as_str()).collect();
        format!("{}{}", QUERY_LABEL_PREFIX, levels.join(","))
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
