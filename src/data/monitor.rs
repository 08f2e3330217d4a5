//! Per-node event monitor.
//!
//! An [`EventMonitor`] owns a node's event list together with the active
//! query filter and the highest severity derived from the list. Every
//! operation returns a new monitor; the fields are private so the derived
//! severity can never drift from the events.

use super::event::Event;
use super::query::{Preset, QueryFilter};
use super::severity::Severity;

/// Events, query filter and derived highest severity for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMonitor {
    query: QueryFilter,
    highest_severity: Severity,
    events: Vec<Event>,
}

impl EventMonitor {
    pub fn new(query: QueryFilter, events: Vec<Event>) -> Self {
        let highest_severity = Severity::highest(&events);
        Self {
            query,
            highest_severity,
            events,
        }
    }

    /// Replace the event list, keeping the caller-supplied query.
    pub fn with_events(&self, query: QueryFilter, events: Vec<Event>) -> Self {
        Self::new(query, events)
    }

    /// No events, no active query, severity `NONE`.
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    /// Toggle `preset` in the query and regenerate the simulated events.
    ///
    /// The new list holds one fresh event per active preset (in filter order,
    /// stamped `timestamp`) followed by the existing manual events.
    pub fn toggled_preset(&self, preset: Preset, timestamp: &str) -> Self {
        let query = self.query.toggled(preset);

        let events: Vec<Event> = query
            .active()
            .iter()
            .map(|p| Event::simulated(p.level(), timestamp))
            .chain(self.events.iter().filter(|e| e.is_manual()).cloned())
            .collect();

        self.with_events(query, events)
    }

    /// Prepend a manual event with the trimmed `code`.
    ///
    /// Returns `None` when `code` is blank.
    pub fn with_manual_event(&self, code: &str, timestamp: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        let mut events = Vec::with_capacity(self.events.len() + 1);
        events.push(Event::manual(code, timestamp));
        events.extend(self.events.iter().cloned());

        Some(self.with_events(self.query.clone(), events))
    }

    pub fn query(&self) -> &QueryFilter {
        &self.query
    }

    pub fn query_label(&self) -> String {
        self.query.label()
    }

    pub fn highest_severity(&self) -> Severity {
        self.highest_severity
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events sorted most urgent first; ties keep list order.
    pub fn events_by_urgency(&self) -> Vec<&Event> {
        let mut sorted: Vec<&Event> = self.events.iter().collect();
        sorted.sort_by_key(|e| Severity::from(e.level).priority());
        sorted
    }

    /// The event shown in the fleet row: first of [`Self::events_by_urgency`].
    pub fn headline_event(&self) -> Option<&Event> {
        self.events_by_urgency().into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::query::NO_QUERY_LABEL;
    use crate::data::severity::EventLevel;

    const NOW: &str = "2026-01-19 18:45:00";
    const LATER: &str = "2026-01-19 18:46:00";

    fn event(level: EventLevel, code: &str) -> Event {
        Event {
            timestamp: "2026-01-18 10:00:00".to_string(),
            level,
            code: code.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_new_derives_highest_severity() {
        let monitor = EventMonitor::new(
            QueryFilter::new(),
            vec![event(EventLevel::Info, "A"), event(EventLevel::Error, "B")],
        );
        assert_eq!(monitor.highest_severity(), Severity::Error);
    }

    #[test]
    fn test_cleared_resets_everything() {
        let monitor = EventMonitor::new(
            QueryFilter::from_presets([Preset::Critical]),
            vec![event(EventLevel::Critical, "X")],
        );
        let cleared = monitor.cleared();
        assert!(cleared.events().is_empty());
        assert_eq!(cleared.highest_severity(), Severity::None);
        assert_eq!(cleared.query_label(), NO_QUERY_LABEL);
        assert_eq!(cleared.cleared(), cleared);
    }

    #[test]
    fn test_toggle_scenario() {
        let monitor = EventMonitor::default();

        let monitor = monitor.toggled_preset(Preset::Critical, NOW);
        assert_eq!(monitor.query_label(), "event.query level=CRITICAL");
        assert_eq!(monitor.events().len(), 1);
        assert_eq!(monitor.events()[0].code, "MONITOR_CRITICAL");
        assert_eq!(monitor.events()[0].timestamp, NOW);
        assert_eq!(monitor.highest_severity(), Severity::Critical);

        let monitor = monitor.toggled_preset(Preset::Warning, LATER);
        assert_eq!(monitor.query_label(), "event.query level=CRITICAL,WARNING");
        let codes: Vec<&str> = monitor.events().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["MONITOR_CRITICAL", "MONITOR_WARNING"]);
        assert!(monitor.events().iter().all(|e| e.timestamp == LATER));
        assert_eq!(monitor.highest_severity(), Severity::Critical);

        let monitor = monitor.toggled_preset(Preset::Critical, LATER);
        assert_eq!(monitor.query_label(), "event.query level=WARNING");
        assert_eq!(monitor.events().len(), 1);
        assert_eq!(monitor.events()[0].level, EventLevel::Warning);
        assert_eq!(monitor.highest_severity(), Severity::Warning);
    }

    #[test]
    fn test_toggle_keeps_manual_events_after_simulated() {
        let monitor = EventMonitor::new(
            QueryFilter::from_presets([Preset::Error]),
            vec![
                event(EventLevel::Error, "OLD_ERROR"),
                event(EventLevel::Info, "LOGIN"),
                event(EventLevel::Critical, "OLD_CRIT"),
                event(EventLevel::Info, "LOGOUT"),
            ],
        );

        let toggled = monitor.toggled_preset(Preset::Warning, NOW);
        let codes: Vec<&str> = toggled.events().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["MONITOR_ERROR", "MONITOR_WARNING", "LOGIN", "LOGOUT"]);
    }

    #[test]
    fn test_toggle_off_last_preset_leaves_manual_events() {
        let monitor = EventMonitor::new(
            QueryFilter::from_presets([Preset::Critical]),
            vec![event(EventLevel::Critical, "MONITOR_CRITICAL"), event(EventLevel::Info, "NOTE")],
        );
        let toggled = monitor.toggled_preset(Preset::Critical, NOW);
        assert_eq!(toggled.query_label(), NO_QUERY_LABEL);
        assert_eq!(toggled.events().len(), 1);
        assert_eq!(toggled.highest_severity(), Severity::Info);
    }

    #[test]
    fn test_manual_event_is_prepended() {
        let monitor = EventMonitor::new(
            QueryFilter::from_presets([Preset::Critical]),
            vec![event(EventLevel::Info, "OLD_LOGIN")],
        );

        let updated = monitor.with_manual_event("  NEW_CODE ", NOW).unwrap();
        let codes: Vec<&str> = updated.events().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["NEW_CODE", "OLD_LOGIN"]);
        assert_eq!(updated.events()[0].level, EventLevel::Info);
        assert_eq!(updated.highest_severity(), Severity::Info);
        assert_eq!(updated.query(), monitor.query());
    }

    #[test]
    fn test_blank_manual_code_is_rejected() {
        let monitor = EventMonitor::default();
        assert!(monitor.with_manual_event("", NOW).is_none());
        assert!(monitor.with_manual_event("   ", NOW).is_none());
    }

    #[test]
    fn test_headline_is_most_urgent_and_stable() {
        let monitor = EventMonitor::new(
            QueryFilter::new(),
            vec![
                event(EventLevel::Info, "I"),
                event(EventLevel::Warning, "W1"),
                event(EventLevel::Critical, "C1"),
                event(EventLevel::Critical, "C2"),
            ],
        );
        assert_eq!(monitor.headline_event().map(|e| e.code.as_str()), Some("C1"));
        let order: Vec<&str> =
            monitor.events_by_urgency().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(order, vec!["C1", "C2", "W1", "I"]);
        assert!(EventMonitor::default().headline_event().is_none());
    }
}
