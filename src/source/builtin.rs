//! Sample fleet compiled into the binary.

use super::{FleetSnapshot, FleetSource};
use crate::data::{FleetError, Node};

/// The built-in sample fleet in seed-data JSON form.
pub const BUILTIN_FLEET_JSON: &str = include_str!("../../fixtures/fleet.json");

/// Parse the built-in fleet into nodes.
pub fn builtin_nodes() -> Result<Vec<Node>, FleetError> {
    let snapshot: FleetSnapshot = serde_json::from_str(BUILTIN_FLEET_JSON)?;
    snapshot.into_iter().map(Node::try_from).collect()
}

/// A source that always yields the built-in sample fleet.
#[derive(Debug, Default)]
pub struct BuiltinSource {
    last_error: Option<String>,
}

impl BuiltinSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FleetSource for BuiltinSource {
    fn load(&mut self) -> Option<FleetSnapshot> {
        match serde_json::from_str(BUILTIN_FLEET_JSON) {
            Ok(snapshot) => {
                self.last_error = None;
                Some(snapshot)
            }
            Err(e) => {
                self.last_error = Some(format!("Parse error: {}", e));
                None
            }
        }
    }

    fn description(&self) -> &str {
        "builtin sample fleet"
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Severity;

    #[test]
    fn test_builtin_fleet_order() {
        let nodes = builtin_nodes().unwrap();
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["ibox2101", "ibox2531", "ibox3011", "ibox3958"]);
    }

    #[test]
    fn test_builtin_severities_are_recomputed() {
        let nodes = builtin_nodes().unwrap();
        let severities: Vec<Severity> =
            nodes.iter().map(|n| n.event_monitor.highest_severity()).collect();
        assert_eq!(
            severities,
            vec![Severity::Warning, Severity::None, Severity::Info, Severity::Critical]
        );
    }

    #[test]
    fn test_builtin_source_loads() {
        let mut source = BuiltinSource::new();
        let snapshot = source.load().unwrap();
        assert_eq!(snapshot.len(), 4);
        assert!(source.error().is_none());
        // the sample fleet is always available again
        assert!(source.load().is_some());
    }
}
