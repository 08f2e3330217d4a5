//! The ordered collection of monitored nodes.

use std::collections::HashSet;

use thiserror::Error;

use super::monitor::EventMonitor;
use super::node::Node;
use super::query::QueryError;
use super::severity::Severity;
use crate::source::{FleetSnapshot, SerializedNode};

/// Errors raised while building a fleet from seed data.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("failed to read fleet data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse fleet data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    #[error("node {node}: invalid event query: {source}")]
    InvalidQuery {
        node: String,
        #[source]
        source: QueryError,
    },
}

/// Nodes in display order, keyed by unique id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fleet {
    nodes: Vec<Node>,
}

impl Fleet {
    /// Build a fleet, rejecting duplicate ids.
    pub fn new(nodes: Vec<Node>) -> Result<Self, FleetError> {
        {
            let mut seen = HashSet::with_capacity(nodes.len());
            if let Some(dup) = nodes.iter().find(|n| !seen.insert(n.id.as_str())) {
                return Err(FleetError::DuplicateId(dup.id.clone()));
            }
        }
        Ok(Self { nodes })
    }

    /// Convert a seed snapshot, keeping its order.
    pub fn from_snapshot(snapshot: FleetSnapshot) -> Result<Self, FleetError> {
        let nodes = snapshot.into_iter().map(Node::try_from).collect::<Result<Vec<_>, _>>()?;
        Self::new(nodes)
    }

    /// The fleet in seed-data form, labels derived from the current filters.
    pub fn to_snapshot(&self) -> FleetSnapshot {
        self.nodes.iter().map(SerializedNode::from).collect()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Replace the event monitor of node `id` with `update(old)`.
    ///
    /// The node keeps its position. Returns the fleet unchanged when no node
    /// has that id or when `update` declines with `None`.
    pub fn replace_monitor<F>(self, id: &str, update: F) -> Self
    where
        F: FnOnce(&EventMonitor) -> Option<EventMonitor>,
    {
        let Some(pos) = self.nodes.iter().position(|n| n.id == id) else {
            return self;
        };
        let Some(monitor) = update(&self.nodes[pos].event_monitor) else {
            return self;
        };

        let mut nodes = self.nodes;
        let node = nodes.remove(pos);
        nodes.insert(pos, node.with_monitor(monitor));
        Self { nodes }
    }

    /// Number of nodes whose highest severity is `severity`.
    pub fn count_with(&self, severity: Severity) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.event_monitor.highest_severity() == severity)
            .count()
    }

    /// Most urgent severity across the whole fleet.
    pub fn highest_severity(&self) -> Severity {
        self.nodes
            .iter()
            .map(|n| n.event_monitor.highest_severity())
            .max()
            .unwrap_or_default()
    }

    pub fn locked_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_locked()).count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::event::Event;
    use crate::data::query::QueryFilter;
    use crate::source::builtin_nodes;

    pub(crate) fn sample_fleet() -> Fleet {
        Fleet::new(builtin_nodes().unwrap()).unwrap()
    }

    fn ids(fleet: &Fleet) -> Vec<&str> {
        fleet.nodes().iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut nodes = builtin_nodes().unwrap();
        let copy = nodes[1].clone();
        nodes.push(copy);

        match Fleet::new(nodes) {
            Err(FleetError::DuplicateId(id)) => assert_eq!(id, "ibox2531"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_replace_monitor_keeps_position() {
        let fleet = sample_fleet();
        let before = ids(&fleet).iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let fleet = fleet.replace_monitor("ibox3011", |m| Some(m.cleared()));

        assert_eq!(ids(&fleet), before);
        assert!(fleet.get("ibox3011").unwrap().event_monitor.events().is_empty());
        // neighbours untouched
        assert_eq!(
            fleet.get("ibox3958").unwrap().event_monitor.highest_severity(),
            Severity::Critical
        );
    }

    #[test]
    fn test_replace_monitor_unknown_id_is_noop() {
        let fleet = sample_fleet();
        let same = fleet.clone().replace_monitor("ibox9999", |m| Some(m.cleared()));
        assert_eq!(same, fleet);
    }

    #[test]
    fn test_replace_monitor_declined_update_is_noop() {
        let fleet = sample_fleet();
        let same = fleet.clone().replace_monitor("ibox2101", |_| None);
        assert_eq!(same, fleet);
    }

    #[test]
    fn test_fleet_rollups() {
        let fleet = sample_fleet();
        assert_eq!(fleet.highest_severity(), Severity::Critical);
        assert_eq!(fleet.count_with(Severity::Critical), 1);
        assert_eq!(fleet.count_with(Severity::None), 1);
        assert_eq!(fleet.locked_count(), 3);

        let calm = fleet.replace_monitor("ibox3958", |_| {
            Some(EventMonitor::new(
                QueryFilter::new(),
                vec![Event::manual("NOTE", "2026-01-19 18:45:00")],
            ))
        });
        assert_eq!(calm.highest_severity(), Severity::Warning);
    }

    #[test]
    fn test_snapshot_round_trip_keeps_state() {
        let fleet = sample_fleet().replace_monitor("ibox2531", |m| {
            Some(m.toggled_preset(crate::data::Preset::Error, "2026-01-19 18:45:00"))
        });
        let restored = Fleet::from_snapshot(fleet.to_snapshot()).unwrap();
        assert_eq!(restored, fleet);
    }

    #[test]
    fn test_empty_fleet() {
        let fleet = Fleet::default();
        assert!(fleet.is_empty());
        assert_eq!(fleet.highest_severity(), Severity::None);
    }
}
