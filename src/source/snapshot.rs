//! Seed-data record shapes.
//!
//! These types match the JSON a telemetry backend (or the built-in fixture)
//! supplies: camelCase keys, the event query as a label string and an
//! advisory `highestSeverity`. Converting into [`Node`] parses the label into a
//! [`QueryFilter`] and recomputes the severity from the events.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data::{Event, EventMonitor, FleetError, Node, QueryFilter, Severity, Telemetry};

/// A complete fleet in display order.
pub type FleetSnapshot = Vec<SerializedNode>;

/// One node as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedNode {
    pub id: String,
    #[serde(flatten)]
    pub telemetry: Telemetry,
    pub event_monitor: SerializedEventMonitor,
}

/// Event monitor as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedEventMonitor {
    pub query_name: String,
    pub highest_severity: Severity,
    pub events: Vec<Event>,
}

impl TryFrom<SerializedNode> for Node {
    type Error = FleetError;

    fn try_from(node: SerializedNode) -> Result<Self, Self::Error> {
        let SerializedEventMonitor {
            query_name,
            highest_severity,
            events,
        } = node.event_monitor;

        let query = QueryFilter::from_label(&query_name).map_err(|source| {
            FleetError::InvalidQuery {
                node: node.id.clone(),
                source,
            }
        })?;
        let event_monitor = EventMonitor::new(query, events);

        if event_monitor.highest_severity() != highest_severity {
            warn!(
                node_id = %node.id,
                reported = %highest_severity,
                actual = %event_monitor.highest_severity(),
                "seed highestSeverity disagrees with events, using events"
            );
        }

        Ok(Node {
            id: node.id,
            telemetry: node.telemetry,
            event_monitor,
        })
    }
}

impl From<&Node> for SerializedNode {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            telemetry: node.telemetry.clone(),
            event_monitor: SerializedEventMonitor {
                query_name: node.event_monitor.query_label(),
                highest_severity: node.event_monitor.highest_severity(),
                events: node.event_monitor.events().to_vec(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Preset, QueryError};
    use crate::source::BUILTIN_FLEET_JSON;

    fn first_node() -> SerializedNode {
        let snapshot: FleetSnapshot = serde_json::from_str(BUILTIN_FLEET_JSON).unwrap();
        snapshot.into_iter().next().unwrap()
    }

    #[test]
    fn test_deserialize_node() {
        let node = first_node();
        assert_eq!(node.id, "ibox2101");
        assert_eq!(node.telemetry.version, "8.6.0.190");
        assert_eq!(node.telemetry.io.len(), 3);
        assert_eq!(node.event_monitor.query_name, "level=WARNING,CRITICAL");
        assert_eq!(node.event_monitor.highest_severity, Severity::Warning);
    }

    #[test]
    fn test_convert_parses_query() {
        let node = Node::try_from(first_node()).unwrap();
        assert_eq!(node.event_monitor.query().active(), &[Preset::Warning, Preset::Critical]);
        assert_eq!(node.event_monitor.highest_severity(), Severity::Warning);
    }

    #[test]
    fn test_convert_recomputes_severity() {
        let mut raw = first_node();
        raw.event_monitor.highest_severity = Severity::Critical;
        let node = Node::try_from(raw).unwrap();
        assert_eq!(node.event_monitor.highest_severity(), Severity::Warning);
    }

    #[test]
    fn test_convert_rejects_bad_query() {
        let mut raw = first_node();
        raw.event_monitor.query_name = "level=INFO".to_string();
        match Node::try_from(raw) {
            Err(FleetError::InvalidQuery { node, source }) => {
                assert_eq!(node, "ibox2101");
                assert_eq!(source, QueryError::NotAPreset("INFO".to_string()));
            }
            other => panic!("expected invalid query, got {:?}", other),
        }
    }

    #[test]
    fn test_serialize_uses_derived_label() {
        let node = Node::try_from(first_node()).unwrap();
        let value = serde_json::to_value(SerializedNode::from(&node)).unwrap();
        assert_eq!(
            value["eventMonitor"]["queryName"],
            "event.query level=WARNING,CRITICAL"
        );
        assert_eq!(value["eventMonitor"]["highestSeverity"], "WARNING");
        assert_eq!(value["saUtilsVersion"], "8.2.0.1-0");
        assert_eq!(value["rmr"]["syncAA"]["status"], "No AA-Sync");
    }
}
