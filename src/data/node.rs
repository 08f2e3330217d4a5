//! Fleet members and their read-only telemetry.

use serde::{Deserialize, Serialize};

use super::monitor::EventMonitor;

/// Capacity percentage above which the usage bar turns amber.
pub const CAPACITY_WARNING_PERCENT: f64 = 70.0;

/// I/O latency (ms) above which the value is highlighted.
pub const LATENCY_WARNING_MS: f64 = 10.0;

/// One monitored storage system.
///
/// `id` is the only stable key. Telemetry is display data; the event monitor
/// is the only part that changes while the dashboard runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub telemetry: Telemetry,
    pub event_monitor: EventMonitor,
}

impl Node {
    pub fn is_locked(&self) -> bool {
        self.telemetry.supervisor.is_locked
    }

    pub fn sanity_failed(&self) -> bool {
        self.telemetry.sanity.status == SanityStatus::Failed
    }

    /// A copy of this node with its event monitor replaced.
    pub fn with_monitor(self, event_monitor: EventMonitor) -> Self {
        Self {
            event_monitor,
            ..self
        }
    }
}

/// Everything a node reports besides its events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    pub version: String,
    pub sa_utils_version: String,
    pub encryption: Encryption,
    pub supervisor: Supervisor,
    pub last_event: LastEvent,
    pub capacity: Capacity,
    pub io: Vec<IoMetrics>,
    pub services: Services,
    pub networking: Networking,
    pub rmr: Replication,
    pub upgrade: Upgrade,
    pub sanity: Sanity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncryptionStatus {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encryption {
    pub status: EncryptionStatus,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Encryption {
    /// `FIPS`, `Enabled` or `Disabled`.
    pub fn display(&self) -> &str {
        match self.status {
            EncryptionStatus::Enabled => self.kind.as_deref().unwrap_or("Enabled"),
            EncryptionStatus::Disabled => "Disabled",
        }
    }
}

/// Ownership and lock state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supervisor {
    pub email: String,
    pub tl: String,
    pub locking_email: String,
    pub locking_reason: String,
    pub is_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastEvent {
    pub relative: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    pub percentage: f64,
    pub used: String,
}

impl Capacity {
    pub fn is_high(&self) -> bool {
        self.percentage > CAPACITY_WARNING_PERCENT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    #[serde(rename = "NAS")]
    Nas,
    #[serde(rename = "SAN")]
    San,
    S3,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Nas => "NAS",
            Protocol::San => "SAN",
            Protocol::S3 => "S3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoMetrics {
    pub protocol: Protocol,
    pub iops: u64,
    pub throughput: String,
    pub latency: String,
}

impl IoMetrics {
    /// Numeric part of the latency string (`"41.766 ms"` -> 41.766).
    pub fn latency_ms(&self) -> Option<f64> {
        self.latency.split_whitespace().next()?.parse().ok()
    }

    pub fn is_slow(&self) -> bool {
        self.latency_ms().is_some_and(|ms| ms > LATENCY_WARNING_MS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    Active,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Services {
    pub status: ServiceStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Networking {
    pub eth: String,
    pub fc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationLink {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Remote mirroring (RMR) state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replication {
    #[serde(rename = "async")]
    pub async_link: ReplicationLink,
    #[serde(rename = "syncAA")]
    pub sync_aa: ReplicationLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUpgradeTime {
    pub node: String,
    pub time: String,
}

impl NodeUpgradeTime {
    /// `-` means the controller has no recorded upgrade.
    pub fn display_time(&self) -> &str {
        if self.time == "-" {
            "No Data"
        } else {
            &self.time
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    pub path: String,
    pub nodes: Vec<NodeUpgradeTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SanityStatus {
    Success,
    Failed,
    Warning,
    #[serde(rename = "Can't Read")]
    CantRead,
}

impl SanityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SanityStatus::Success => "Success",
            SanityStatus::Failed => "Failed",
            SanityStatus::Warning => "Warning",
            SanityStatus::CantRead => "Can't Read",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sanity {
    pub status: SanityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hw_status: Option<String>,
    pub last_sanity: String,
    pub log_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_time: Option<String>,
}

impl Sanity {
    /// When the last sanity run happened, for display.
    ///
    /// Prefers the relative time, then up to eight characters following
    /// `sanity.` in the log path (the `YYYYMMDD` stamp), then `Unknown`.
    pub fn last_run(&self) -> &str {
        if let Some(relative) = self.relative_time.as_deref() {
            return relative;
        }
        self.last_sanity
            .split_once("sanity.")
            .map(|(_, rest)| {
                let end = rest.char_indices().nth(8).map_or(rest.len(), |(i, _)| i);
                &rest[..end]
            })
            .filter(|stamp| !stamp.is_empty())
            .unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanity(last: &str, relative: Option<&str>) -> Sanity {
        Sanity {
            status: SanityStatus::CantRead,
            hw_status: None,
            last_sanity: last.to_string(),
            log_path: String::new(),
            relative_time: relative.map(str::to_string),
        }
    }

    #[test]
    fn test_sanity_last_run() {
        assert_eq!(sanity("2026-01-05 08:56:13", Some("14 days ago")).last_run(), "14 days ago");
        assert_eq!(
            sanity("/var/log/sa-utils/script/sanity.20260115-124038.log", None).last_run(),
            "20260115"
        );
        assert_eq!(sanity("2026-01-05 08:56:13", None).last_run(), "Unknown");
        assert_eq!(sanity("/var/log/sanity.", None).last_run(), "Unknown");
    }

    #[test]
    fn test_sanity_last_run_short_stamp() {
        assert_eq!(sanity("/var/log/sanity.2026", None).last_run(), "2026");
        assert_eq!(sanity("sanity.2026ü0115x", None).last_run(), "2026ü011");
    }

    #[test]
    fn test_latency_parsing() {
        let io = IoMetrics {
            protocol: Protocol::San,
            iops: 36095,
            throughput: "4.00 GB/s".to_string(),
            latency: "41.766 ms".to_string(),
        };
        assert_eq!(io.latency_ms(), Some(41.766));
        assert!(io.is_slow());

        let idle = IoMetrics {
            latency: "-".to_string(),
            ..io
        };
        assert_eq!(idle.latency_ms(), None);
        assert!(!idle.is_slow());
    }

    #[test]
    fn test_encryption_display() {
        let fips = Encryption {
            status: EncryptionStatus::Enabled,
            kind: Some("FIPS".to_string()),
        };
        let plain = Encryption {
            status: EncryptionStatus::Enabled,
            kind: None,
        };
        let off = Encryption {
            status: EncryptionStatus::Disabled,
            kind: None,
        };
        assert_eq!(fips.display(), "FIPS");
        assert_eq!(plain.display(), "Enabled");
        assert_eq!(off.display(), "Disabled");
    }

    #[test]
    fn test_upgrade_time_placeholder() {
        let time = NodeUpgradeTime {
            node: "N1".to_string(),
            time: "-".to_string(),
        };
        assert_eq!(time.display_time(), "No Data");
    }

    #[test]
    fn test_deserialize_sanity_status() {
        let status: SanityStatus = serde_json::from_str(r#""Can't Read""#).unwrap();
        assert_eq!(status, SanityStatus::CantRead);
    }
}
