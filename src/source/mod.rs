//! Where the seed fleet comes from.
//!
//! A [`FleetSource`] hands out fleet snapshots in the JSON record shape
//! described in [`snapshot`]. The dashboard ships with a built-in sample fleet
//! ([`BuiltinSource`]); a real deployment can point it at a JSON file produced
//! by a telemetry backend instead ([`FileSource`]).

mod builtin;
mod file;
mod snapshot;

pub use builtin::{builtin_nodes, BuiltinSource, BUILTIN_FLEET_JSON};
pub use file::FileSource;
pub use snapshot::{FleetSnapshot, SerializedEventMonitor, SerializedNode};

use std::fmt::Debug;

/// Trait for loading fleet snapshots.
///
/// # Example
///
/// ```
/// use ibox_overview::{BuiltinSource, FleetSource};
///
/// let mut source = BuiltinSource::new();
/// if let Some(snapshot) = source.load() {
///     println!("Got {} nodes", snapshot.len());
/// }
/// ```
pub trait FleetSource: Send + Debug {
    /// Load a full snapshot of the fleet.
    ///
    /// Returns `None` on failure; the reason is available from [`Self::error`].
    fn load(&mut self) -> Option<FleetSnapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// The error from the last failed load, if any.
    fn error(&self) -> Option<&str>;
}
