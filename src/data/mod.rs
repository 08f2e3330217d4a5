//! Fleet data model and dashboard reducers.
//!
//! ## Submodules
//!
//! - [`severity`]: [`EventLevel`], [`Severity`] and the highest-severity rule
//! - [`event`]: immutable [`Event`] records
//! - [`query`]: the structured preset filter ([`QueryFilter`]) and its label
//! - [`monitor`]: per-node [`EventMonitor`] (events + query + derived severity)
//! - [`node`]: [`Node`] and its read-only telemetry
//! - [`fleet`]: the ordered, id-keyed [`Fleet`]
//! - [`dashboard`]: [`DashboardState`] and the query editor state machine
//! - [`clock`]: where "now" comes from
//!
//! ## Data Flow
//!
//! ```text
//! FleetSource (builtin / JSON file)
//!        │
//!        ▼
//! Fleet::new()  ──▶ DashboardState::initial()
//!                          │
//!     Action ─────────────▶│ apply()
//!                          ▼
//!                  DashboardState (new value)
//! ```

pub mod clock;
pub mod dashboard;
pub mod event;
pub mod fleet;
pub mod monitor;
pub mod node;
pub mod query;
pub mod severity;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::{Action, DashboardState, EditorState};
pub use event::Event;
pub use fleet::{Fleet, FleetError};
pub use monitor::EventMonitor;
pub use node::{IoMetrics, Node, Protocol, SanityStatus, ServiceStatus, Telemetry};
pub use query::{Preset, QueryError, QueryFilter, NO_QUERY_LABEL};
pub use severity::{EventLevel, Severity};
