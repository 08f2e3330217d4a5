// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # ibox-overview
//!
//! A terminal dashboard for a fleet of ibox storage systems.
//!
//! Each system (a [`Node`]) carries read-only telemetry and an
//! [`EventMonitor`]: a severity filter built from level presets, the events
//! that filter produced, and the highest severity among them. Operators edit
//! one node's filter at a time through a modal query editor, add manual events,
//! or clear a node's events. Every change flows through
//! [`DashboardState::apply`], which consumes the old state and returns the new
//! one.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(reducers)│    │(render) │    │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── BuiltinSource | FileSource                  │
//! │  │ (seed)  │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`source`]**: Seed data ([`FleetSource`] trait) from the built-in sample
//!   fleet or a JSON file
//! - **[`data`]**: Severity model, event monitors, the fleet and the query
//!   editor state machine
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (defaults, TOML file, environment)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Built-in sample fleet
//! ibox-overview
//!
//! # Fleet written by a telemetry backend
//! ibox-overview --fixture fleet.json
//!
//! # Dump the fleet with a severity summary and exit
//! ibox-overview --export fleet_export.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use ibox_overview::{Action, DashboardState, Fleet, Preset, Severity};
//! use ibox_overview::source::builtin_nodes;
//!
//! let fleet = Fleet::new(builtin_nodes().unwrap()).unwrap();
//! let now = Utc.with_ymd_and_hms(2026, 1, 19, 18, 45, 0).unwrap();
//!
//! let state = DashboardState::initial(fleet)
//!     .apply(Action::OpenEditor("ibox2531".into()), now)
//!     .apply(Action::TogglePreset(Preset::Error), now);
//!
//! let node = state.fleet.get("ibox2531").unwrap();
//! assert_eq!(node.event_monitor.highest_severity(), Severity::Critical);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{
    Action, Clock, DashboardState, EditorState, Event, EventLevel, EventMonitor, Fleet,
    FleetError, FixedClock, Node, Preset, QueryFilter, Severity, SystemClock,
};
pub use source::{BuiltinSource, FileSource, FleetSnapshot, FleetSource, SerializedNode};
