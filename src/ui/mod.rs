//! Terminal UI rendering using ratatui.
//!
//! Each view lives in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`fleet`]: One row per node with telemetry, query label and severity
//! - [`event_log`]: Every event in the fleet, most urgent first
//! - [`detail`]: Modal overlay with the full telemetry of one node
//! - [`editor`]: Modal query editor (presets, manual event, clear)
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (fleet/event_log::render)            │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - editor::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod detail;
pub mod editor;
pub mod event_log;
pub mod fleet;
pub mod theme;

pub use theme::Theme;

use ratatui::layout::Rect;

/// Center a `width` x `height` rectangle inside `area`, shrinking it to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 60, 20), Rect::new(20, 10, 60, 20));
        assert_eq!(centered(area, 200, 80), area);
    }
}
