//! Terminal UI rendering using ratatui.
//!
//! Every frame is drawn from the [`App`](crate::app::App) state alone, so
//! the renderers hold nothing between frames.
//!
//! ## Submodules
//!
//! - [`pages`]: Page bodies, dispatched on the current route
//! - [`chart`]: Time-series line charts with a placeholder for empty data
//! - [`grid`]: Sortable, filterable counters table
//! - [`jmx`]: MBean tree, MBean detail and the invocation form
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
//! │ Page Content (pages::render)         │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - jmx::render_form
//!    - common::render_help
//! ```

pub mod chart;
pub mod common;
pub mod grid;
pub mod jmx;
pub mod pages;
pub mod theme;

pub use theme::Theme;
