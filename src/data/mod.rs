//! Client-side data handling that is independent of rendering.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "4s", "24h")
//! - [`window`]: Live or pinned query window, with pan and zoom
//! - [`grid`]: Column definitions and filter/sort/selection of the counters grid
//! - [`csv`]: CSV serialization of grid rows and the cached exporter
//! - [`jmx_tree`]: MBean tree browsing and the invocation form

pub mod csv;
pub mod duration;
pub mod grid;
pub mod jmx_tree;
pub mod window;

pub use csv::{CsvExporter, FieldOverrides};
pub use grid::{ColumnDef, GridState};
pub use jmx_tree::{InvocationForm, TreeBrowser, TreeRow};
pub use window::WindowControl;
