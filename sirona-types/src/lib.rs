//! # sirona-types
//!
//! Wire types for the Sirona reporting REST API. Every payload the console
//! consumes is described here, together with the one piece of real logic on
//! the data path: turning a server-side `timestamp -> value` mapping into an
//! ordered list of chart points.
//!
//! ## Example
//!
//! ```rust
//! use sirona_types::{Graph, Series};
//!
//! let json = r#"{"label":"CPU","data":{"100":1.5,"200":2.0}}"#;
//! let graph: Graph = serde_json::from_str(json).unwrap();
//!
//! let series = Series::from_graph(Some(graph));
//! assert_eq!(series.label, "CPU");
//! assert_eq!(series.points.len(), 2);
//! assert_eq!(series.points[0].timestamp, 100);
//! assert_eq!(series.points[1].value, 2.0);
//! ```
//!
//! A `null` payload is not an error, it is an empty series:
//!
//! ```rust
//! use sirona_types::Series;
//!
//! let series = Series::from_graph(None);
//! assert!(series.is_empty());
//! ```

mod counters;
mod environment;
mod gauges;
mod jmx;
mod series;
mod status;
mod window;

pub use counters::*;
pub use environment::*;
pub use gauges::*;
pub use jmx::*;
pub use series::*;
pub use status::*;
pub use window::*;
