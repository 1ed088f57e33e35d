// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # sirona-console
//!
//! A terminal console for the Sirona monitoring reporting API.
//!
//! This crate renders the reports a Sirona server collects about a JVM
//! (CPU, memory and thread charts, counters, gauges, node statuses, JMX
//! MBeans, JTA transactions and web sessions) as an interactive terminal
//! dashboard. Live pages poll on a timer over a sliding query window that
//! can be paused, panned and zoomed.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │   app   │───▶│ refresh  │───▶│   ui    │───▶│ Terminal │  │
//! │  │ (state) │    │(PageState)    │(render) │    │          │  │
//! │  └────┬────┘    └────▲─────┘    └─────────┘    └──────────┘  │
//! │       │ route        │ outcomes                               │
//! │       ▼              │                                        │
//! │  ┌──────────┐   ┌────┴─────┐                                  │
//! │  │controller│──▶│  client  │◀── sirona-client (HTTP/JSON)    │
//! │  └──────────┘   └──────────┘                                  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`route`]**: Page paths such as `/gauges/<name>`, and the controller
//!   serving each
//! - **[`controller`]**: One view-model per page, fetching its panels
//!   concurrently through [`ReportingApi`](sirona_client::ReportingApi)
//! - **[`refresh`]**: Request sequencing, the polling task, and the merged
//!   [`PageState`](refresh::PageState)
//! - **[`data`]**: Query window, counters grid, CSV export, JMX tree
//! - **[`app`]**: Navigation, selection and user interaction logic
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]** and **[`logging`]**: Layered settings and file logging
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a local server
//! sirona-console --endpoint http://localhost:8080/sirona/restServices/sironaServices
//!
//! # Open the gauges page over the last 6 hours
//! sirona-console --route /gauges --window 6h
//!
//! # Write the counters report to a CSV file and exit
//! sirona-console --export-csv counters.csv --unit ms
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use sirona_client::SironaClient;
//! use sirona_console::{App, AppOptions, Route};
//!
//! # tokio_test::block_on(async {
//! let api = Arc::new(SironaClient::builder().build().unwrap());
//! let options = AppOptions {
//!     route: Route::Jvm,
//!     ..Default::default()
//! };
//! let mut app = App::new(api, options);
//! app.tick();
//! # });
//! ```
//!
//! ### Routes
//!
//! ```
//! use sirona_console::Route;
//!
//! assert_eq!(Route::parse("/threads/bWFpbg"), Route::Threads(Some("bWFpbg".into())));
//! assert_eq!(Route::parse("/nowhere"), Route::Home);
//! assert_eq!(Route::Report.path(), "/report");
//! ```

pub mod app;
pub mod config;
pub mod controller;
pub mod data;
pub mod events;
pub mod logging;
pub mod refresh;
pub mod route;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, AppOptions};
pub use config::{Overrides, Settings};
pub use data::{CsvExporter, GridState, WindowControl};
pub use refresh::{PageState, RefreshLoop, RequestSequence};
pub use route::Route;
