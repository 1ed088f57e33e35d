//! Page routes, as paths such as `/gauges/cpu` or `/jmx/<encoded>`.

use std::fmt;
use std::sync::Arc;

use sirona_client::ReportingApi;

use crate::controller::{
    Controller, CountersController, GaugesController, HomeController, JmxController,
    JtaController, JvmController, SessionsController, StatusController, ThreadsController,
};

/// A page, optionally focused on one item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    Jvm,
    Threads(Option<String>),
    Report,
    Gauges(Option<String>),
    Status(Option<String>),
    Jmx(Option<String>),
    Jta,
    Sessions,
}

/// Top-level pages in tab order.
pub const TABS: [Route; 9] = [
    Route::Home,
    Route::Jvm,
    Route::Threads(None),
    Route::Report,
    Route::Gauges(None),
    Route::Status(None),
    Route::Jmx(None),
    Route::Jta,
    Route::Sessions,
];

impl Route {
    /// Parse a path. Anything unrecognised is the home page.
    pub fn parse(path: &str) -> Self {
        let path = path.trim().trim_start_matches('#');
        let mut parts = path.trim_matches('/').splitn(2, '/');
        let page = parts.next().unwrap_or("");
        let rest = parts.next().map(|p| p.trim_end_matches('/'));
        if rest.is_some_and(|p| p.contains('/')) {
            return Route::Home;
        }
        let param = rest.filter(|p| !p.is_empty()).map(str::to_string);

        match (page, param) {
            ("jvm", None) => Route::Jvm,
            ("threads", p) => Route::Threads(p),
            ("report", None) => Route::Report,
            ("gauges", p) => Route::Gauges(p),
            ("status", p) => Route::Status(p),
            ("jmx", p) => Route::Jmx(p),
            ("jta", None) => Route::Jta,
            ("sessions", None) => Route::Sessions,
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        let (page, param) = match self {
            Route::Home => ("home", None),
            Route::Jvm => ("jvm", None),
            Route::Threads(p) => ("threads", p.as_deref()),
            Route::Report => ("report", None),
            Route::Gauges(p) => ("gauges", p.as_deref()),
            Route::Status(p) => ("status", p.as_deref()),
            Route::Jmx(p) => ("jmx", p.as_deref()),
            Route::Jta => ("jta", None),
            Route::Sessions => ("sessions", None),
        };
        match param {
            Some(param) => format!("/{page}/{param}"),
            None => format!("/{page}"),
        }
    }

    /// Tab label of the page this route belongs to.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Jvm => "JVM",
            Route::Threads(_) => "Threads",
            Route::Report => "Counters",
            Route::Gauges(_) => "Gauges",
            Route::Status(_) => "Status",
            Route::Jmx(_) => "JMX",
            Route::Jta => "JTA",
            Route::Sessions => "Sessions",
        }
    }

    /// Position of this route's page in [`TABS`].
    pub fn tab_index(&self) -> usize {
        match self {
            Route::Home => 0,
            Route::Jvm => 1,
            Route::Threads(_) => 2,
            Route::Report => 3,
            Route::Gauges(_) => 4,
            Route::Status(_) => 5,
            Route::Jmx(_) => 6,
            Route::Jta => 7,
            Route::Sessions => 8,
        }
    }

    /// The page without its focused item.
    pub fn page(&self) -> Route {
        TABS[self.tab_index()].clone()
    }

    /// Cycle to the next page.
    pub fn next(&self) -> Route {
        TABS[(self.tab_index() + 1) % TABS.len()].clone()
    }

    /// Cycle to the previous page.
    pub fn prev(&self) -> Route {
        TABS[(self.tab_index() + TABS.len() - 1) % TABS.len()].clone()
    }

    /// The focused item, if any.
    pub fn param(&self) -> Option<&str> {
        match self {
            Route::Threads(p) | Route::Gauges(p) | Route::Status(p) | Route::Jmx(p) => {
                p.as_deref()
            }
            _ => None,
        }
    }

    /// Build the controller for this page.
    pub fn controller(
        &self,
        api: Arc<dyn ReportingApi>,
        counters_unit: Option<&str>,
    ) -> Arc<dyn Controller> {
        match self {
            Route::Home => Arc::new(HomeController::new(api)),
            Route::Jvm => Arc::new(JvmController::new(api)),
            Route::Threads(thread) => Arc::new(ThreadsController::new(api, thread.clone())),
            Route::Report => Arc::new(CountersController::new(
                api,
                counters_unit.map(str::to_string),
            )),
            Route::Gauges(gauge) => Arc::new(GaugesController::new(api, gauge.clone())),
            Route::Status(node) => Arc::new(StatusController::new(api, node.clone())),
            Route::Jmx(mbean) => Arc::new(JmxController::new(api, mbean.clone())),
            Route::Jta => Arc::new(JtaController::new(api)),
            Route::Sessions => Arc::new(SessionsController::new(api)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
