//! Application state and navigation logic.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use sirona_client::ReportingApi;
use sirona_types::{ApplicationStatuses, JmxInvocationResult, NodeStatusInfo, DAY_MS};
use tokio::sync::{mpsc, watch};

use crate::config::Settings;
use crate::controller::JmxController;
use crate::data::{CsvExporter, GridState, InvocationForm, TreeBrowser, WindowControl};
use crate::refresh::{PageState, RefreshLoop, RequestSequence};
use crate::route::{Route, TABS};
use crate::ui::Theme;

/// Startup options of the dashboard.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub route: Route,
    pub refresh: Duration,
    pub window_ms: i64,
    pub counters_unit: Option<String>,
    pub csv_filename: String,
    pub export_dir: PathBuf,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            route: Route::Home,
            refresh: Duration::from_secs(4),
            window_ms: DAY_MS,
            counters_unit: None,
            csv_filename: "counters.csv".to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl From<&Settings> for AppOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            route: settings.route.clone(),
            refresh: settings.refresh,
            window_ms: settings.window_ms(),
            counters_unit: settings.counters_unit.clone(),
            csv_filename: settings.csv_filename.clone(),
            export_dir: settings.export_dir.clone(),
        }
    }
}

/// Saved state for returning to a previous page.
#[derive(Debug, Clone)]
pub struct RouteState {
    pub route: Route,
    pub selected: usize,
}

/// Which list of the JMX page receives the selection keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JmxFocus {
    #[default]
    Tree,
    Operations,
}

/// Outcome of an operation invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub mbean: String,
    pub operation: String,
    /// The server's answer, or the transport error.
    pub result: Result<JmxInvocationResult, String>,
}

/// Main application state.
///
/// Each page gets its own [`RefreshLoop`]; navigating replaces it, which
/// cancels whatever the previous page still had in flight.
pub struct App {
    pub running: bool,
    pub route: Route,
    pub show_help: bool,

    api: Arc<dyn ReportingApi>,
    options: AppOptions,
    refresh: RefreshLoop,
    pub page: PageState,
    window: watch::Sender<WindowControl>,

    // Navigation state
    pub route_stack: Vec<RouteState>,
    pub selected: usize,
    focus_pending: bool,

    // Counters grid
    pub grid: GridState,
    pub filter_active: bool,
    pub exporter: CsvExporter,

    // JMX browsing
    pub tree: TreeBrowser,
    pub jmx_focus: JmxFocus,
    pub operation_index: usize,
    pub form: Option<InvocationForm>,
    pub invocation: Option<Invocation>,
    invocation_tx: mpsc::Sender<Invocation>,
    invocation_rx: mpsc::Receiver<Invocation>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create the app and start loading its first page. Must be called
    /// within a tokio runtime.
    pub fn new(api: Arc<dyn ReportingApi>, options: AppOptions) -> Self {
        Self::with_theme(api, options, Theme::auto_detect())
    }

    pub fn with_theme(api: Arc<dyn ReportingApi>, options: AppOptions, theme: Theme) -> Self {
        let (window, _) = watch::channel(WindowControl::live(options.window_ms));
        let route = options.route.clone();
        let (refresh, page) = spawn_page(&api, &route, &options, &window);
        let (invocation_tx, invocation_rx) = mpsc::channel(4);
        let exporter = CsvExporter::new(options.export_dir.clone(), options.csv_filename.clone());

        Self {
            running: true,
            show_help: false,
            focus_pending: route.param().is_some(),
            route,
            api,
            options,
            refresh,
            page,
            window,
            route_stack: Vec::new(),
            selected: 0,
            grid: GridState::default().with_height_bounds(Some(4), None),
            filter_active: false,
            exporter,
            tree: TreeBrowser::new(),
            jmx_focus: JmxFocus::default(),
            operation_index: 0,
            form: None,
            invocation: None,
            invocation_tx,
            invocation_rx,
            theme,
            status_message: None,
        }
    }

    /// Where the data comes from.
    pub fn source_description(&self) -> String {
        self.api.description()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.options.refresh
    }

    /// Whether the current page polls on a timer.
    pub fn is_live(&self) -> bool {
        self.refresh.is_live()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Apply whatever the background fetches delivered since the last call.
    pub fn tick(&mut self) {
        while let Some(outcome) = self.refresh.poll() {
            if self.page.apply(outcome) {
                self.after_load();
            }
        }
        while let Ok(invocation) = self.invocation_rx.try_recv() {
            let message = match &invocation.result {
                Ok(result) if result.is_fault() => format!("{} failed", invocation.operation),
                Ok(_) => format!("{} invoked", invocation.operation),
                Err(e) => format!("{} failed: {}", invocation.operation, e),
            };
            self.set_status_message(message);
            self.invocation = Some(invocation);
        }
    }

    fn after_load(&mut self) {
        let count = self.item_count();
        self.selected = self.selected.min(count.saturating_sub(1));
        let rows = self.grid.visible(self.page.counters()).len();
        self.grid.clamp_selection(rows);
        if let Some(info) = self.page.mbean() {
            self.operation_index = self
                .operation_index
                .min(info.operations.len().saturating_sub(1));
        }

        if !self.focus_pending {
            return;
        }
        self.focus_pending = false;
        let Some(param) = self.route.param() else {
            return;
        };
        let position = match &self.route {
            Route::Threads(_) => self
                .page
                .threads()
                .iter()
                .position(|t| t.encoded_name == param || t.name == param),
            Route::Gauges(_) => self
                .page
                .gauges()
                .iter()
                .position(|g| g.encoded_name == param || g.name == param),
            Route::Status(_) => status_nodes(self.page.statuses())
                .iter()
                .position(|(_, node)| node.name == param),
            Route::Jmx(_) => {
                if let Some(tree) = self.page.jmx_tree() {
                    self.tree.reveal(tree, param);
                }
                None
            }
            _ => None,
        };
        if let Some(position) = position {
            self.selected = position;
        }
    }

    /// Open `route`, remembering the current page for [`App::go_back`].
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            self.refresh_now();
            return;
        }
        self.route_stack.push(RouteState {
            route: self.route.clone(),
            selected: self.selected,
        });
        self.open(route, 0);
    }

    /// Switch to a top-level page. Page switches start a new history.
    pub fn set_page(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        self.route_stack.clear();
        self.open(route, 0);
    }

    /// Switch to the page of tab `index` (0-based).
    pub fn select_tab(&mut self, index: usize) {
        if let Some(route) = TABS.get(index) {
            self.set_page(route.clone());
        }
    }

    pub fn next_page(&mut self) {
        self.set_page(self.route.next());
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.route.prev());
    }

    fn open(&mut self, route: Route, selected: usize) {
        tracing::info!(from = %self.route, to = %route, "navigating");
        let (refresh, page) = spawn_page(&self.api, &route, &self.options, &self.window);
        // Dropping the previous loop cancels its fetches
        self.refresh = refresh;
        self.page = page;

        if route.page() != self.route.page() {
            self.filter_active = false;
            self.grid.selected = 0;
            self.jmx_focus = JmxFocus::Tree;
        }
        self.operation_index = 0;
        self.form = None;
        self.focus_pending = route.param().is_some();
        self.route = route;
        self.selected = selected;
    }

    /// Navigate back: close the form first, then pop the history, then
    /// leave the focused item.
    pub fn go_back(&mut self) {
        if self.form.is_some() {
            self.form = None;
            return;
        }
        if let Some(state) = self.route_stack.pop() {
            self.open(state.route, state.selected);
            return;
        }
        if self.route.param().is_some() {
            let page = self.route.page();
            self.open(page, self.selected);
        }
    }

    /// Get breadcrumb trail for current navigation.
    pub fn breadcrumb(&self) -> String {
        let mut parts: Vec<String> = self.route_stack.iter().map(|s| s.route.path()).collect();
        parts.push(self.route.path());
        parts.join(" > ")
    }

    /// Fetch the current page now, in addition to any polling.
    pub fn refresh_now(&mut self) {
        self.refresh.refresh_now();
    }

    pub fn window(&self) -> WindowControl {
        *self.window.borrow()
    }

    fn update_window(&mut self, change: impl FnOnce(WindowControl) -> WindowControl) {
        let next = change(self.window());
        tracing::debug!(?next, "query window changed");
        self.window.send_replace(next);
        self.refresh_now();
    }

    /// Pan the query window by half its span.
    pub fn shift_window(&mut self, forward: bool) {
        self.update_window(|w| w.shift(forward));
    }

    pub fn zoom_window(&mut self, zoom_in: bool) {
        self.update_window(|w| w.zoom(zoom_in));
    }

    pub fn window_to_now(&mut self) {
        self.update_window(WindowControl::snap_to_now);
    }

    /// Number of selectable items on the current page.
    pub fn item_count(&self) -> usize {
        match &self.route {
            Route::Threads(_) => self.page.threads().len(),
            Route::Gauges(_) => self.page.gauges().len(),
            Route::Status(_) => status_nodes(self.page.statuses()).len(),
            Route::Report => self.grid.visible(self.page.counters()).len(),
            Route::Jmx(_) => match self.jmx_focus {
                JmxFocus::Tree => self.page.jmx_tree().map_or(0, |t| self.tree.rows(t).len()),
                JmxFocus::Operations => self.page.mbean().map_or(0, |m| m.operations.len()),
            },
            _ => 0,
        }
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let count = self.item_count();
        let max = count.saturating_sub(1);
        match (&self.route, self.jmx_focus) {
            (Route::Report, _) => self.grid.select_next_n(n, count),
            (Route::Jmx(_), JmxFocus::Tree) => self.tree.select_next_n(n, count),
            (Route::Jmx(_), JmxFocus::Operations) => {
                self.operation_index = (self.operation_index + n).min(max)
            }
            _ => self.selected = (self.selected + n).min(max),
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match (&self.route, self.jmx_focus) {
            (Route::Report, _) => self.grid.select_prev_n(n),
            (Route::Jmx(_), JmxFocus::Tree) => self.tree.select_prev_n(n),
            (Route::Jmx(_), JmxFocus::Operations) => {
                self.operation_index = self.operation_index.saturating_sub(n)
            }
            _ => self.selected = self.selected.saturating_sub(n),
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.select_prev_n(usize::MAX);
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.select_next_n(usize::MAX / 2);
    }

    /// Open the selected item: a thread, gauge, node or MBean. On a JMX
    /// tree branch this expands or collapses it instead.
    pub fn open_selected(&mut self) {
        if matches!(self.route, Route::Jmx(_)) && self.jmx_focus == JmxFocus::Operations {
            self.open_invocation_form();
            return;
        }
        let target = match &self.route {
            Route::Threads(_) => self
                .page
                .threads()
                .get(self.selected)
                .map(|t| Route::Threads(Some(item_id(&t.encoded_name, &t.name)))),
            Route::Gauges(_) => self
                .page
                .gauges()
                .get(self.selected)
                .map(|g| Route::Gauges(Some(item_id(&g.encoded_name, &g.name)))),
            Route::Status(_) => status_nodes(self.page.statuses())
                .get(self.selected)
                .map(|(_, node)| Route::Status(Some(node.name.clone()))),
            Route::Jmx(_) => match self.page.jmx_tree() {
                Some(tree) => self.tree.activate(tree).map(|encoded| Route::Jmx(Some(encoded))),
                None => None,
            },
            _ => None,
        };
        if let Some(route) = target {
            self.navigate(route);
        }
    }

    /// Collapse the selected tree branch, or select its parent.
    pub fn collapse_selected(&mut self) {
        if let Some(tree) = self.page.jmx_tree() {
            self.tree.collapse(tree);
        }
    }

    /// Expand the selected tree branch without opening it.
    pub fn expand_selected(&mut self) {
        if let Some(tree) = self.page.jmx_tree() {
            self.tree.expand(tree);
        }
    }

    /// Move the selection keys between the MBean tree and its operations.
    pub fn toggle_jmx_focus(&mut self) {
        self.jmx_focus = match self.jmx_focus {
            JmxFocus::Tree if self.page.mbean().is_some() => JmxFocus::Operations,
            _ => JmxFocus::Tree,
        };
    }

    /// Start collecting parameters for the selected operation.
    pub fn open_invocation_form(&mut self) {
        let mbean = match &self.route {
            Route::Jmx(Some(mbean)) => mbean.clone(),
            _ => {
                self.set_status_message("Select an MBean first".to_string());
                return;
            }
        };
        let operation = self
            .page
            .mbean()
            .and_then(|info| info.operations.get(self.operation_index))
            .cloned();
        match operation {
            Some(operation) => self.form = Some(InvocationForm::new(mbean, operation)),
            None => self.set_status_message("No operation to invoke".to_string()),
        }
    }

    /// Send the invocation form. The result arrives through [`App::tick`].
    pub fn submit_invocation(&mut self) {
        let Some(form) = self.form.take() else {
            return;
        };
        let request = form.to_request();
        let controller = JmxController::new(self.api.clone(), Some(form.mbean));
        let sender = self.invocation_tx.clone();
        self.set_status_message(format!("Invoking {}...", request.operation_name));

        tokio::spawn(async move {
            let result = controller
                .invoke(
                    &request.mbean_encoded_name,
                    &request.operation_name,
                    request.parameters.clone(),
                )
                .await
                .map_err(|e| e.to_string());
            let _ = sender
                .send(Invocation {
                    mbean: request.mbean_encoded_name,
                    operation: request.operation_name,
                    result,
                })
                .await;
        });
    }

    /// The last invocation, if it targeted the MBean on screen.
    pub fn current_invocation(&self) -> Option<&Invocation> {
        let mbean = match &self.route {
            Route::Jmx(Some(mbean)) => mbean,
            _ => return None,
        };
        self.invocation.as_ref().filter(|i| &i.mbean == mbean)
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next sort column of the counters grid.
    pub fn cycle_sort(&mut self) {
        self.grid.cycle_sort();
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        self.grid.toggle_sort_direction();
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.grid.filter_text.clear();
        self.grid.selected = 0;
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.grid.filter_text.push(c);
        self.grid.selected = 0;
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.grid.filter_text.pop();
        self.grid.selected = 0;
    }

    /// Write the counters as currently filtered and sorted to the export
    /// file.
    pub fn export_csv(&mut self) -> Result<PathBuf> {
        if !self.page.is_loaded() {
            anyhow::bail!("No counters to export");
        }
        let rows = self.grid.visible(self.page.counters());
        let fingerprint = self.grid.fingerprint(self.page.applied(), &rows);
        let grid = &self.grid;
        self.exporter.write(fingerprint, || grid.export(&rows))
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

fn spawn_page(
    api: &Arc<dyn ReportingApi>,
    route: &Route,
    options: &AppOptions,
    window: &watch::Sender<WindowControl>,
) -> (RefreshLoop, PageState) {
    let sequence = RequestSequence::new();
    let controller = route.controller(api.clone(), options.counters_unit.as_deref());
    let refresh = RefreshLoop::spawn(
        controller,
        window.subscribe(),
        sequence.clone(),
        options.refresh,
    );
    (refresh, PageState::new(route.clone(), sequence))
}

// Route parameter of a listed item: its encoded name when the server sent one.
pub(crate) fn item_id(encoded: &str, name: &str) -> String {
    if encoded.is_empty() {
        name.to_string()
    } else {
        encoded.to_string()
    }
}

/// Every node of every application, in display order.
pub fn status_nodes(statuses: &[ApplicationStatuses]) -> Vec<(&str, &NodeStatusInfo)> {
    statuses
        .iter()
        .flat_map(|app| app.nodes.iter().map(move |node| (app.name.as_str(), node)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::FakeApi;
    use sirona_types::{
        CounterRow, JmxNode, MBeanInformations, MBeanOperation, MBeanParameter, ThreadInfo,
    };

    fn app(fake: &Arc<FakeApi>, route: Route) -> App {
        let options = AppOptions {
            route,
            ..Default::default()
        };
        App::with_theme(fake.clone(), options, Theme::dark())
    }

    async fn settle(app: &mut App) {
        tokio::time::sleep(Duration::from_millis(10)).await;
        app.tick();
    }

    fn thread(name: &str) -> ThreadInfo {
        ThreadInfo {
            name: name.into(),
            encoded_name: format!("enc-{name}"),
        }
    }

    fn counter(name: &str, hits: f64) -> CounterRow {
        CounterRow {
            name: name.into(),
            role_name: "performances".into(),
            unit_name: "ns".into(),
            hits,
            ..Default::default()
        }
    }

    fn jmx_tree() -> JmxNode {
        JmxNode {
            name: "/".into(),
            children: Some(vec![JmxNode {
                name: "java.lang".into(),
                children: Some(vec![JmxNode {
                    name: "type=Memory".into(),
                    base64: Some("bWVt".into()),
                    leaf: Some(true),
                    ..Default::default()
                }]),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_thread_and_go_back() {
        let fake = Arc::new(FakeApi::new());
        fake.threads
            .lock()
            .unwrap()
            .extend([thread("main"), thread("worker")]);
        let mut app = app(&fake, Route::Threads(None));
        settle(&mut app).await;
        assert_eq!(app.item_count(), 2);

        app.select_next();
        app.open_selected();
        assert_eq!(app.route, Route::Threads(Some("enc-worker".into())));
        assert_eq!(app.breadcrumb(), "/threads > /threads/enc-worker");

        settle(&mut app).await;
        assert_eq!(app.selected, 1);
        assert_eq!(fake.call_count("thread"), 1);

        app.go_back();
        assert_eq!(app.route, Route::Threads(None));
        assert_eq!(app.selected, 1);
        assert!(app.route_stack.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_switch_resets_history() {
        let fake = Arc::new(FakeApi::new());
        let mut app = app(&fake, Route::Home);
        app.navigate(Route::Gauges(Some("cpu".into())));
        assert_eq!(app.route_stack.len(), 1);

        app.next_page();
        assert_eq!(app.route, Route::Status(None));
        assert!(app.route_stack.is_empty());

        app.select_tab(0);
        assert_eq!(app.route, Route::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_page_results_are_dropped_on_navigation() {
        let fake = Arc::new(FakeApi::new());
        fake.set_delay(Some(Duration::from_secs(1)));
        let mut app = app(&fake, Route::Jvm);
        tokio::time::sleep(Duration::from_millis(10)).await;

        app.set_page(Route::Jta);
        tokio::time::sleep(Duration::from_secs(2)).await;
        app.tick();
        assert_eq!(app.page.route(), &Route::Jta);
        assert!(app.page.is_loaded());
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_change_refetches() {
        let fake = Arc::new(FakeApi::new());
        let mut app = app(&fake, Route::Sessions);
        settle(&mut app).await;
        let before = fake.call_count("sessions");

        app.shift_window(false);
        assert!(!app.window().is_live());
        settle(&mut app).await;
        assert!(fake.call_count("sessions") > before);

        app.window_to_now();
        assert!(app.window().is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_writes_filtered_counters() {
        let dir = tempfile::tempdir().unwrap();
        let fake = Arc::new(FakeApi::new());
        fake.counters
            .lock()
            .unwrap()
            .extend([counter("checkout", 3.0), counter("cart", 1.0)]);
        let options = AppOptions {
            route: Route::Report,
            export_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let mut app = App::with_theme(fake.clone(), options, Theme::dark());
        assert!(app.export_csv().is_err());

        settle(&mut app).await;
        app.filter_push('c');
        app.filter_push('a');
        app.filter_push('r');
        let path = app.export_csv().unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("\"Counter\",\"Role\""));
        assert!(written.contains("\"cart\",\"performances (ns)\",\"1\""));
        assert!(!written.contains("checkout"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_jmx_reveal_and_invoke() {
        let fake = Arc::new(FakeApi::new());
        *fake.tree.lock().unwrap() = Some(jmx_tree());
        fake.mbeans.lock().unwrap().insert(
            "bWVt".into(),
            MBeanInformations {
                object_name: "java.lang:type=Memory".into(),
                operations: vec![MBeanOperation {
                    name: "gc".into(),
                    return_type: "void".into(),
                    parameters: vec![MBeanParameter {
                        name: "p0".into(),
                        kind: "int".into(),
                    }],
                }],
                ..Default::default()
            },
        );
        fake.invocation.lock().unwrap().results = Some(vec!["done".into()]);

        let mut app = app(&fake, Route::Jmx(Some("bWVt".into())));
        settle(&mut app).await;
        let tree = app.page.jmx_tree().unwrap().clone();
        let row = app.tree.selected_row(&tree).unwrap();
        assert_eq!(row.encoded.as_deref(), Some("bWVt"));

        app.toggle_jmx_focus();
        assert_eq!(app.jmx_focus, JmxFocus::Operations);
        app.open_selected();
        let form = app.form.as_mut().unwrap();
        form.push('4');
        form.push('2');
        app.submit_invocation();
        settle(&mut app).await;

        let invocation = app.current_invocation().unwrap();
        assert_eq!(invocation.operation, "gc");
        assert_eq!(invocation.result.as_ref().unwrap().lines(), vec!["done"]);
        let sent = fake.invocations.lock().unwrap().clone();
        assert_eq!(sent[0].parameters, vec!["42"]);
    }

    #[test]
    fn test_status_nodes_flatten_in_order() {
        let statuses = vec![
            ApplicationStatuses {
                name: "shop".into(),
                nodes: vec![
                    NodeStatusInfo {
                        name: "n1".into(),
                        ..Default::default()
                    },
                    NodeStatusInfo {
                        name: "n2".into(),
                        ..Default::default()
                    },
                ],
            },
            ApplicationStatuses {
                name: "admin".into(),
                nodes: vec![NodeStatusInfo {
                    name: "n3".into(),
                    ..Default::default()
                }],
            },
        ];
        let nodes: Vec<_> = status_nodes(&statuses)
            .into_iter()
            .map(|(app, node)| format!("{app}/{}", node.name))
            .collect();
        assert_eq!(nodes, ["shop/n1", "shop/n2", "admin/n3"]);
    }
}
