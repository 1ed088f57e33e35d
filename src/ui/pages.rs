//! Page bodies, one renderer per route.

use std::collections::BTreeMap;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};
use serde_json::Value;
use sirona_client::GraphReport;
use sirona_types::{MemoryInfo, OsInfo, Series};

use crate::app::{item_id, status_nodes, App};
use crate::controller::{Panel, JTA_REPORTS, JVM_REPORTS};
use crate::data::csv::stringify;
use crate::route::Route;
use crate::ui::chart::{format_timestamp, render_chart, ChartView};
use crate::ui::{grid, jmx};

/// Render the body of the current page.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match &app.route {
        Route::Home => render_home(frame, app, area),
        Route::Jvm => render_jvm(frame, app, area),
        Route::Threads(_) => render_threads(frame, app, area),
        Route::Report => grid::render(frame, app, area),
        Route::Gauges(_) => render_gauges(frame, app, area),
        Route::Status(_) => render_status(frame, app, area),
        Route::Jmx(_) => jmx::render(frame, app, area),
        Route::Jta => render_charts(frame, app, area, &JTA_REPORTS),
        Route::Sessions => render_sessions(frame, app, area),
    }
}

fn block<'a>(app: &App, title: String) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn titled(app: &App, title: &str, panel: Panel) -> Block<'static> {
    let mut block = block(app, format!(" {} ", title));
    if let Some(error) = app.page.error(panel) {
        block = block.title_bottom(Line::styled(format!(" {} ", error), app.theme.error_style()));
    }
    block
}

fn placeholder(app: &App) -> Line<'static> {
    let text = if app.page.is_loaded() {
        "no data"
    } else {
        "Loading..."
    };
    Line::styled(text, Style::default().add_modifier(Modifier::DIM))
}

/// Bytes in the largest unit that keeps the value above one.
pub fn format_bytes(bytes: i64) -> String {
    if bytes < 0 {
        return "-".to_string();
    }
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<18}", label),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::raw(value),
    ])
}

fn extra_fields(extra: &BTreeMap<String, Value>) -> impl Iterator<Item = Line<'static>> + '_ {
    extra.iter().map(|(key, value)| field(key, stringify(value)))
}

fn os_lines(os: &OsInfo) -> Vec<Line<'static>> {
    let mut lines = vec![
        field("Name", os.name.clone()),
        field("Version", os.version.clone()),
        field("Architecture", os.arch.clone()),
        field("Processors", os.number_processor.to_string()),
    ];
    lines.extend(extra_fields(&os.extra));
    lines
}

fn memory_lines(memory: &MemoryInfo) -> Vec<Line<'static>> {
    let mut lines = vec![
        field("Max heap", format_bytes(memory.max_memory)),
        field("Initial heap", format_bytes(memory.init_memory)),
        field("Max non heap", format_bytes(memory.max_non_heap_memory)),
        field("Initial non heap", format_bytes(memory.init_non_heap_memory)),
    ];
    lines.extend(extra_fields(&memory.extra));
    lines
}

fn render_environment(frame: &mut Frame, app: &App, area: Rect) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let os = app
        .page
        .os()
        .map_or_else(|| vec![placeholder(app)], os_lines);
    frame.render_widget(
        Paragraph::new(os).block(titled(app, Panel::Os.title(), Panel::Os)),
        chunks[0],
    );

    let memory = app
        .page
        .memory()
        .map_or_else(|| vec![placeholder(app)], memory_lines);
    frame.render_widget(
        Paragraph::new(memory).block(titled(app, Panel::Memory.title(), Panel::Memory)),
        chunks[1],
    );
}

fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(8), Constraint::Min(3)]).split(area);
    render_environment(frame, app, chunks[0]);

    let statuses = app.page.statuses();
    let header = Row::new(vec!["Application", "Status", "Nodes"])
        .height(1)
        .style(app.theme.header);
    let rows: Vec<Row> = statuses
        .iter()
        .map(|application| {
            let status = application.status();
            Row::new(vec![
                Cell::from(application.name.clone()),
                Cell::from(Span::styled(status.symbol(), app.theme.status_style(status))),
                Cell::from(application.nodes.len().to_string()),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [Constraint::Fill(3), Constraint::Fill(1), Constraint::Fill(1)],
    )
    .header(header)
    .block(titled(
        app,
        &format!("Applications ({})", statuses.len()),
        Panel::Statuses,
    ));
    frame.render_widget(table, chunks[1]);
}

fn chart_title(series: Option<&Series>, report: GraphReport) -> &str {
    match series {
        Some(series) if !series.label.is_empty() => &series.label,
        _ => report.title(),
    }
}

fn render_report_chart(frame: &mut Frame, app: &App, area: Rect, report: GraphReport) {
    let panel = Panel::Graph(report);
    let series = app.page.series(panel);
    let data = series.map(std::slice::from_ref).unwrap_or_default();
    let view = ChartView::new(chart_title(series, report), data)
        .error(app.page.error(panel))
        .blank_x_labels(report == GraphReport::ActiveThreads);
    render_chart(frame, &app.theme, area, view);
}

fn render_jvm(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(8), Constraint::Min(8)]).split(area);
    render_environment(frame, app, chunks[0]);

    let rows = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    for (row, reports) in rows.iter().zip(JVM_REPORTS.chunks(2)) {
        let cells = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        for (cell, report) in cells.iter().zip(reports) {
            render_report_chart(frame, app, *cell, *report);
        }
    }
}

fn render_charts(frame: &mut Frame, app: &App, area: Rect, reports: &[GraphReport]) {
    let constraints = vec![Constraint::Ratio(1, reports.len().max(1) as u32); reports.len()];
    let areas = Layout::vertical(constraints).split(area);
    for (area, report) in areas.iter().zip(reports) {
        render_report_chart(frame, app, *area, *report);
    }
}

fn render_sessions(frame: &mut Frame, app: &App, area: Rect) {
    let view = ChartView::new(Panel::Sessions.title(), app.page.sessions())
        .error(app.page.error(Panel::Sessions));
    render_chart(frame, &app.theme, area, view);
}

/// A selectable list; the item matching the route parameter is highlighted.
fn render_list(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: String,
    items: Vec<(String, String)>,
) {
    let current = app.route.param();
    let list_items: Vec<ListItem> = items
        .iter()
        .map(|(label, id)| {
            let style = if Some(id.as_str()) == current {
                Style::default().fg(app.theme.highlight)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(label.clone(), style))
        })
        .collect();

    let list = List::new(list_items)
        .block(block(app, title))
        .highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app.selected.min(items.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn hint(app: &App, title: &str, text: &'static str) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(block(app, format!(" {} ", title)))
}

fn render_threads(frame: &mut Frame, app: &App, area: Rect) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).split(area);

    let threads = app.page.threads();
    let items = threads
        .iter()
        .map(|t| (t.name.clone(), item_id(&t.encoded_name, &t.name)))
        .collect();
    render_list(
        frame,
        app,
        chunks[0],
        format!(" Threads ({}) ", threads.len()),
        items,
    );

    if app.route.param().is_none() {
        frame.render_widget(
            hint(app, "Thread Dump", "Select a thread and press Enter"),
            chunks[1],
        );
        return;
    }
    let (title, lines) = match app.page.thread_dump() {
        Some(dump) => {
            let title = match &dump.state {
                Some(state) => format!("{} ({})", dump.name, state),
                None => dump.name.clone(),
            };
            let lines: Vec<Line> = dump.frames().map(|f| Line::from(f.to_string())).collect();
            (title, lines)
        }
        None => (Panel::ThreadDump.title().to_string(), vec![placeholder(app)]),
    };
    let dump = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(titled(app, &title, Panel::ThreadDump));
    frame.render_widget(dump, chunks[1]);
}

fn render_gauges(frame: &mut Frame, app: &App, area: Rect) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)]).split(area);

    let gauges = app.page.gauges();
    let items = gauges
        .iter()
        .map(|g| (g.name.clone(), item_id(&g.encoded_name, &g.name)))
        .collect();
    render_list(
        frame,
        app,
        chunks[0],
        format!(" Gauges ({}) ", gauges.len()),
        items,
    );

    if app.route.param().is_none() {
        frame.render_widget(
            hint(app, "Gauge", "Select a gauge and press Enter"),
            chunks[1],
        );
        return;
    }
    let series = app.page.series(Panel::Gauge);
    let data = series.map(std::slice::from_ref).unwrap_or_default();
    let title = series
        .map(|s| s.label.as_str())
        .filter(|l| !l.is_empty())
        .unwrap_or(Panel::Gauge.title());
    let view = ChartView::new(title, data).error(app.page.error(Panel::Gauge));
    render_chart(frame, &app.theme, chunks[1], view);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let chunks =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let nodes = status_nodes(app.page.statuses());
    let current = app.route.param();
    let header = Row::new(vec!["Application", "Node", "Status", "Last validation"])
        .height(1)
        .style(app.theme.header);
    let rows: Vec<Row> = nodes
        .iter()
        .map(|(application, node)| {
            let status = node.status();
            let name_style = if Some(node.name.as_str()) == current {
                Style::default().fg(app.theme.highlight)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(application.to_string()),
                Cell::from(Span::styled(node.name.clone(), name_style)),
                Cell::from(Span::styled(status.symbol(), app.theme.status_style(status))),
                Cell::from(node.date.map(format_timestamp).unwrap_or_default()),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Fill(2),
        ],
    )
    .header(header)
    .block(titled(app, &format!("Nodes ({})", nodes.len()), Panel::Statuses))
    .row_highlight_style(app.theme.selected)
    .highlight_symbol("▶ ");

    let mut state = ratatui::widgets::TableState::default();
    if !nodes.is_empty() {
        state.select(Some(app.selected.min(nodes.len() - 1)));
    }
    frame.render_stateful_widget(table, chunks[0], &mut state);

    if current.is_none() {
        frame.render_widget(
            hint(app, "Validations", "Select a node and press Enter"),
            chunks[1],
        );
        return;
    }
    let Some(node) = app.page.node_status() else {
        frame.render_widget(
            Paragraph::new(placeholder(app)).block(titled(
                app,
                Panel::NodeStatus.title(),
                Panel::NodeStatus,
            )),
            chunks[1],
        );
        return;
    };
    let header = Row::new(vec!["Validation", "Status", "Message"])
        .height(1)
        .style(app.theme.header);
    let rows: Vec<Row> = node
        .results
        .iter()
        .map(|result| {
            let status = result.status();
            Row::new(vec![
                Cell::from(result.name.clone()),
                Cell::from(Span::styled(status.symbol(), app.theme.status_style(status))),
                Cell::from(result.message.clone()),
            ])
        })
        .collect();
    let status = node.status();
    let title = format!("{} [{}]", node.name, status.symbol());
    let table = Table::new(
        rows,
        [Constraint::Fill(2), Constraint::Fill(1), Constraint::Fill(4)],
    )
    .header(header)
    .block(titled(app, &title, Panel::NodeStatus));
    frame.render_widget(table, chunks[1]);
}
