//! Counters report rendering.
//!
//! A sortable, filterable table of every counter with its statistics.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::controller::Panel;
use crate::data::grid::cell_text;

/// Render the counters grid, sized to its rows within `area`.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let grid = &app.grid;
    let all = app.page.counters();
    let counters = grid.visible(all);

    let header = Row::new(
        grid.columns
            .iter()
            .enumerate()
            .map(|(i, column)| Cell::from(format_header(column.header(), i, app))),
    )
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = counters
        .iter()
        .map(|counter| {
            Row::new(
                grid.columns
                    .iter()
                    .map(|column| Cell::from(cell_text(counter, &column.field))),
            )
        })
        .collect();

    // Counter and Role get the room, statistics share the rest
    let widths: Vec<Constraint> = grid
        .columns
        .iter()
        .map(|column| match column.field.as_str() {
            "name" => Constraint::Fill(4),
            "roleName" => Constraint::Fill(2),
            _ => Constraint::Fill(1),
        })
        .collect();

    let selected = grid.selected.min(counters.len().saturating_sub(1));
    let sort_dir = if grid.sort_ascending { "↑" } else { "↓" };

    // Build title with filter info
    let filter_info = if app.filter_active {
        format!(" /{}_", grid.filter_text)
    } else if !grid.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", grid.filter_text)
    } else {
        String::new()
    };

    // Show scroll position if there are items
    let position_info = if !counters.is_empty() {
        format!(" [{}/{}]", selected + 1, counters.len())
    } else {
        String::new()
    };

    let mut title = format!(
        " Counters ({}/{}) [s:sort {}{}]{}{} ",
        counters.len(),
        all.len(),
        grid.sort_field(),
        sort_dir,
        filter_info,
        position_info
    );
    if let Some(error) = app.page.error(Panel::Counters) {
        title.push_str(&format!("! {} ", error));
    }

    // Natural height plus the borders, never more than the page
    let height = grid
        .natural_height(counters.len())
        .saturating_add(2)
        .min(area.height);
    let area = Rect { height, ..area };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !counters.is_empty() {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, index: usize, app: &App) -> Span<'static> {
    if app.grid.sort_column == index {
        let arrow = if app.grid.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}
