//! JMX page rendering: MBean tree, MBean detail, and the invocation form.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};
use sirona_types::MBeanInformations;

use crate::app::{App, JmxFocus};
use crate::controller::Panel;
use crate::route::Route;

/// Render the tree on the left and the selected MBean on the right.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area);
    render_tree(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
}

fn block<'a>(app: &App, title: String, focused: bool) -> Block<'a> {
    let border = if focused {
        app.theme.highlight
    } else {
        app.theme.border
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(border))
}

fn render_tree(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.jmx_focus == JmxFocus::Tree;
    let Some(tree) = app.page.jmx_tree() else {
        let text = match app.page.error(Panel::JmxTree) {
            Some(error) => Line::styled(error.to_string(), app.theme.error_style()),
            None if app.page.is_loaded() => Line::from("No MBean server"),
            None => Line::from("Loading..."),
        };
        frame.render_widget(
            Paragraph::new(text).block(block(app, " MBeans ".to_string(), focused)),
            area,
        );
        return;
    };

    let rows = app.tree.rows(tree);
    let current = app.route.param();
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let marker = match (row.has_children, row.expanded) {
                (true, true) => "▾ ",
                (true, false) => "▸ ",
                (false, _) => "• ",
            };
            let style = if row.encoded.is_some() && row.encoded.as_deref() == current {
                Style::default().fg(app.theme.highlight)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw("  ".repeat(row.depth)),
                Span::raw(marker),
                Span::styled(row.label.clone(), style),
            ]))
        })
        .collect();

    let title = format!(" MBeans ({}) ", tree.leaf_count());
    let highlight = if focused {
        app.theme.selected
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let list = List::new(items)
        .block(block(app, title, focused))
        .highlight_style(highlight)
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.tree.selected.min(rows.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.jmx_focus == JmxFocus::Operations;
    let Route::Jmx(Some(_)) = &app.route else {
        let hint = Paragraph::new("Select an MBean in the tree and press Enter")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block(app, " MBean ".to_string(), false));
        frame.render_widget(hint, area);
        return;
    };
    let Some(info) = app.page.mbean() else {
        let text = match app.page.error(Panel::MBean) {
            Some(error) => Line::styled(error.to_string(), app.theme.error_style()),
            None if app.page.is_loaded() => Line::from("MBean not found"),
            None => Line::from("Loading..."),
        };
        frame.render_widget(
            Paragraph::new(text).block(block(app, " MBean ".to_string(), false)),
            area,
        );
        return;
    };

    let invocation_lines = invocation_lines(app);
    let chunks = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(4),
        Constraint::Min(4),
        Constraint::Length(if invocation_lines.is_empty() {
            0
        } else {
            u16::try_from(invocation_lines.len()).unwrap_or(u16::MAX).saturating_add(2).min(8)
        }),
    ])
    .split(area);

    render_summary(frame, app, info, chunks[0]);
    render_attributes(frame, app, info, chunks[1]);
    render_operations(frame, app, info, chunks[2], focused);

    if !invocation_lines.is_empty() {
        let result = Paragraph::new(invocation_lines)
            .wrap(Wrap { trim: false })
            .block(block(app, " Result ".to_string(), false));
        frame.render_widget(result, chunks[3]);
    }
}

fn render_summary(frame: &mut Frame, app: &App, info: &MBeanInformations, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled(info.object_name.clone(), bold)),
        Line::from(vec![Span::raw("Class: "), Span::raw(info.classname.clone())]),
        Line::from(Span::styled(
            info.description.clone(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block(app, " MBean ".to_string(), false)),
        area,
    );
}

fn render_attributes(frame: &mut Frame, app: &App, info: &MBeanInformations, area: Rect) {
    let header = Row::new(vec!["Name", "Type", "Value"])
        .height(1)
        .style(app.theme.header);
    let rows: Vec<Row> = info
        .attributes
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::from(a.name.clone()),
                Cell::from(a.kind.clone()),
                Cell::from(a.value.clone()),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [Constraint::Fill(2), Constraint::Fill(1), Constraint::Fill(3)],
    )
    .header(header)
    .block(block(
        app,
        format!(" Attributes ({}) ", info.attributes.len()),
        false,
    ));
    frame.render_widget(table, area);
}

fn render_operations(
    frame: &mut Frame,
    app: &App,
    info: &MBeanInformations,
    area: Rect,
    focused: bool,
) {
    let items: Vec<ListItem> = info
        .operations
        .iter()
        .map(|op| ListItem::new(op.signature()))
        .collect();
    let title = format!(" Operations ({}) [o:focus i:invoke] ", info.operations.len());
    let list = List::new(items)
        .block(block(app, title, focused))
        .highlight_style(if focused {
            app.theme.selected
        } else {
            Style::default()
        })
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !info.operations.is_empty() {
        state.select(Some(app.operation_index.min(info.operations.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn invocation_lines(app: &App) -> Vec<Line<'static>> {
    let Some(invocation) = app.current_invocation() else {
        return Vec::new();
    };
    let header = Line::from(Span::styled(
        format!("{}:", invocation.operation),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let body: Vec<Line> = match &invocation.result {
        Ok(result) if result.is_fault() => result
            .lines()
            .into_iter()
            .map(|l| Line::styled(l, app.theme.error_style()))
            .collect(),
        Ok(result) => {
            let lines = result.lines();
            if lines.is_empty() {
                vec![Line::from("(no result)")]
            } else {
                lines.into_iter().map(Line::from).collect()
            }
        }
        Err(error) => vec![Line::styled(error.clone(), app.theme.error_style())],
    };
    std::iter::once(header).chain(body).collect()
}

/// Render the invocation form as a modal overlay.
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            form.operation.signature(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if form.operation.parameters.is_empty() {
        lines.push(Line::from("No parameters"));
    }
    for (i, (param, value)) in form
        .operation
        .parameters
        .iter()
        .zip(&form.values)
        .enumerate()
    {
        let focused = i == form.focus;
        let label = format!("{} ({}): ", param.name, param.kind);
        let value = if focused {
            format!("{}_", value)
        } else {
            value.clone()
        };
        let style = if focused {
            Style::default().fg(app.theme.highlight)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(if focused { "▶ " } else { "  " }),
            Span::raw(label),
            Span::styled(value, style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter:invoke Tab:next Esc:cancel",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height);
    let width = 60u16.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let form_area = Rect::new(x, y, width, height);

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" Invoke {} ", form.operation.name))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.highlight)),
    );
    frame.render_widget(Clear, form_area);
    frame.render_widget(paragraph, form_area);
}
