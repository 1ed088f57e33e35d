//! Common UI components shared across pages.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_span_ms;
use crate::data::WindowControl;
use crate::route::{Route, TABS};
use crate::ui::chart::format_timestamp;

/// Render the header bar: data source, query window and polling state.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let window = app.window();
    let (marker, marker_style) = if !app.is_live() {
        ("○", Style::default().add_modifier(Modifier::DIM))
    } else if window.is_live() {
        ("●", Style::default().fg(app.theme.healthy))
    } else {
        ("‖", Style::default().fg(app.theme.warning))
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", marker), marker_style),
        Span::styled("SIRONA ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::raw(app.source_description()),
        Span::raw(" │ "),
        Span::styled(
            describe_window(&window),
            Style::default().fg(app.theme.highlight),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Human description of the query window.
pub fn describe_window(window: &WindowControl) -> String {
    match window {
        WindowControl::Live { span_ms } => format!("last {} (live)", format_span_ms(*span_ms)),
        WindowControl::Pinned(w) => format!(
            "{} → {} ({})",
            format_timestamp(w.start),
            format_timestamp(w.end),
            format_span_ms(w.span_ms())
        ),
    }
}

fn tab_title(index: usize, route: &Route) -> String {
    format!("{}:{}", index + 1, route.label())
}

/// Render the tab bar, one tab per top-level page.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TABS
        .iter()
        .enumerate()
        .map(|(i, route)| Line::from(tab_title(i, route)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.route.tab_index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Tab under terminal column `column` of the tab bar.
pub fn tab_at(column: u16) -> Option<usize> {
    let column = usize::from(column);
    let mut start = 0;
    for (i, route) in TABS.iter().enumerate() {
        // One space of padding each side, then the divider
        let width = tab_title(i, route).chars().count() + 2;
        if column < start + width {
            return Some(i);
        }
        start += width + 1;
    }
    None
}

/// Render the status bar at the bottom.
///
/// Shows: breadcrumb trail, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.page.last_error {
        let paragraph = Paragraph::new(format!(" Error: {} | r:retry q:quit", err))
            .style(app.theme.error_style());
        frame.render_widget(paragraph, area);
        return;
    }

    let status = match app.page.last_update {
        Some(updated) => format!(
            " {} | Updated {:.1}s ago | {}",
            app.breadcrumb(),
            updated.elapsed().as_secs_f64(),
            controls(app),
        ),
        None => format!(" Loading {}... | q:quit", app.route),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Context-sensitive controls
fn controls(app: &App) -> &'static str {
    if app.form.is_some() {
        return "Type value | Tab:next field Enter:invoke Esc:cancel";
    }
    if app.filter_active {
        return "Type to search | Enter:apply Esc:cancel";
    }
    match app.route {
        Route::Report => "/:search s:sort e:export r:refresh ?:help q:quit",
        Route::Threads(_) | Route::Gauges(_) | Route::Status(_) => {
            "↑↓:select Enter:open Esc:back ?:help q:quit"
        }
        Route::Jmx(_) => "Enter:open o:operations i:invoke Esc:back ?:help q:quit",
        Route::Jvm | Route::Jta | Route::Sessions => "[ ]:pan -/+:zoom n:now ?:help q:quit",
        Route::Home => "Tab:switch r:refresh ?:help q:quit",
    }
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current page.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ Tab     Switch pages"),
        Line::from("  1-9         Jump to page"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Open selected item"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Time window"),
        Line::from("  [ / ]       Pan back / forward"),
        Line::from("  - / +       Zoom out / in"),
        Line::from("  n           Back to now (live)"),
        Line::from(""),
        section(" Counters"),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter"),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from("  e         Export to CSV"),
        Line::from(""),
        section(" JMX"),
        Line::from("  h / l     Collapse / expand branch"),
        Line::from("  o         Tree / operations"),
        Line::from("  i         Invoke operation"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Refresh now"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let lines = u16::try_from(help_text.len()).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = lines.saturating_add(2).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
