use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, JmxFocus};
use crate::route::Route;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // The invocation form captures every key while open
    if app.form.is_some() {
        handle_form_input(app, key);
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    let on_jmx_tree = matches!(app.route, Route::Jmx(_)) && app.jmx_focus == JmxFocus::Tree;

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Page switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_page();
            } else {
                app.next_page();
            }
        }
        KeyCode::BackTab => app.prev_page(),
        KeyCode::Char(c @ '1'..='9') => app.select_tab(c as usize - '1' as usize),

        // Navigation (up/down for items, left/right for pages)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('h') if on_jmx_tree => app.collapse_selected(),
        KeyCode::Char('l') if on_jmx_tree => app.expand_selected(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_page(),
        KeyCode::Right | KeyCode::Char('l') => app.next_page(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Open the selected item
        KeyCode::Enter => app.open_selected(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Refresh now
        KeyCode::Char('r') => app.refresh_now(),

        // Query window
        KeyCode::Char('[') => app.shift_window(false),
        KeyCode::Char(']') => app.shift_window(true),
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_window(true),
        KeyCode::Char('-') => app.zoom_window(false),
        KeyCode::Char('n') => app.window_to_now(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Counters grid
        KeyCode::Char('s') if app.route == Route::Report => app.cycle_sort(),
        KeyCode::Char('S') if app.route == Route::Report => app.toggle_sort_direction(),
        KeyCode::Char('/') if app.route == Route::Report => app.start_filter(),
        KeyCode::Char('c') if app.route == Route::Report => {
            if !app.grid.filter_text.is_empty() {
                app.clear_filter();
            }
        }
        KeyCode::Char('e') if app.route == Route::Report => match app.export_csv() {
            Ok(path) => app.set_status_message(format!("Exported to {}", path.display())),
            Err(e) => app.set_status_message(format!("Export failed: {e:#}")),
        },

        // JMX
        KeyCode::Char('o') if matches!(app.route, Route::Jmx(_)) => app.toggle_jmx_focus(),
        KeyCode::Char('i') if matches!(app.route, Route::Jmx(_)) => app.open_invocation_form(),

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        // Backspace
        KeyCode::Backspace => {
            app.filter_pop();
            if app.grid.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle key input while the invocation form is open
fn handle_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.submit_invocation();
            return;
        }
        KeyCode::Esc => {
            app.form = None;
            return;
        }
        _ => {}
    }
    let Some(form) = app.form.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => form.pop(),
        KeyCode::Char(c) => form.push(c),
        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Tab clicks (row 1, after header)
        MouseEventKind::Down(MouseButton::Left) if mouse.row == 1 => {
            if let Some(index) = crate::ui::common::tab_at(mouse.column) {
                app.select_tab(index);
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}
