use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen, INFO_TABS};
use crossterm::event::KeyCode;

const PAGE_JUMP: usize = 5;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('r') => {
            app.request_refresh();
        }
        KeyCode::Char('p') => {
            app.toggle_projection();
            app.status_message = format!("Projection: {}", app.projection.label());
        }
        KeyCode::Char(' ') => {
            app.toggle_animation_pause();
        }
        KeyCode::Char('d') | KeyCode::Tab => {
            app.screen = AppScreen::Datasets;
        }
        KeyCode::Left => {
            app.info_tab_index = wrap_decrement(app.info_tab_index, INFO_TABS.len());
        }
        KeyCode::Right => {
            app.info_tab_index = wrap_increment(app.info_tab_index, INFO_TABS.len());
        }
        KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown | KeyCode::Home
        | KeyCode::End => scroll_events(app, key),
        _ => {}
    }
}

fn scroll_events(app: &mut App, key: KeyCode) {
    let len = app.events.len();
    if len == 0 {
        return;
    }

    app.selected_event_index = match key {
        KeyCode::Up => wrap_decrement(app.selected_event_index, len),
        KeyCode::Down => wrap_increment(app.selected_event_index, len),
        KeyCode::PageUp => app.selected_event_index.saturating_sub(PAGE_JUMP),
        KeyCode::PageDown => (app.selected_event_index + PAGE_JUMP).min(len - 1),
        KeyCode::Home => 0,
        KeyCode::End => len - 1,
        _ => app.selected_event_index,
    };
}
