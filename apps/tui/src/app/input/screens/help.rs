use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

/// Opens or closes the help popup. While it is open every other key is swallowed.
pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    // '?' is ordinary text on the dataset form
    let is_toggle = key == KeyCode::F(1)
        || (key == KeyCode::Char('?') && app.screen == AppScreen::Dashboard);
    if is_toggle {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}
