use crate::app::form::FormField;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_datasets_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.screen = AppScreen::Dashboard;
            return;
        }
        KeyCode::Tab => app.form.next_field(),
        KeyCode::BackTab => app.form.prev_field(),
        KeyCode::Backspace => {
            app.form.backspace();
        }
        _ => handle_field_input(app, key),
    }

    app.rebuild_urls();
}

fn handle_field_input(app: &mut App, key: KeyCode) {
    let catalog = &app.actions.catalog;
    let form = &mut app.form;

    match (form.field, key) {
        (FormField::Datasets, KeyCode::Up) => form.move_dataset_cursor(catalog, false),
        (FormField::Datasets, KeyCode::Down) => form.move_dataset_cursor(catalog, true),
        // Space is filter text here, so only Enter toggles
        (FormField::Datasets, KeyCode::Enter) => {
            form.toggle_dataset_at_cursor(catalog);
        }
        (FormField::Format, KeyCode::Left | KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ')) => {
            form.toggle_format();
        }
        (FormField::Operations, KeyCode::Up) => form.move_operation_cursor(false),
        (FormField::Operations, KeyCode::Down) => form.move_operation_cursor(true),
        (FormField::Operations, KeyCode::Enter | KeyCode::Char(' ')) => {
            form.toggle_operation_at_cursor();
        }
        (FormField::OperationValues, KeyCode::Up) => form.move_value_cursor(false),
        (FormField::OperationValues, KeyCode::Down) => form.move_value_cursor(true),
        (_, KeyCode::Enter | KeyCode::Down) => form.next_field(),
        (_, KeyCode::Up) => form.prev_field(),
        (_, KeyCode::Char(c)) => {
            form.type_char(c);
        }
        _ => {}
    }
}
