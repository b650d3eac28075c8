pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Dashboard => screens::dashboard::render_dashboard(app, f),
        AppScreen::Datasets => screens::datasets::render_datasets(app, f),
    }

    if app.show_help {
        screens::help::render_help_popup(app, f);
    }
}
