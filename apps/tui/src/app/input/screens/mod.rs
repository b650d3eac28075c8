use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod dashboard;
mod datasets;
mod help;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if key == KeyCode::F(2) {
        switch_screen(app);
        return;
    }

    match app.screen {
        AppScreen::Dashboard => dashboard::handle_dashboard_input(app, key),
        AppScreen::Datasets => datasets::handle_datasets_input(app, key),
    }
}

pub fn switch_screen(app: &mut App) {
    app.screen = match app.screen {
        AppScreen::Dashboard => AppScreen::Datasets,
        AppScreen::Datasets => AppScreen::Dashboard,
    };
    app.status_message.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::AppActions;
    use crate::app::form::FormField;
    use chrono::NaiveDate;
    use space_weather_explorer::catalog::DatasetCatalog;
    use space_weather_explorer::config::AppConfig;
    use space_weather_explorer::donki::{DateWindow, DonkiClient};
    use space_weather_explorer::query::SelectionOptions;

    fn app() -> App {
        let catalog = DatasetCatalog::from_entries([("Kp Index", "kp_gfz"), ("Dst Index", "dst_kyoto")]);
        let actions = AppActions::with_source(
            AppConfig::default(),
            catalog,
            DonkiClient::new("http://localhost/", "").unwrap(),
        );
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        );
        App::new(actions, window, &SelectionOptions::default())
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app();
        dispatch_input(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        dispatch_input(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        dispatch_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);

        dispatch_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn f2_switches_between_screens() {
        let mut app = app();
        dispatch_input(&mut app, KeyCode::F(2));
        assert_eq!(app.screen, AppScreen::Datasets);
        dispatch_input(&mut app, KeyCode::F(2));
        assert_eq!(app.screen, AppScreen::Dashboard);
    }

    #[test]
    fn question_mark_is_text_on_the_dataset_form() {
        let mut app = app();
        app.screen = AppScreen::Datasets;
        dispatch_input(&mut app, KeyCode::Char('?'));
        assert!(!app.show_help);
        assert_eq!(app.form.filter, "?");
    }

    #[test]
    fn form_changes_rebuild_urls() {
        let mut app = app();
        app.screen = AppScreen::Datasets;
        assert!(app.dataset_urls.is_empty());

        dispatch_input(&mut app, KeyCode::Enter);
        assert_eq!(app.dataset_urls.len(), 1);
        assert_eq!(app.dataset_urls[0].name, "Kp Index");

        while app.form.field != FormField::Format {
            dispatch_input(&mut app, KeyCode::Tab);
        }
        dispatch_input(&mut app, KeyCode::Enter);
        assert!(app.dataset_urls[0].url.ends_with("kp_gfz.json?"));
    }

    #[test]
    fn dataset_filter_accepts_spaces() {
        let mut app = app();
        app.screen = AppScreen::Datasets;
        for c in "dst in".chars() {
            dispatch_input(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.form.filter, "dst in");
        assert!(app.form.selected.is_empty());

        dispatch_input(&mut app, KeyCode::Enter);
        assert_eq!(app.form.selected, vec!["Dst Index"]);
    }

    #[test]
    fn projection_toggles_on_p() {
        let mut app = app();
        let before = app.projection;
        dispatch_input(&mut app, KeyCode::Char('p'));
        assert_eq!(app.projection, before.toggled());
    }
}
