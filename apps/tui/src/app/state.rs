use crate::app::actions::{AppActions, GlobeView};
use crate::app::form::DatasetForm;
use chrono::{DateTime, Local};
use space_weather_explorer::catalog::DatasetCatalog;
use space_weather_explorer::donki::{DateWindow, Event};
use space_weather_explorer::globe::{GlobeModel, ViewCenter};
use space_weather_explorer::query::{DatasetUrl, SelectionOptions};
use space_weather_explorer::EventCategory;
use std::time::Instant;

/// Degrees of longitude the globe turns per second of animation
const ROTATION_SPEED: f64 = 12.0;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Dashboard,
    Datasets,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Projection {
    /// Flat world map with coastlines
    Map,
    /// Rotating orthographic globe
    Globe,
}

impl Projection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Map => Self::Globe,
            Self::Globe => Self::Map,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Map => "World Map",
            Self::Globe => "Globe",
        }
    }
}

pub const INFO_TABS: [&str; 2] = ["About", "Data Table"];

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub status_message: String,
    pub animation_counter: f64,
    pub animation_paused: bool,
    pub last_frame: Instant,
    pub info_tab_index: usize,
    pub selected_event_index: usize,
    pub projection: Projection,
    pub view_center: ViewCenter,
    pub window: DateWindow,
    pub refresh_requested: bool,
    pub events: Vec<Event>,
    pub globe: GlobeModel,
    pub unavailable: Vec<EventCategory>,
    pub last_update: Option<DateTime<Local>>,
    pub form: DatasetForm,
    pub dataset_urls: Vec<DatasetUrl>,
    pub actions: AppActions,
}

impl App {
    pub fn new(actions: AppActions, window: DateWindow, selection: &SelectionOptions) -> Self {
        let mut app = Self {
            running: true,
            screen: AppScreen::Dashboard,
            show_help: false,
            status_message: String::new(),
            animation_counter: 0.0,
            animation_paused: false,
            last_frame: Instant::now(),
            info_tab_index: 0,
            selected_event_index: 0,
            projection: Projection::Map,
            // Start looking at the sun-facing side where CMEs are drawn
            view_center: ViewCenter::new(15.0, -60.0),
            window,
            refresh_requested: true,
            events: Vec::new(),
            globe: GlobeModel::default(),
            unavailable: Vec::new(),
            last_update: None,
            form: DatasetForm::from_options(selection),
            dataset_urls: Vec::new(),
            actions,
        };
        app.rebuild_urls();
        app
    }

    pub const fn catalog(&self) -> &DatasetCatalog {
        &self.actions.catalog
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.animation_paused {
            return;
        }

        // Cycles between 0 and 2*PI
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }

        if self.projection == Projection::Globe {
            self.view_center = self
                .view_center
                .rotated(delta.as_secs_f64() * ROTATION_SPEED);
        }
    }

    pub fn toggle_animation_pause(&mut self) {
        self.animation_paused = !self.animation_paused;
        self.status_message = if self.animation_paused {
            "Rotation paused".to_string()
        } else {
            "Rotation resumed".to_string()
        };
    }

    pub fn toggle_projection(&mut self) {
        self.projection = self.projection.toggled();
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// Refetches the current window and replaces the globe contents.
    pub async fn refresh_events(&mut self) {
        self.refresh_requested = false;
        let view = self.actions.refresh_globe(self.window).await;
        self.apply_globe_view(view);
    }

    pub fn apply_globe_view(&mut self, view: GlobeView) {
        self.window = view.window;
        self.events = view.report.events;
        self.unavailable = view.report.unavailable;
        self.globe = view.model;
        self.last_update = Some(view.fetched_at);
        self.selected_event_index = 0;
    }

    /// Rebuilds every URL from the current form. Called after each form change.
    pub fn rebuild_urls(&mut self) {
        let options = self.form.to_options();
        self.dataset_urls = self.actions.generate_urls(&options);
    }

    pub fn refresh_summary(&self) -> String {
        let mut summary = format!(
            "{} events, {} points ({})",
            self.events.len(),
            self.globe.point_count(),
            self.window
        );
        if !self.unavailable.is_empty() {
            let codes = self
                .unavailable
                .iter()
                .map(|category| category.code())
                .collect::<Vec<_>>()
                .join(", ");
            summary.push_str(&format!(" - unavailable: {codes}"));
        }
        summary
    }
}
