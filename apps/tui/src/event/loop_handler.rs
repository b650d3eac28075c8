use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use space_weather_explorer::donki::DateWindow;
use space_weather_explorer::query::{DatasetUrl, SelectionOptions};
use space_weather_explorer::EventCategory;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;

use crate::app::actions::AppActions;
use crate::app::{handle_input, App};
use crate::ui;

// States of an event refresh
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RefreshState {
    Idle,
    Fetching,
    Done,
}

impl fmt::Display for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Fetching => write!(f, "Fetching"),
            Self::Done => write!(f, "Done"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum RefreshEvent {
    Start,
    Finished,
    Reset,
}

impl fmt::Display for RefreshEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Finished => write!(f, "Finished"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: RefreshState,
    event: RefreshEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

struct RefreshMachine {
    state: RefreshState,
}

impl RefreshMachine {
    const fn new() -> Self {
        Self {
            state: RefreshState::Idle,
        }
    }

    const fn state(&self) -> RefreshState {
        self.state
    }

    fn process_event(
        &mut self,
        event: RefreshEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, app))?;
        self.state = next_state.0;
        Ok(())
    }
}

struct NextState(RefreshState);

impl TryFrom<(RefreshState, RefreshEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (RefreshState, RefreshEvent, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            (RefreshState::Idle, RefreshEvent::Start) => {
                app.status_message = format!("Fetching DONKI events for {}...", app.window);
                Ok(Self(RefreshState::Fetching))
            }
            (RefreshState::Fetching, RefreshEvent::Finished) => {
                app.status_message = app.refresh_summary();
                Ok(Self(RefreshState::Done))
            }
            (RefreshState::Done, RefreshEvent::Reset) => Ok(Self(RefreshState::Idle)),
            _ => Err(StateTransitionError {
                from: current_state,
                event,
            }),
        }
    }
}

/// Run without a terminal UI: print URLs and an event summary
pub async fn run_headless(
    actions: &AppActions,
    window: DateWindow,
    selection: &SelectionOptions,
    fetch_events: bool,
    json: bool,
) -> Result<()> {
    let report = build_headless_report(actions, window, selection, fetch_events).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_headless_text(&report);
    }

    Ok(())
}

/// Print the catalog dataset names, one per line
pub fn list_datasets(actions: &AppActions) {
    for name in actions.catalog.names() {
        println!("{name}");
    }
}

fn render_headless_text(report: &HeadlessReport) {
    println!("\nGenerated URLs");
    println!("==============");
    if report.urls.is_empty() {
        println!("(no datasets selected)");
    }
    for (i, dataset) in report.urls.iter().enumerate() {
        println!("{}. {}", i + 1, dataset.name);
        println!("   {}", dataset.url);
    }

    let Some(events) = &report.events else {
        return;
    };

    println!("\nSpace Weather Events ({})", events.window);
    println!("====================");
    for count in &events.counts {
        println!("- {} ({}): {}", count.category.label(), count.category.code(), count.events);
    }
    if !events.unavailable.is_empty() {
        let codes = events
            .unavailable
            .iter()
            .map(|category| category.code())
            .collect::<Vec<_>>()
            .join(", ");
        println!("Unavailable: {codes}");
    }

    println!("\nEvents:");
    for label in &events.labels {
        println!("- {}", label.replace("\n\n", " | "));
    }
}

async fn build_headless_report(
    actions: &AppActions,
    window: DateWindow,
    selection: &SelectionOptions,
    fetch_events: bool,
) -> HeadlessReport {
    let urls = actions.generate_urls(selection);

    let events = if fetch_events {
        let view = actions.refresh_globe(window).await;
        let counts = EventCategory::ALL
            .into_iter()
            .map(|category| HeadlessCount {
                category,
                events: view.report.count(category),
                points: view
                    .model
                    .layer(category)
                    .map_or(0, |layer| layer.points.len()),
            })
            .collect();
        let labels = view
            .report
            .events
            .iter()
            .map(space_weather_explorer::geo::make_label)
            .collect();
        Some(HeadlessEvents {
            window: view.window,
            counts,
            unavailable: view.report.unavailable,
            labels,
        })
    } else {
        None
    };

    HeadlessReport { urls, events }
}

#[derive(Serialize)]
struct HeadlessReport {
    urls: Vec<DatasetUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<HeadlessEvents>,
}

#[derive(Serialize)]
struct HeadlessEvents {
    window: DateWindow,
    counts: Vec<HeadlessCount>,
    unavailable: Vec<EventCategory>,
    labels: Vec<String>,
}

#[derive(Serialize)]
struct HeadlessCount {
    category: EventCategory,
    events: usize,
    points: usize,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut refresh_machine = RefreshMachine::new();

    loop {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {
                    // Ignore non-key events for now
                }
            }
        }

        if app.refresh_requested && refresh_machine.state() == RefreshState::Idle {
            if let Err(e) = refresh_machine.process_event(RefreshEvent::Start, app) {
                tracing::debug!("{e}");
                continue;
            }

            // Show the fetching message before blocking on the requests
            if terminal.draw(|f| ui::ui(app, f)).is_err() {
                // Non-fatal redraw error
            }

            app.refresh_events().await;

            if let Err(e) = refresh_machine.process_event(RefreshEvent::Finished, app) {
                tracing::debug!("{e}");
            }
            if let Err(e) = refresh_machine.process_event(RefreshEvent::Reset, app) {
                tracing::debug!("{e}");
            }
        }
    }
    Ok(())
}
