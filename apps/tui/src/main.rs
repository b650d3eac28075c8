mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::actions::AppActions;
use app::App;
use chrono::Local;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use logging::{init_logging, LogTarget, DEBUG_LOG_DIR};
use space_weather_explorer::config::AppConfig;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let cli = CliArgs::parse();
    let mut config = AppConfig::from_env();
    cli.apply_overrides(&mut config);

    let headless = cli.headless || cli.list_datasets || !is_terminal();

    // The dashboard owns stdout and stderr, so it can only log to a file
    let log_dir = config
        .log_dir
        .clone()
        .or_else(|| cli.debug.then(|| PathBuf::from(DEBUG_LOG_DIR)));
    let target = if headless {
        LogTarget::Stderr
    } else {
        log_dir.as_deref().map_or(LogTarget::Off, LogTarget::File)
    };
    init_logging(&target, cli.debug)?;

    let actions = AppActions::initialize(config)?;
    let window = cli.window(Local::now().date_naive());
    let selection = cli.selection();

    if cli.list_datasets {
        event::list_datasets(&actions);
        return Ok(());
    }

    if headless {
        tracing::info!("running headless for {window}");
        return event::run_headless(&actions, window, &selection, !cli.no_events, cli.json).await;
    }

    let mut app = App::new(actions, window, &selection);

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
