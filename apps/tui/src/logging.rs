//! Tracing setup.
//!
//! Headless runs log to stderr. The interactive dashboard owns the
//! terminal, so it only logs when a log directory is available.

use color_eyre::Result;
use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_NAME: &str = "space-weather.log";

/// Default directory used when `--debug` is given without a log directory.
pub const DEBUG_LOG_DIR: &str = "./logs";

pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

pub fn init_logging(target: &LogTarget<'_>, debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
        LogTarget::File(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = rolling::never(dir, LOG_FILE_NAME);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_ansi(false).with_writer(appender))
                .try_init()?;
        }
        LogTarget::Off => {}
    }

    Ok(())
}
