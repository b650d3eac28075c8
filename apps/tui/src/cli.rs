use chrono::NaiveDate;
use clap::{CommandFactory, Parser, ValueEnum};
use space_weather_explorer::config::AppConfig;
use space_weather_explorer::donki::DateWindow;
use space_weather_explorer::query::{OperationChoice, SelectionOptions, DEFAULT_LIMIT};
use space_weather_explorer::OutputFormat;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "space-weather",
    version,
    about = "Space weather event globe and LaTiS dataset URL builder"
)]
pub struct CliArgs {
    /// Print generated URLs and an event summary, then exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the dataset catalog path
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Override the NASA API key
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Write logs to this directory
    #[arg(long = "log-dir", value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Event window length in days, ending today
    #[arg(long, default_value_t = DateWindow::DEFAULT_DAYS)]
    pub days: u32,

    /// Event window start (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Event window end (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: Option<NaiveDate>,

    /// Dataset to build a URL for (repeatable)
    #[arg(long = "dataset", value_name = "NAME")]
    pub datasets: Vec<String>,

    /// Earliest sample time in generated URLs (YYYY-MM-DD)
    #[arg(long = "time-start", value_name = "DATE")]
    pub time_start: Option<NaiveDate>,

    /// Latest sample time in generated URLs (YYYY-MM-DD)
    #[arg(long = "time-end", value_name = "DATE")]
    pub time_end: Option<NaiveDate>,

    /// Row limit used by the limit operation
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Output format of generated URLs
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Operation to append, as OP or OP=VALUE (repeatable, kept in order)
    #[arg(long = "op", value_name = "OP[=VALUE]")]
    pub operations: Vec<OperationChoice>,

    /// Skip fetching DONKI events in headless mode
    #[arg(long = "no-events")]
    pub no_events: bool,

    /// List catalog dataset names and exit
    #[arg(long = "list-datasets")]
    pub list_datasets: bool,
}

impl CliArgs {
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(path) = &self.catalog {
            config.catalog_path.clone_from(path);
        }
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
    }

    /// Event window from `--start/--end/--days`.
    pub fn window(&self, today: NaiveDate) -> DateWindow {
        let end = self.end.unwrap_or(today);
        self.start.map_or_else(
            || DateWindow::last_days(end, self.days),
            |start| DateWindow::new(start, end),
        )
    }

    pub fn selection(&self) -> SelectionOptions {
        let mut options = SelectionOptions::default().with_datasets(self.datasets.iter().cloned());
        options.time_start = self.time_start;
        options.time_end = self.time_end;
        options.limit = self.limit;
        options.format = self.format.into();
        for choice in &self.operations {
            options.set_operation(choice.operation, choice.value.clone());
        }
        options
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use space_weather_explorer::Operation;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn selection_collects_dataset_flags() {
        let args = CliArgs::parse_from([
            "space-weather",
            "--dataset",
            "Kp",
            "--dataset",
            "Dst",
            "--time-start",
            "2024-05-01",
            "--limit",
            "25",
            "--format",
            "json",
            "--op",
            "limit",
            "--op",
            "rename=kp,Kp",
        ]);
        let options = args.selection();

        assert_eq!(options.selected_datasets, vec!["Kp", "Dst"]);
        assert_eq!(options.time_start, Some(date(2024, 5, 1)));
        assert_eq!(options.limit, 25);
        assert_eq!(options.format, OutputFormat::Json);
        let ops: Vec<_> = options.operations().iter().map(|c| c.operation).collect();
        assert_eq!(ops, vec![Operation::Limit, Operation::Rename]);
    }

    #[test]
    fn limit_must_be_positive() {
        assert!(CliArgs::try_parse_from(["space-weather", "--limit", "0"]).is_err());
    }

    #[test]
    fn window_defaults_to_days_before_today() {
        let args = CliArgs::parse_from(["space-weather", "--days", "7"]);
        let window = args.window(date(2024, 5, 31));
        assert_eq!(window, DateWindow::new(date(2024, 5, 24), date(2024, 5, 31)));

        let explicit = CliArgs::parse_from(["space-weather", "--start", "2024-01-01", "--end", "2024-01-10"]);
        assert_eq!(
            explicit.window(date(2024, 5, 31)),
            DateWindow::new(date(2024, 1, 1), date(2024, 1, 10))
        );
    }

    #[test]
    fn overrides_replace_config_values() {
        let args = CliArgs::parse_from(["space-weather", "--catalog", "cat.json", "--api-key", "K"]);
        let mut config = AppConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.catalog_path, PathBuf::from("cat.json"));
        assert_eq!(config.api_key.as_deref(), Some("K"));
    }
}
