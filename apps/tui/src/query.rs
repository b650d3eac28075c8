//! Builds LaTiS dataset request URLs from a user's selections.
//!
//! Grammar per dataset:
//! `<base><path><format>?` followed by `&`-joined fragments, in order:
//! `time>=<start>`, `time<=<end>`, then one `<op>(<value>)` per chosen
//! operation. Values are passed through verbatim, without percent-encoding.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::DatasetCatalog;
use crate::domain::{Operation, OutputFormat};

pub const DEFAULT_LIMIT: u32 = 10;

/// An operation picked by the user together with its free-text value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationChoice {
    pub operation: Operation,
    pub value: String,
}

impl OperationChoice {
    pub fn new(operation: Operation, value: impl Into<String>) -> Self {
        Self {
            operation,
            value: value.into(),
        }
    }
}

impl FromStr for OperationChoice {
    type Err = String;

    /// Parses `op` or `op=value`, e.g. `rename=old,new`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s.split_once('=').unwrap_or((s, ""));
        let operation = Operation::parse(name).ok_or_else(|| {
            format!("unknown operation {name:?}; expected one of rename, formatTime, max, min, limit")
        })?;
        Ok(Self::new(operation, value))
    }
}

/// Everything the user chose in one interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionOptions {
    pub selected_datasets: Vec<String>,
    pub time_start: Option<NaiveDate>,
    pub time_end: Option<NaiveDate>,
    pub limit: u32,
    pub format: OutputFormat,
    operations: Vec<OperationChoice>,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            selected_datasets: Vec::new(),
            time_start: None,
            time_end: None,
            limit: DEFAULT_LIMIT,
            format: OutputFormat::default(),
            operations: Vec::new(),
        }
    }
}

impl SelectionOptions {
    pub fn operations(&self) -> &[OperationChoice] {
        &self.operations
    }

    /// Adds an operation, or updates its value if it is already chosen.
    /// Operations stay in the order they were first chosen.
    pub fn set_operation(&mut self, operation: Operation, value: impl Into<String>) {
        let value = value.into();
        if let Some(existing) = self
            .operations
            .iter_mut()
            .find(|choice| choice.operation == operation)
        {
            existing.value = value;
        } else {
            self.operations.push(OperationChoice::new(operation, value));
        }
    }

    #[must_use]
    pub fn with_operation(mut self, operation: Operation, value: impl Into<String>) -> Self {
        self.set_operation(operation, value);
        self
    }

    #[must_use]
    pub fn with_datasets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_datasets = names.into_iter().map(Into::into).collect();
        self
    }
}

/// One generated URL with the dataset it was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetUrl {
    pub name: String,
    pub url: String,
}

/// Accumulates query fragments and joins them with a single `&`.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    prefix: String,
    fragments: Vec<String>,
}

impl QueryBuilder {
    pub fn new(base_url: &str, path: &str, format: OutputFormat) -> Self {
        Self {
            prefix: format!("{base_url}{path}{}?", format.extension()),
            fragments: Vec::new(),
        }
    }

    #[must_use]
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragments.push(fragment.into());
        self
    }

    #[must_use]
    pub fn call(self, function: &str, argument: &str) -> Self {
        self.fragment(format!("{function}({argument})"))
    }

    pub fn build(self) -> String {
        let mut url = self.prefix;
        url.push_str(&self.fragments.join("&"));
        url
    }
}

/// URLs for every selected dataset present in the catalog, in selection
/// order. Unknown names are skipped.
pub fn build_urls(base_url: &str, catalog: &DatasetCatalog, options: &SelectionOptions) -> Vec<String> {
    build_dataset_urls(base_url, catalog, options)
        .into_iter()
        .map(|dataset| dataset.url)
        .collect()
}

/// Like [`build_urls`], keeping the dataset name next to each URL.
pub fn build_dataset_urls(
    base_url: &str,
    catalog: &DatasetCatalog,
    options: &SelectionOptions,
) -> Vec<DatasetUrl> {
    options
        .selected_datasets
        .iter()
        .filter_map(|name| {
            let Some(path) = catalog.path(name) else {
                tracing::debug!(dataset = %name, "skipping dataset missing from catalog");
                return None;
            };
            Some(DatasetUrl {
                name: name.clone(),
                url: dataset_url(base_url, path, options),
            })
        })
        .collect()
}

fn dataset_url(base_url: &str, path: &str, options: &SelectionOptions) -> String {
    let mut builder = QueryBuilder::new(base_url, path, options.format);

    if let Some(start) = options.time_start {
        builder = builder.fragment(format!("time>={start}"));
    }
    if let Some(end) = options.time_end {
        builder = builder.fragment(format!("time<={end}"));
    }

    for choice in &options.operations {
        builder = match choice.operation {
            // The limit call takes the numeric limit field, not the text value.
            Operation::Limit if options.limit > 0 => {
                builder.call(Operation::Limit.as_str(), &options.limit.to_string())
            }
            Operation::Limit => builder,
            Operation::Rename | Operation::FormatTime | Operation::Max | Operation::Min => {
                builder.call(choice.operation.as_str(), &choice.value)
            }
        };
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://lasp.colorado.edu/space-weather-portal/latis/dap/";

    fn catalog() -> DatasetCatalog {
        DatasetCatalog::from_entries([("Kp", "kp_gfz"), ("Dst", "dst_kyoto")])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bare_selection_keeps_question_mark() {
        let options = SelectionOptions::default().with_datasets(["Kp"]);
        assert_eq!(
            build_urls(BASE, &catalog(), &options),
            vec![format!("{BASE}kp_gfz.csv?")]
        );
    }

    #[test]
    fn time_bounds_come_before_operations() {
        let mut options = SelectionOptions::default()
            .with_datasets(["Dst"])
            .with_operation(Operation::Max, "dst");
        options.time_start = Some(date(2024, 5, 1));
        options.time_end = Some(date(2024, 5, 31));
        options.format = OutputFormat::Json;

        assert_eq!(
            build_urls(BASE, &catalog(), &options),
            vec![format!(
                "{BASE}dst_kyoto.json?time>=2024-05-01&time<=2024-05-31&max(dst)"
            )]
        );
    }

    #[test]
    fn only_end_bound() {
        let mut options = SelectionOptions::default().with_datasets(["Kp"]);
        options.time_end = Some(date(2024, 1, 2));
        assert_eq!(
            build_urls(BASE, &catalog(), &options),
            vec![format!("{BASE}kp_gfz.csv?time<=2024-01-02")]
        );
    }

    #[test]
    fn limit_operation_uses_numeric_limit_field() {
        let mut options = SelectionOptions::default()
            .with_datasets(["Kp"])
            .with_operation(Operation::Limit, "999");
        options.limit = 25;

        let urls = build_urls(BASE, &catalog(), &options);
        assert_eq!(urls, vec![format!("{BASE}kp_gfz.csv?limit(25)")]);
        assert_eq!(urls[0].matches("limit(").count(), 1);
    }

    #[test]
    fn zero_limit_drops_limit_call() {
        let mut options = SelectionOptions::default()
            .with_datasets(["Kp"])
            .with_operation(Operation::Limit, "")
            .with_operation(Operation::Min, "kp");
        options.limit = 0;

        assert_eq!(
            build_urls(BASE, &catalog(), &options),
            vec![format!("{BASE}kp_gfz.csv?min(kp)")]
        );
    }

    #[test]
    fn operations_keep_user_order_and_empty_values() {
        let options = SelectionOptions::default()
            .with_datasets(["Kp"])
            .with_operation(Operation::FormatTime, "yyyy-MM-dd")
            .with_operation(Operation::Rename, "")
            .with_operation(Operation::Limit, "")
            .with_operation(Operation::Rename, "kp,Kp");

        assert_eq!(
            build_urls(BASE, &catalog(), &options),
            vec![format!(
                "{BASE}kp_gfz.csv?formatTime(yyyy-MM-dd)&rename(kp,Kp)&limit(10)"
            )]
        );

        let empty = SelectionOptions::default()
            .with_datasets(["Kp"])
            .with_operation(Operation::Max, "");
        assert_eq!(
            build_urls(BASE, &catalog(), &empty),
            vec![format!("{BASE}kp_gfz.csv?max()")]
        );
    }

    #[test]
    fn values_are_not_percent_encoded() {
        let options = SelectionOptions::default()
            .with_datasets(["Kp"])
            .with_operation(Operation::Rename, "a b&c,d");
        assert_eq!(
            build_urls(BASE, &catalog(), &options),
            vec![format!("{BASE}kp_gfz.csv?rename(a b&c,d)")]
        );
    }

    #[test]
    fn unknown_datasets_are_skipped_and_order_is_kept() {
        let options = SelectionOptions::default().with_datasets(["Dst", "AE", "Kp"]);
        let urls = build_dataset_urls(BASE, &catalog(), &options);

        let names: Vec<_> = urls.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Dst", "Kp"]);
        assert_eq!(urls[0].url, format!("{BASE}dst_kyoto.csv?"));
    }

    #[test]
    fn operation_choice_parses_cli_syntax() -> Result<(), String> {
        assert_eq!(
            "rename=old,new".parse::<OperationChoice>()?,
            OperationChoice::new(Operation::Rename, "old,new")
        );
        assert_eq!(
            "limit".parse::<OperationChoice>()?,
            OperationChoice::new(Operation::Limit, "")
        );
        assert!("median=x".parse::<OperationChoice>().is_err());
        Ok(())
    }
}
