use chrono::NaiveDate;
use space_weather_explorer::catalog::DatasetCatalog;
use space_weather_explorer::query::{SelectionOptions, DEFAULT_LIMIT};
use space_weather_explorer::{Operation, OutputFormat};

use crate::app::input::helpers::{wrap_decrement, wrap_increment};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which part of the dataset form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Datasets,
    TimeStart,
    TimeEnd,
    Limit,
    Format,
    Operations,
    OperationValues,
}

impl FormField {
    pub const ALL: [Self; 7] = [
        Self::Datasets,
        Self::TimeStart,
        Self::TimeEnd,
        Self::Limit,
        Self::Format,
        Self::Operations,
        Self::OperationValues,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Datasets => "Select Dataset(s)",
            Self::TimeStart => "Start Time",
            Self::TimeEnd => "End Time",
            Self::Limit => "Limit Results",
            Self::Format => "Select Format",
            Self::Operations => "Select Operations",
            Self::OperationValues => "Operation Values",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[wrap_increment(self.index(), Self::ALL.len())]
    }

    pub fn prev(self) -> Self {
        Self::ALL[wrap_decrement(self.index(), Self::ALL.len())]
    }
}

/// Raw widget state of the dataset configuration form.
///
/// Text inputs are kept verbatim; [`DatasetForm::to_options`] turns them
/// into a [`SelectionOptions`] each time the URLs are rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetForm {
    pub field: FormField,
    pub filter: String,
    pub dataset_cursor: usize,
    pub selected: Vec<String>,
    pub time_start_input: String,
    pub time_end_input: String,
    pub limit_input: String,
    pub format: OutputFormat,
    pub operation_cursor: usize,
    /// Chosen operations with their values, in the order they were picked
    pub operations: Vec<(Operation, String)>,
    pub value_cursor: usize,
}

impl Default for DatasetForm {
    fn default() -> Self {
        Self {
            field: FormField::Datasets,
            filter: String::new(),
            dataset_cursor: 0,
            selected: Vec::new(),
            time_start_input: String::new(),
            time_end_input: String::new(),
            limit_input: DEFAULT_LIMIT.to_string(),
            format: OutputFormat::default(),
            operation_cursor: 0,
            operations: Vec::new(),
            value_cursor: 0,
        }
    }
}

impl DatasetForm {
    /// Pre-fills the form, e.g. from command line flags.
    pub fn from_options(options: &SelectionOptions) -> Self {
        Self {
            selected: options.selected_datasets.clone(),
            time_start_input: options
                .time_start
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            time_end_input: options
                .time_end
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            limit_input: options.limit.to_string(),
            format: options.format,
            operations: options
                .operations()
                .iter()
                .map(|choice| (choice.operation, choice.value.clone()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn to_options(&self) -> SelectionOptions {
        let mut options = SelectionOptions::default().with_datasets(self.selected.iter().cloned());
        options.time_start = parse_date(&self.time_start_input).ok().flatten();
        options.time_end = parse_date(&self.time_end_input).ok().flatten();
        options.limit = parse_limit(&self.limit_input).unwrap_or(DEFAULT_LIMIT);
        options.format = self.format;
        for (operation, value) in &self.operations {
            options.set_operation(*operation, value.clone());
        }
        options
    }

    /// Validation message for a field, if its input is unusable.
    pub fn field_error(&self, field: FormField) -> Option<&'static str> {
        match field {
            FormField::TimeStart if parse_date(&self.time_start_input).is_err() => {
                Some("expected YYYY-MM-DD")
            }
            FormField::TimeEnd if parse_date(&self.time_end_input).is_err() => {
                Some("expected YYYY-MM-DD")
            }
            FormField::Limit if parse_limit(&self.limit_input).is_none() => {
                Some("expected a whole number >= 1")
            }
            _ => None,
        }
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn prev_field(&mut self) {
        self.field = self.field.prev();
    }

    /// Dataset names visible under the current filter.
    pub fn visible_datasets<'a>(&self, catalog: &'a DatasetCatalog) -> Vec<&'a str> {
        catalog.search(&self.filter)
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|n| n == name)
    }

    pub fn move_dataset_cursor(&mut self, catalog: &DatasetCatalog, down: bool) {
        let len = self.visible_datasets(catalog).len();
        self.dataset_cursor = if down {
            wrap_increment(self.dataset_cursor, len)
        } else {
            wrap_decrement(self.dataset_cursor, len)
        };
    }

    /// Selects or deselects the dataset under the cursor.
    pub fn toggle_dataset_at_cursor(&mut self, catalog: &DatasetCatalog) {
        let Some(name) = self
            .visible_datasets(catalog)
            .get(self.dataset_cursor)
            .map(ToString::to_string)
        else {
            return;
        };
        self.toggle_dataset(&name);
    }

    pub fn toggle_dataset(&mut self, name: &str) {
        if self.is_selected(name) {
            self.selected.retain(|n| n != name);
        } else {
            self.selected.push(name.to_string());
        }
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.dataset_cursor = 0;
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.dataset_cursor = 0;
    }

    pub fn toggle_format(&mut self) {
        self.format = self.format.toggled();
    }

    pub fn move_operation_cursor(&mut self, down: bool) {
        let len = Operation::ALL.len();
        self.operation_cursor = if down {
            wrap_increment(self.operation_cursor, len)
        } else {
            wrap_decrement(self.operation_cursor, len)
        };
    }

    pub fn is_operation_chosen(&self, operation: Operation) -> bool {
        self.operations.iter().any(|(op, _)| *op == operation)
    }

    pub fn toggle_operation_at_cursor(&mut self) {
        if let Some(operation) = Operation::from_index(self.operation_cursor) {
            self.toggle_operation(operation);
        }
    }

    pub fn toggle_operation(&mut self, operation: Operation) {
        if self.is_operation_chosen(operation) {
            self.operations.retain(|(op, _)| *op != operation);
            self.value_cursor = self.value_cursor.min(self.operations.len().saturating_sub(1));
        } else {
            self.operations.push((operation, String::new()));
        }
    }

    pub fn move_value_cursor(&mut self, down: bool) {
        let len = self.operations.len();
        self.value_cursor = if down {
            wrap_increment(self.value_cursor, len)
        } else {
            wrap_decrement(self.value_cursor, len)
        };
    }

    /// Text buffer for the focused text field, if the field takes text.
    pub fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Datasets => Some(&mut self.filter),
            FormField::TimeStart => Some(&mut self.time_start_input),
            FormField::TimeEnd => Some(&mut self.time_end_input),
            FormField::Limit => Some(&mut self.limit_input),
            FormField::OperationValues => self
                .operations
                .get_mut(self.value_cursor)
                .map(|(_, value)| value),
            FormField::Format | FormField::Operations => None,
        }
    }

    /// Types a character into the focused field. Returns true if anything changed.
    pub fn type_char(&mut self, c: char) -> bool {
        match self.field {
            FormField::Datasets => {
                self.push_filter_char(c);
                true
            }
            FormField::Limit if !c.is_ascii_digit() => false,
            FormField::TimeStart | FormField::TimeEnd if !(c.is_ascii_digit() || c == '-') => false,
            _ => self.active_text_mut().is_some_and(|text| {
                text.push(c);
                true
            }),
        }
    }

    pub fn backspace(&mut self) -> bool {
        if self.field == FormField::Datasets {
            self.pop_filter_char();
            return true;
        }
        self.active_text_mut().is_some_and(|text| text.pop().is_some())
    }
}

/// Empty input means "no bound"; anything else must be a valid date.
fn parse_date(input: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map(Some)
}

fn parse_limit(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|limit| *limit >= 1)
}
