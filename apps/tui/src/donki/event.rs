use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::EventCategory;

/// A DONKI notification tagged with the category it was fetched under.
///
/// `start_time`, `note` and `source_location` drive plotting and labels;
/// every other upstream field is kept in `fields` for the data table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub category: EventCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_location: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Raw record as returned by the DONKI API, before tagging.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    source_location: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl EventRecord {
    fn into_event(self, category: EventCategory) -> Event {
        Event {
            category,
            start_time: self.start_time,
            note: self.note,
            source_location: self.source_location,
            fields: self.fields,
        }
    }
}

impl Event {
    pub fn new(category: EventCategory) -> Self {
        Self {
            category,
            start_time: None,
            note: None,
            source_location: None,
            fields: Map::new(),
        }
    }

    #[must_use]
    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn with_source_location(mut self, location: impl Into<String>) -> Self {
        self.source_location = Some(location.into());
        self
    }

    /// Parses a DONKI response body (a JSON array) and tags every record.
    pub fn parse_list(category: EventCategory, body: &str) -> Result<Vec<Self>, serde_json::Error> {
        let records: Vec<EventRecord> = serde_json::from_str(body)?;
        Ok(records
            .into_iter()
            .map(|record| record.into_event(category))
            .collect())
    }

    /// Upstream identifier (`gstID`, `flrID` or `activityID`).
    pub fn id(&self) -> Option<&str> {
        ["gstID", "flrID", "activityID"]
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(Value::as_str))
    }

    /// Time shown in tables. Flares only carry `beginTime`, so fall back to it.
    pub fn display_time(&self) -> &str {
        self.start_time
            .as_deref()
            .or_else(|| self.fields.get("beginTime").and_then(Value::as_str))
            .unwrap_or("-")
    }
}

/// Inclusive calendar-date range sent to the event provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub const DEFAULT_DAYS: u32 = 30;

    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days` days leading up to and including `end`.
    pub fn last_days(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
