use serde::Serialize;

use crate::domain::EventCategory;
use crate::error::FetchError;

use super::event::{DateWindow, Event};
use super::source::EventSource;

/// Result of one refresh: the merged events plus the categories that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchReport {
    pub events: Vec<Event>,
    pub unavailable: Vec<EventCategory>,
}

impl FetchReport {
    pub fn count(&self, category: EventCategory) -> usize {
        self.events
            .iter()
            .filter(|event| event.category == category)
            .count()
    }
}

/// Fetches GST, FLR and CME events and merges them in that order.
///
/// A category whose request fails contributes nothing; the failure is
/// logged and never surfaced as an error.
#[derive(Debug, Clone)]
pub struct EventAggregator<S> {
    source: S,
}

impl<S: EventSource> EventAggregator<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    pub async fn fetch_events(&self, window: DateWindow) -> Vec<Event> {
        self.fetch_report(window).await.events
    }

    pub async fn fetch_report(&self, window: DateWindow) -> FetchReport {
        let [storms, flares, ejections] = EventCategory::ALL;
        let (storms_result, flares_result, ejections_result) = tokio::join!(
            self.source.fetch(storms, window),
            self.source.fetch(flares, window),
            self.source.fetch(ejections, window),
        );

        let mut report = FetchReport::default();
        for (category, result) in [
            (storms, storms_result),
            (flares, flares_result),
            (ejections, ejections_result),
        ] {
            merge(&mut report, category, result);
        }

        tracing::debug!(
            events = report.events.len(),
            unavailable = report.unavailable.len(),
            "event refresh finished"
        );
        report
    }
}

fn merge(report: &mut FetchReport, category: EventCategory, result: Result<Vec<Event>, FetchError>) {
    match result {
        Ok(events) => report.events.extend(events),
        Err(e) => {
            tracing::warn!(%category, "dropping category: {e}");
            report.unavailable.push(category);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donki::source::BoxFuture;
    use chrono::NaiveDate;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory source answering each category with a canned outcome.
    struct CannedSource {
        answers: HashMap<EventCategory, Option<Vec<Event>>>,
        calls: Mutex<Vec<EventCategory>>,
    }

    impl CannedSource {
        fn new() -> Self {
            Self {
                answers: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn ok(mut self, category: EventCategory, events: Vec<Event>) -> Self {
            self.answers.insert(category, Some(events));
            self
        }

        fn failing(mut self, category: EventCategory) -> Self {
            self.answers.insert(category, None);
            self
        }
    }

    impl EventSource for CannedSource {
        fn fetch(
            &self,
            category: EventCategory,
            _window: DateWindow,
        ) -> BoxFuture<'_, Result<Vec<Event>, FetchError>> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(category);
            }
            let answer = match self.answers.get(&category) {
                Some(Some(events)) => Ok(events.clone()),
                _ => Err(FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
            };
            Box::pin(async move { answer })
        }
    }

    fn window() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        )
    }

    #[tokio::test]
    async fn all_failures_yield_empty_events() {
        let source = CannedSource::new()
            .failing(EventCategory::GeomagneticStorm)
            .failing(EventCategory::SolarFlare)
            .failing(EventCategory::CoronalMassEjection);
        let aggregator = EventAggregator::new(source);

        let report = aggregator.fetch_report(window()).await;
        assert!(report.events.is_empty());
        assert_eq!(report.unavailable, EventCategory::ALL.to_vec());
        assert!(aggregator.fetch_events(window()).await.is_empty());
    }

    #[tokio::test]
    async fn results_are_concatenated_in_category_order() {
        let source = CannedSource::new()
            .ok(
                EventCategory::CoronalMassEjection,
                vec![Event::new(EventCategory::CoronalMassEjection).with_start_time("c")],
            )
            .ok(
                EventCategory::GeomagneticStorm,
                vec![
                    Event::new(EventCategory::GeomagneticStorm).with_start_time("g1"),
                    Event::new(EventCategory::GeomagneticStorm).with_start_time("g2"),
                ],
            )
            .ok(
                EventCategory::SolarFlare,
                vec![Event::new(EventCategory::SolarFlare).with_start_time("f")],
            );
        let aggregator = EventAggregator::new(source);

        let events = aggregator.fetch_events(window()).await;
        let times: Vec<_> = events
            .iter()
            .filter_map(|event| event.start_time.as_deref())
            .collect();
        assert_eq!(times, vec!["g1", "g2", "f", "c"]);
    }

    #[tokio::test]
    async fn one_failing_category_is_dropped_silently() {
        let source = CannedSource::new()
            .ok(
                EventCategory::GeomagneticStorm,
                vec![Event::new(EventCategory::GeomagneticStorm)],
            )
            .failing(EventCategory::SolarFlare)
            .ok(
                EventCategory::CoronalMassEjection,
                vec![Event::new(EventCategory::CoronalMassEjection)],
            );
        let aggregator = EventAggregator::new(source);

        let report = aggregator.fetch_report(window()).await;
        assert_eq!(report.events.len(), 2);
        assert_eq!(report.unavailable, vec![EventCategory::SolarFlare]);
        assert_eq!(report.count(EventCategory::SolarFlare), 0);
        assert_eq!(report.count(EventCategory::GeomagneticStorm), 1);

        let calls = aggregator.source().calls.lock().map(|c| c.len()).unwrap_or(0);
        assert_eq!(calls, 3);
    }
}
