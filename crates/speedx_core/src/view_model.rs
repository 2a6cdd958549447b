use serde_json::Value;

use crate::{metric_label, SessionState, Status};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url: String,
    pub status: Status,
    pub content: ContentView,
}

/// The one thing the result area shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContentView {
    #[default]
    Empty,
    Loading,
    Metrics(Vec<MetricCard>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub key: String,
    pub label: String,
    pub value: Value,
}

impl MetricCard {
    fn new(key: &str, value: &Value) -> Self {
        Self {
            key: key.to_string(),
            label: metric_label(key).to_string(),
            value: value.clone(),
        }
    }

    /// Display form of the value: strings verbatim, `null` as empty, anything else as JSON.
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Projects the session onto the result area. Cards keep the backend's key order.
pub fn content_view(session: &SessionState) -> ContentView {
    match session.status() {
        Status::Initial => ContentView::Empty,
        Status::InProgress => ContentView::Loading,
        Status::Success => ContentView::Metrics(
            session
                .metrics()
                .map(|metrics| {
                    metrics
                        .iter()
                        .map(|(key, value)| MetricCard::new(key, value))
                        .collect()
                })
                .unwrap_or_default(),
        ),
        Status::Failure => ContentView::Error(session.error().unwrap_or_default().to_string()),
    }
}
