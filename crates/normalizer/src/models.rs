use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stand-in for an issue number that was missing or not an integer.
pub const INVALID_NUMBER: i64 = -1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Open,
    Closed,
    #[default]
    Unknown,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Open => "open",
            State::Closed => "closed",
            State::Unknown => "unknown",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, State::Closed)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Event {
    pub event_type: Option<String>,
    pub author: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub label: Option<String>,
    pub comment: Option<String>,
}

impl Event {
    pub fn is_type(&self, event_type: &str) -> bool {
        self.event_type.as_deref() == Some(event_type)
    }
}

/// One row of the normalized table. `closed_by` and `closed_at` are only
/// populated by the ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub number: i64,
    pub creator: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub state: State,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
    pub closed_by: Option<String>,
    pub closed_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub timeline_url: Option<String>,
    pub events: Vec<Event>,
}

impl Default for Issue {
    fn default() -> Self {
        Self {
            number: INVALID_NUMBER,
            creator: None,
            title: None,
            text: None,
            state: State::Unknown,
            labels: Vec::new(),
            assignees: Vec::new(),
            created_date: None,
            updated_date: None,
            closed_by: None,
            closed_at: None,
            url: None,
            timeline_url: None,
            events: Vec::new(),
        }
    }
}

impl Issue {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Wall-clock time from creation to the first recorded closure.
    pub fn time_to_close(&self) -> Option<chrono::Duration> {
        Some(self.closed_at? - self.created_date?)
    }
}
