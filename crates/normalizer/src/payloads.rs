use serde::Deserialize;
use serde_json::Value;

/// Raw issue object as found in the export. Every field is optional and kept
/// as an untyped JSON value until the record model coerces it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssuePayload {
    pub number: Value,
    pub creator: Value,
    pub title: Value,
    pub text: Value,
    pub state: Value,
    pub labels: Value,
    pub assignees: Value,
    pub created_date: Value,
    pub updated_date: Value,
    pub url: Value,
    pub timeline_url: Value,
    pub events: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventPayload {
    pub event_type: Value,
    pub author: Value,
    pub event_date: Value,
    pub label: Value,
    pub comment: Value,
}

impl IssuePayload {
    /// Anything that is not a JSON object yields an all-empty payload.
    pub fn from_value(raw: &Value) -> Self {
        if !raw.is_object() {
            return Self::default();
        }
        Self::deserialize(raw).unwrap_or_default()
    }

    pub fn event_values(&self) -> &[Value] {
        match &self.events {
            Value::Array(items) => items.as_slice(),
            _ => &[],
        }
    }
}

impl EventPayload {
    pub fn from_value(raw: &Value) -> Self {
        if !raw.is_object() {
            return Self::default();
        }
        Self::deserialize(raw).unwrap_or_default()
    }
}
