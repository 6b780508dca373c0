use std::collections::HashSet;

use chrono::{DateTime, Utc};
use common::text::normalize_opt;
use serde_json::Value;
use tracing::{debug, warn};

use crate::coerce::{
    coerce_date, coerce_number, coerce_state, coerce_string, coerce_string_list, or_null,
};
use crate::models::{Event, Issue, State, INVALID_NUMBER};
use crate::payloads::{EventPayload, IssuePayload};
use crate::table::IssueTable;

pub fn parse_event(raw: &Value) -> Event {
    let payload = EventPayload::from_value(raw);
    Event {
        event_type: or_null("event_type", coerce_string(&payload.event_type)),
        author: or_null("author", coerce_string(&payload.author)),
        event_date: or_null("event_date", coerce_date(&payload.event_date)),
        label: or_null("label", coerce_string(&payload.label)),
        comment: or_null("comment", coerce_string(&payload.comment)),
    }
}

/// Builds an [`Issue`] from one raw export object. String fields pass through
/// untouched here; case folding happens when the table is assembled.
pub fn parse_issue(raw: &Value) -> Issue {
    parse_record(raw).0
}

/// Like [`parse_issue`], also reporting whether `number` coerced to an
/// integer. A source `-1` is valid even though it equals the sentinel.
fn parse_record(raw: &Value) -> (Issue, bool) {
    let payload = IssuePayload::from_value(raw);
    let number = or_null("number", coerce_number(&payload.number));
    let issue = Issue {
        number: number.unwrap_or(INVALID_NUMBER),
        creator: or_null("creator", coerce_string(&payload.creator)),
        title: or_null("title", coerce_string(&payload.title)),
        text: or_null("text", coerce_string(&payload.text)),
        state: or_null("state", coerce_state(&payload.state)).unwrap_or(State::Unknown),
        labels: or_null("labels", coerce_string_list(&payload.labels)).unwrap_or_default(),
        assignees: or_null("assignees", coerce_string_list(&payload.assignees))
            .unwrap_or_default(),
        created_date: or_null("created_date", coerce_date(&payload.created_date)),
        updated_date: or_null("updated_date", coerce_date(&payload.updated_date)),
        closed_by: None,
        closed_at: None,
        url: or_null("url", coerce_string(&payload.url)),
        timeline_url: or_null("timeline_url", coerce_string(&payload.timeline_url)),
        events: payload.event_values().iter().map(parse_event).collect(),
    };
    (issue, number.is_some())
}

/// Author and date of the first `closed` event in timeline order. Later
/// reopen/close cycles are ignored, so this is the initial closure.
pub fn derive_closing_event(events: &[Event]) -> (Option<String>, Option<DateTime<Utc>>) {
    events
        .iter()
        .find(|event| event.is_type("closed"))
        .map(|event| (event.author.clone(), event.event_date))
        .unwrap_or((None, None))
}

/// Turns raw export objects into the canonical issue table.
///
/// Rows keep source order. Issues without a usable number are dropped, and
/// for repeated numbers only the first occurrence survives.
pub fn normalize(raw_issues: &[Value]) -> IssueTable {
    let mut seen = HashSet::with_capacity(raw_issues.len());
    let mut rows = Vec::with_capacity(raw_issues.len());
    let mut invalid = 0usize;
    let mut duplicates = 0usize;

    for raw in raw_issues {
        let (mut issue, has_number) = parse_record(raw);
        if issue.state.is_closed() {
            let (closed_by, closed_at) = derive_closing_event(&issue.events);
            issue.closed_by = closed_by;
            issue.closed_at = closed_at;
        }

        if !has_number {
            invalid += 1;
            continue;
        }
        if !seen.insert(issue.number) {
            debug!(number = issue.number, "duplicate issue number dropped");
            duplicates += 1;
            continue;
        }
        rows.push(normalize_columns(issue));
    }

    if invalid > 0 || duplicates > 0 {
        warn!(invalid, duplicates, kept = rows.len(), "dropped issue rows");
    }

    IssueTable::new(rows)
}

fn normalize_columns(issue: Issue) -> Issue {
    Issue {
        creator: normalize_opt(issue.creator.as_deref()),
        title: normalize_opt(issue.title.as_deref()),
        closed_by: normalize_opt(issue.closed_by.as_deref()),
        ..issue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_with_bad_date_keeps_other_fields() {
        let event = parse_event(&json!({
            "event_type": "commented",
            "author": "alice",
            "event_date": "not a date",
            "comment": "hello"
        }));
        assert_eq!(event.event_type.as_deref(), Some("commented"));
        assert_eq!(event.author.as_deref(), Some("alice"));
        assert_eq!(event.event_date, None);
        assert_eq!(event.comment.as_deref(), Some("hello"));
        assert_eq!(event.label, None);
    }

    #[test]
    fn issue_defaults_for_non_object() {
        let issue = parse_issue(&json!("just a string"));
        assert_eq!(issue.number, INVALID_NUMBER);
        assert_eq!(issue.state, State::Unknown);
        assert!(issue.labels.is_empty());
        assert!(issue.events.is_empty());
    }

    #[test]
    fn positional_arrays_are_not_issues() {
        let issue = parse_issue(&json!([42, "alice"]));
        assert_eq!(issue.number, INVALID_NUMBER);
        assert_eq!(issue.creator, None);
    }

    #[test]
    fn issue_parses_mixed_fields() {
        let issue = parse_issue(&json!({
            "number": "12",
            "creator": " Alice ",
            "state": "merged",
            "labels": null,
            "assignees": ["bob"],
            "created_date": "2023-01-05T00:00:00Z",
            "updated_date": "garbage",
            "events": [{"event_type": "labeled", "label": "bug"}, 17]
        }));
        assert_eq!(issue.number, 12);
        assert_eq!(issue.creator.as_deref(), Some(" Alice "));
        assert_eq!(issue.state, State::Unknown);
        assert!(issue.labels.is_empty());
        assert_eq!(issue.assignees, vec!["bob".to_string()]);
        assert!(issue.created_date.is_some());
        assert_eq!(issue.updated_date, None);
        assert_eq!(issue.events.len(), 2);
        assert_eq!(issue.events[0].label.as_deref(), Some("bug"));
        assert_eq!(issue.events[1], Event::default());
    }

    #[test]
    fn closing_event_is_first_closed() {
        let events = vec![
            parse_event(&json!({"event_type": "closed", "author": "first", "event_date": "2023-01-01"})),
            parse_event(&json!({"event_type": "reopened", "author": "x"})),
            parse_event(&json!({"event_type": "closed", "author": "second", "event_date": "2023-06-01"})),
        ];
        let (by, at) = derive_closing_event(&events);
        assert_eq!(by.as_deref(), Some("first"));
        assert_eq!(at, parse_event(&json!({"event_date": "2023-01-01"})).event_date);
    }

    #[test]
    fn no_closing_event_yields_nulls() {
        let events = vec![parse_event(&json!({"event_type": "opened", "author": "a"}))];
        assert_eq!(derive_closing_event(&events), (None, None));
        assert_eq!(derive_closing_event(&[]), (None, None));
    }

    #[test]
    fn open_issue_ignores_closed_events() {
        let table = normalize(&[json!({
            "number": 1,
            "state": "open",
            "events": [{"event_type": "closed", "author": "bob", "event_date": "2023-01-01"}]
        })]);
        let row = &table.rows()[0];
        assert_eq!(row.closed_by, None);
        assert_eq!(row.closed_at, None);
    }

    #[test]
    fn normalize_lowercases_categorical_columns() {
        let table = normalize(&[json!({
            "number": 3,
            "creator": "  Carol ",
            "title": " Crash On Start ",
            "state": "closed",
            "events": [{"event_type": "closed", "author": " Dave "}]
        })]);
        let row = &table.rows()[0];
        assert_eq!(row.creator.as_deref(), Some("carol"));
        assert_eq!(row.title.as_deref(), Some("crash on start"));
        assert_eq!(row.closed_by.as_deref(), Some("dave"));
        assert_eq!(row.state, State::Closed);
    }

    #[test]
    fn normalize_drops_invalid_numbers() {
        let table = normalize(&[
            json!({"title": "no number"}),
            json!({"number": "abc"}),
            json!({"number": 5}),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].number, 5);
    }

    #[test]
    fn normalize_keeps_literal_negative_one() {
        let table = normalize(&[
            json!({"number": -1, "title": "Real"}),
            json!({"number": "-1", "title": "Dup"}),
            json!({"number": 2}),
        ]);
        let numbers: Vec<i64> = table.iter().map(|i| i.number).collect();
        assert_eq!(numbers, vec![-1, 2]);
        assert_eq!(table.rows()[0].title.as_deref(), Some("real"));
    }
}
