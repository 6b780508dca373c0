use std::collections::BTreeMap;

use normalizer::{IssueTable, State};
use serde::Serialize;

use crate::SECONDS_PER_DAY;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LabelCloseTime {
    pub label: String,
    pub issues: usize,
    pub average_seconds: i64,
}

impl LabelCloseTime {
    pub fn average_days(&self) -> f64 {
        self.average_seconds as f64 / SECONDS_PER_DAY
    }
}

/// Mean creation-to-closure time per label, labels in alphabetical order.
/// Only closed issues with both a creation and a closing date contribute.
pub fn average_close_time_by_label(table: &IssueTable) -> Vec<LabelCloseTime> {
    let mut per_label: BTreeMap<&str, Vec<i64>> = BTreeMap::new();
    for issue in table.iter().filter(|i| i.state == State::Closed) {
        let Some(elapsed) = issue.time_to_close() else {
            continue;
        };
        for label in &issue.labels {
            per_label
                .entry(label.as_str())
                .or_default()
                .push(elapsed.num_seconds());
        }
    }

    per_label
        .into_iter()
        .map(|(label, seconds)| LabelCloseTime {
            label: label.to_string(),
            issues: seconds.len(),
            average_seconds: seconds.iter().sum::<i64>() / seconds.len() as i64,
        })
        .collect()
}
