use std::collections::BTreeMap;

use common::text::same_key;
use normalizer::{IssueTable, LabelRow};
use serde::Serialize;
use tracing::info;

use crate::counts::{rank_counts, Count};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreatorLabelCounts {
    pub creator: String,
    pub label: String,
    pub opened: usize,
    pub closed: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LabelActivity {
    pub rows: usize,
    pub closed_rows: usize,
    pub average_days_to_close: Option<f64>,
    pub by_creator_label: Vec<CreatorLabelCounts>,
    pub label_frequency: Vec<Count>,
}

/// Label-grained rows restricted to one label and/or one creator. `None`
/// leaves that dimension unrestricted.
pub fn filter_issues<'a>(
    table: &'a IssueTable,
    label: Option<&str>,
    creator: Option<&str>,
) -> Vec<LabelRow<'a>> {
    let rows: Vec<LabelRow<'a>> = table
        .explode_labels()
        .into_iter()
        .filter(|row| match label {
            Some(wanted) => row.label.is_some_and(|l| same_key(l, wanted)),
            None => true,
        })
        .filter(|row| match creator {
            Some(wanted) => row
                .issue
                .creator
                .as_deref()
                .is_some_and(|c| same_key(c, wanted)),
            None => true,
        })
        .collect();
    info!(rows = rows.len(), ?label, ?creator, "filtered issues");
    rows
}

/// Opened/closed counts per creator and label plus the mean close time.
/// A row counts as closed once it carries a closing date.
pub fn label_activity(rows: &[LabelRow<'_>]) -> LabelActivity {
    let closed: Vec<&LabelRow<'_>> = rows.iter().filter(|r| r.issue.closed_at.is_some()).collect();

    let days: Vec<i64> = closed
        .iter()
        .filter_map(|r| r.issue.time_to_close())
        .map(|d| d.num_days())
        .collect();
    let average_days_to_close = if days.is_empty() {
        None
    } else {
        Some(days.iter().sum::<i64>() as f64 / days.len() as f64)
    };

    let mut grid: BTreeMap<(String, String), (usize, usize)> = BTreeMap::new();
    for row in rows {
        let (Some(creator), Some(label)) = (row.issue.creator.as_deref(), row.label) else {
            continue;
        };
        let cell = grid
            .entry((creator.to_string(), label.to_string()))
            .or_insert((0, 0));
        cell.0 += 1;
        if row.issue.closed_at.is_some() {
            cell.1 += 1;
        }
    }

    LabelActivity {
        rows: rows.len(),
        closed_rows: closed.len(),
        average_days_to_close,
        by_creator_label: grid
            .into_iter()
            .map(|((creator, label), (opened, closed))| CreatorLabelCounts {
                creator,
                label,
                opened,
                closed,
            })
            .collect(),
        label_frequency: rank_counts(rows.iter().filter_map(|r| r.label)),
    }
}
