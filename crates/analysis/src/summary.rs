use common::config::ReportConfig;
use common::text::same_key;
use normalizer::{IssueTable, State};
use serde::Serialize;

use crate::counts::{top_n, Count};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResolutionStats {
    pub samples: usize,
    pub average_days: f64,
    pub histogram: Vec<HistogramBin>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub issue_count: usize,
    pub user: Option<String>,
    pub total_events: usize,
    pub top_creators: Vec<Count>,
    pub states: Vec<Count>,
    pub top_labels: Vec<Count>,
    pub resolution: Option<ResolutionStats>,
}

/// Overview of the whole table. When `user` is given, only that user's
/// events are counted.
pub fn summary(table: &IssueTable, user: Option<&str>, config: &ReportConfig) -> Summary {
    let total_events = table
        .iter()
        .flat_map(|issue| issue.events.iter())
        .filter(|event| match user {
            Some(user) => event.author.as_deref().is_some_and(|a| same_key(a, user)),
            None => true,
        })
        .count();

    let states = top_n(
        table
            .iter()
            .filter(|i| i.state != State::Unknown)
            .map(|i| i.state.as_str()),
        usize::MAX,
    );

    Summary {
        issue_count: table.len(),
        user: user.map(str::to_string),
        total_events,
        top_creators: top_n(
            table.iter().filter_map(|i| i.creator.as_deref()),
            config.top_creators,
        ),
        states,
        top_labels: top_n(
            table.iter().flat_map(|i| i.labels.iter().map(String::as_str)),
            config.top_labels,
        ),
        resolution: resolution_stats(table, config.histogram_bins),
    }
}

/// Issues closed per closing user.
pub fn top_closers(table: &IssueTable, n: usize) -> Vec<Count> {
    top_n(table.iter().filter_map(|i| i.closed_by.as_deref()), n)
}

/// Days from creation to last update for closed issues.
fn resolution_stats(table: &IssueTable, bins: usize) -> Option<ResolutionStats> {
    let days: Vec<f64> = table
        .iter()
        .filter(|i| i.state == State::Closed)
        .filter_map(|i| Some((i.updated_date? - i.created_date?).num_days() as f64))
        .collect();
    if days.is_empty() {
        return None;
    }

    Some(ResolutionStats {
        samples: days.len(),
        average_days: days.iter().sum::<f64>() / days.len() as f64,
        histogram: histogram(&days, bins),
    })
}

/// Equal-width bins over the sample range; the last bin is closed on the
/// right. A degenerate range is widened by half a unit on each side.
fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for &value in values {
        let idx = (((value - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn summarizes_whole_table() {
        let table = fixtures::table();
        let s = summary(&table, None, &ReportConfig::default());

        assert_eq!(s.issue_count, 4);
        assert_eq!(s.total_events, 4);
        assert_eq!(s.top_creators[0], Count { key: "alice".into(), count: 2 });
        assert_eq!(
            s.states,
            vec![
                Count { key: "closed".into(), count: 2 },
                Count { key: "open".into(), count: 2 }
            ]
        );
        assert_eq!(s.top_labels[0], Count { key: "bug".into(), count: 2 });

        let resolution = s.resolution.unwrap();
        assert_eq!(resolution.samples, 2);
        assert_eq!(resolution.average_days, 7.0);
        assert_eq!(resolution.histogram.len(), 20);
        assert_eq!(resolution.histogram.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn counts_only_the_users_events() {
        let table = fixtures::table();
        let s = summary(&table, Some("BOB"), &ReportConfig::default());
        assert_eq!(s.total_events, 2);
        assert_eq!(s.user.as_deref(), Some("BOB"));
    }

    #[test]
    fn top_closers_uses_normalized_names() {
        let closers = top_closers(&fixtures::table(), 10);
        assert_eq!(
            closers,
            vec![
                Count { key: "bob".into(), count: 1 },
                Count { key: "carol".into(), count: 1 }
            ]
        );
    }

    #[test]
    fn histogram_handles_single_value() {
        let bins = histogram(&[3.0, 3.0], 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].start, 2.5);
        assert_eq!(bins[3].end, 3.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn histogram_puts_max_in_last_bin() {
        let bins = histogram(&[0.0, 10.0], 5);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[4].count, 1);
    }
}
