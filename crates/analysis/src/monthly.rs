use chrono::Datelike;
use normalizer::{IssueTable, State};
use serde::Serialize;

/// Issues opened and closed per calendar month, January first. Years are
/// folded together.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MonthlyHistogram {
    pub opened: [usize; 12],
    pub closed: [usize; 12],
}

impl MonthlyHistogram {
    pub fn is_empty(&self) -> bool {
        self.opened.iter().all(|&n| n == 0) && self.closed.iter().all(|&n| n == 0)
    }

    pub fn total_opened(&self) -> usize {
        self.opened.iter().sum()
    }

    pub fn total_closed(&self) -> usize {
        self.closed.iter().sum()
    }
}

pub fn monthly_histogram(table: &IssueTable) -> MonthlyHistogram {
    let mut histogram = MonthlyHistogram::default();
    for issue in table {
        if let Some(created) = issue.created_date {
            histogram.opened[created.month0() as usize] += 1;
        }
        if issue.state == State::Closed {
            if let Some(closed) = issue.closed_at {
                histogram.closed[closed.month0() as usize] += 1;
            }
        }
    }
    histogram
}
