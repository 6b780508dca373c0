use common::text::content_hash;
use serde::Serialize;

use crate::models::Issue;

/// The canonical issue-grained table. Rows are fixed at construction; every
/// filter or reshaping produces a new view and leaves this one intact.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct IssueTable {
    rows: Vec<Issue>,
}

/// One `(issue, label)` pair of the label-grained view. Issues without labels
/// contribute a single row with no label.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LabelRow<'a> {
    pub label: Option<&'a str>,
    #[serde(flatten)]
    pub issue: &'a Issue,
}

impl IssueTable {
    pub(crate) fn new(rows: Vec<Issue>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Issue] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, number: i64) -> Option<&Issue> {
        self.rows.iter().find(|issue| issue.number == number)
    }

    pub fn filter<F>(&self, mut predicate: F) -> IssueTable
    where
        F: FnMut(&Issue) -> bool,
    {
        IssueTable {
            rows: self.rows.iter().filter(|i| predicate(i)).cloned().collect(),
        }
    }

    pub fn explode_labels(&self) -> Vec<LabelRow<'_>> {
        let mut out = Vec::with_capacity(self.rows.len());
        for issue in &self.rows {
            if issue.labels.is_empty() {
                out.push(LabelRow { label: None, issue });
                continue;
            }
            out.extend(issue.labels.iter().map(|label| LabelRow {
                label: Some(label.as_str()),
                issue,
            }));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// SHA-256 of the serialized table; identical inputs give identical
    /// fingerprints.
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        Ok(content_hash(serde_json::to_vec(self)?.as_slice()))
    }
}

impl<'a> IntoIterator for &'a IssueTable {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
