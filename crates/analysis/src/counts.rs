use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Count {
    pub key: String,
    pub count: usize,
}

/// Tallies keys and ranks them by count descending, then key ascending, so
/// ties always come out in the same order.
pub fn rank_counts<I, S>(keys: I) -> Vec<Count>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tally: BTreeMap<String, usize> = BTreeMap::new();
    for key in keys {
        *tally.entry(key.into()).or_insert(0) += 1;
    }
    let mut ranked: Vec<Count> = tally
        .into_iter()
        .map(|(key, count)| Count { key, count })
        .collect();
    // stable sort keeps the BTreeMap key order for equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

pub fn top_n<I, S>(keys: I, n: usize) -> Vec<Count>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut ranked = rank_counts(keys);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_count_then_key() {
        let ranked = rank_counts(["b", "a", "b", "c", "a", "d"]);
        let keys: Vec<_> = ranked.iter().map(|c| (c.key.as_str(), c.count)).collect();
        assert_eq!(keys, vec![("a", 2), ("b", 2), ("c", 1), ("d", 1)]);
    }

    #[test]
    fn top_n_truncates() {
        assert_eq!(top_n(["x", "y", "x"], 1), vec![Count { key: "x".into(), count: 2 }]);
        assert!(top_n(Vec::<String>::new(), 5).is_empty());
    }
}
