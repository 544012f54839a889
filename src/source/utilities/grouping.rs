//! First-seen grouping helpers shared by the aggregator and analytics.
//!
//! Groups keep the order in which their key first appeared, and items keep
//! their input order inside a group, so the same input always yields the
//! same grouping.

use std::hash::Hash;

use indexmap::IndexMap;

/// Group `items` by `group_key`, skipping items whose key is `None`.
pub fn group_first_seen<'a, T, K, F>(items: &'a [T], mut group_key: F) -> IndexMap<K, Vec<&'a T>>
where
    K: Hash + Eq,
    F: FnMut(&'a T) -> Option<K>,
{
    let mut groups: IndexMap<K, Vec<&'a T>> = IndexMap::new();
    for item in items {
        if let Some(key) = group_key(item) {
            groups.entry(key).or_default().push(item);
        }
    }
    groups
}

/// Count occurrences of each value, in first-seen order.
pub fn count_first_seen<K, I>(values: I) -> IndexMap<K, usize>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// The `n` most frequent entries; equal counts keep first-seen order.
pub fn most_common<K: Clone>(counts: &IndexMap<K, usize>, n: usize) -> Vec<(K, usize)> {
    let mut ranked: Vec<(K, usize)> = counts
        .iter()
        .map(|(key, count)| (key.clone(), *count))
        .collect();
    // Stable sort keeps insertion order among ties.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_first_seen_keeps_key_and_item_order() {
        let items = vec!["b/1", "a/2", "b/3", "c/4", "a/5"];
        let groups = group_first_seen(&items, |item| item.split('/').next().map(str::to_string));
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(groups["b"], vec![&"b/1", &"b/3"]);
        assert_eq!(groups["a"], vec![&"a/2", &"a/5"]);
    }

    #[test]
    fn group_first_seen_skips_unkeyed_items() {
        let items = vec!["", "x", ""];
        let groups = group_first_seen(&items, |item| {
            (!item.is_empty()).then(|| item.to_string())
        });
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["x"].len(), 1);
    }

    #[test]
    fn most_common_breaks_ties_by_first_seen() {
        let counts = count_first_seen(["scent", "bottle", "scent", "price", "bottle", "smell"]);
        let top = most_common(&counts, 3);
        assert_eq!(top, vec![("scent", 2), ("bottle", 2), ("price", 1)]);
    }

    #[test]
    fn most_common_handles_short_inputs() {
        let counts = count_first_seen(Vec::<String>::new());
        assert!(most_common(&counts, 5).is_empty());
    }
}
