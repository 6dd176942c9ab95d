//! Top-N unique view over an already ranked store.
//!
//! Nothing here sorts. Whatever order the store is in is the order reported.
use std::collections::HashSet;
use std::iter::FusedIterator;
use std::slice;

use crate::types::Record;

/// Default de-duplication key: trimmed, lower-cased name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn normalized_key(record: &Record) -> String {
    normalize_name(&record.name)
}

/// Lazy iterator over at most `n` records whose keys have not been seen yet.
///
/// Single pass, not restartable. The first occurrence of a key wins, so over a
/// descending store that is the highest-ranked one.
pub struct TopUnique<'a, F> {
    records: slice::Iter<'a, Record>,
    remaining: usize,
    seen: HashSet<String>,
    key_fn: F,
}

impl<'a, F> Iterator for TopUnique<'a, F>
where
    F: FnMut(&Record) -> String,
{
    type Item = &'a Record;

    fn next(&mut self) -> Option<&'a Record> {
        if self.remaining == 0 {
            return None;
        }
        for record in self.records.by_ref() {
            if self.seen.insert((self.key_fn)(record)) {
                self.remaining -= 1;
                return Some(record);
            }
        }
        self.remaining = 0;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining.min(self.records.len())))
    }
}

impl<F> FusedIterator for TopUnique<'_, F> where F: FnMut(&Record) -> String {}

/// Up to `n` records with distinct normalized names, in store order.
pub fn top_unique(records: &[Record], n: usize) -> TopUnique<'_, fn(&Record) -> String> {
    top_unique_by(records, n, normalized_key as fn(&Record) -> String)
}

/// Like [`top_unique`] with a caller-supplied de-duplication key.
pub fn top_unique_by<F>(records: &[Record], n: usize, key_fn: F) -> TopUnique<'_, F>
where
    F: FnMut(&Record) -> String,
{
    TopUnique {
        records: records.iter(),
        remaining: n,
        seen: HashSet::with_capacity(n.min(records.len())),
        key_fn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(names: &[&str]) -> Vec<Record> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut r = Record::new(*name, 4.0, 10);
                r.score = 10.0 - i as f64;
                r
            })
            .collect()
    }

    fn names<'a>(iter: impl Iterator<Item = &'a Record>) -> Vec<&'a str> {
        iter.map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_case_differing_duplicates_collapse() {
        let records = ranked(&["X", "x", "Y"]);
        let out = names(top_unique(&records, 2));
        assert_eq!(out, vec!["X", "Y"]);
    }

    #[test]
    fn test_whitespace_is_ignored_for_dedup() {
        let records = ranked(&["  Joe's Diner", "joe's diner ", "Pho 99", "PHO 99", "Taqueria"]);
        let out = names(top_unique(&records, 10));
        assert_eq!(out, vec!["  Joe's Diner", "Pho 99", "Taqueria"]);
    }

    #[test]
    fn test_stops_at_n() {
        let records = ranked(&["a", "b", "c", "d"]);
        assert_eq!(names(top_unique(&records, 3)), vec!["a", "b", "c"]);
        assert_eq!(top_unique(&records, 0).count(), 0);
    }

    #[test]
    fn test_fewer_unique_than_n() {
        let records = ranked(&["a", "A", "a "]);
        let mut iter = top_unique(&records, 5);
        assert_eq!(iter.next().map(|r| r.name.as_str()), Some("a"));
        assert!(iter.next().is_none());
        // Fused: stays exhausted.
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_propagates_given_order() {
        // Not sorted: reporter must not reorder.
        let mut records = ranked(&["low", "high"]);
        records[0].score = 1.0;
        records[1].score = 9.0;
        assert_eq!(names(top_unique(&records, 2)), vec!["low", "high"]);
    }

    #[test]
    fn test_custom_key() {
        let records = ranked(&["Pizza Hut #12", "Pizza Hut #40", "Sushi Go"]);
        let chain = |r: &Record| r.name.split('#').next().unwrap_or("").trim().to_string();
        assert_eq!(names(top_unique_by(&records, 3, chain)), vec!["Pizza Hut #12", "Sushi Go"]);
    }

    #[test]
    fn test_size_hint_upper_bound() {
        let records = ranked(&["a", "b", "c"]);
        assert_eq!(top_unique(&records, 2).size_hint(), (0, Some(2)));
        assert_eq!(top_unique(&records, 10).size_hint().1, Some(3));
        assert_eq!(top_unique(&[], 4).size_hint(), (0, Some(0)));
    }
}
