//! Sort engine: interchangeable in-place strategies sharing one contract.
//!
//! Every variant turns a scored store into a permutation of itself in
//! descending `score` order. `score` is the only key; the other fields ride
//! along untouched.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::RankError;
use crate::exchange::exchange_sort;
use crate::heap_select::heap_select_sort;
use crate::partition::partition_sort;
use crate::types::{Record, SortStats};

/// Sort variant selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    /// Bubble sort with early exit. Stable, O(n^2): reference baseline only.
    Exchange,
    /// Randomized-pivot Hoare quicksort on an explicit work stack.
    Partition,
    /// Min-heap root extraction, leaving the array descending from the front.
    HeapSelect,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Exchange, Algorithm::Partition, Algorithm::HeapSelect];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Exchange => "exchange",
            Algorithm::Partition => "partition",
            Algorithm::HeapSelect => "heap-select",
        }
    }

    /// Whether equal-score records keep their relative order.
    pub fn is_stable(&self) -> bool {
        matches!(self, Algorithm::Exchange)
    }

    /// Sort `records` in place, highest score first.
    pub fn sort(&self, records: &mut [Record]) -> SortStats {
        match self {
            Algorithm::Exchange => exchange_sort(records),
            Algorithm::Partition => partition_sort(records),
            Algorithm::HeapSelect => heap_select_sort(records),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exchange" | "bubble" | "bubblesort" => Ok(Algorithm::Exchange),
            "partition" | "quick" | "quicksort" => Ok(Algorithm::Partition),
            "heap-select" | "heap" | "heapsort" => Ok(Algorithm::HeapSelect),
            _ => Err(RankError::InvalidAlgorithmSelection(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared primitives
// ---------------------------------------------------------------------------

/// Swap two records by index.
#[inline]
pub fn exchange(records: &mut [Record], i: usize, j: usize) {
    records.swap(i, j);
}

/// Order two scores. Incomparable values (NaN) compare equal.
#[inline]
pub fn compare_scores(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// `a` belongs strictly before `b` in descending order.
#[inline]
pub fn ranks_above(a: f64, b: f64) -> bool {
    compare_scores(a, b) == Ordering::Greater
}

/// `a` belongs strictly after `b` in descending order.
#[inline]
pub fn ranks_below(a: f64, b: f64) -> bool {
    compare_scores(a, b) == Ordering::Less
}

/// True when scores are non-increasing end to end.
pub fn is_descending(records: &[Record]) -> bool {
    records.windows(2).all(|w| !ranks_below(w[0].score, w[1].score))
}

/// Panics if scores are not non-increasing. A failure here is a sort bug,
/// never a data problem.
pub fn assert_descending(records: &[Record]) {
    if let Some(pos) = records.windows(2).position(|w| ranks_below(w[0].score, w[1].score)) {
        panic!(
            "Sort invariant violated: score {} at position {} is below score {} at position {}",
            records[pos].score,
            pos,
            records[pos + 1].score,
            pos + 1,
        );
    }
}
