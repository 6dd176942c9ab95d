use std::time::Duration;

use crate::sorting::Algorithm;

/// A single ranked entity (one restaurant row).
///
/// `name` is carried for display and de-duplication only. It never takes part
/// in ordering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub name: String,
    /// Individual rating, observed domain 0.0 to 5.0 (not enforced).
    pub rating: f64,
    pub review_count: u32,
    /// Composite score. Stays `0.0` until `ScoreCalculator::compute_scores` runs.
    pub score: f64,
}

impl Record {
    pub fn new(name: impl Into<String>, rating: f64, review_count: u32) -> Self {
        Record {
            name: name.into(),
            rating,
            review_count,
            score: 0.0,
        }
    }
}

/// Work counters reported by every sort variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortStats {
    /// Score comparisons performed.
    pub comparisons: u64,
    /// Element exchanges performed.
    pub swaps: u64,
    /// Exchange: adjacent-pair passes. Partition: partition steps.
    /// Heap-select: root extractions.
    pub passes: u64,
}

/// Result of `RankingEngine::rank()`. The ranked records stay in the caller's store.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankSummary {
    /// Global prior C (mean rating over the whole store).
    pub prior: f64,
    pub algorithm: Algorithm,
    pub stats: SortStats,
    pub record_count: usize,
}

/// One variant's run inside a benchmark, over its own copy of the store.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantRun {
    pub algorithm: Algorithm,
    pub elapsed: Duration,
    pub stats: SortStats,
    /// The sorted copy this variant produced.
    pub records: Vec<Record>,
}

/// Result of `RankingEngine::benchmark()`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkReport {
    pub prior: f64,
    /// Time spent scoring, shared by every run.
    pub scoring_elapsed: Duration,
    pub runs: Vec<VariantRun>,
}

impl BenchmarkReport {
    /// True when every run holds the same multiset of records as the first.
    pub fn runs_agree(&self) -> bool {
        match self.runs.split_first() {
            Some((first, rest)) => rest
                .iter()
                .all(|run| crate::engine::is_permutation_of(&first.records, &run.records)),
            None => true,
        }
    }
}
