//! Ranking pipeline orchestrator.
//!
//! Pure computation: the caller loads records, hands over the store, and gets
//! it back scored and reordered in place. No IO.
use std::time::Instant;

use tracing::{debug, info};

use crate::constants::{DEFAULT_ALGORITHM, DEFAULT_SMOOTHING};
use crate::error::Result;
use crate::scoring::ScoreCalculator;
use crate::sorting::{Algorithm, assert_descending};
use crate::types::{BenchmarkReport, RankSummary, Record, VariantRun};

/// Configuration for the ranking engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub algorithm: Algorithm,
    /// Smoothing constant m for the composite score.
    pub smoothing: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            algorithm: DEFAULT_ALGORITHM,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankingEngine {
    calculator: ScoreCalculator,
    config: EngineConfig,
}

impl RankingEngine {
    /// Validates the smoothing constant up front so a bad value never reaches a run.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let calculator = ScoreCalculator::new(config.smoothing)?;
        Ok(RankingEngine { calculator, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    /// Score every record, then sort the store descending with the configured variant.
    ///
    /// Fails with `EmptyDataset` before touching anything if the store is
    /// empty. Panics if the sort leaves the store out of order.
    pub fn rank(&self, records: &mut [Record]) -> Result<RankSummary> {
        let prior = self.calculator.compute_scores(records)?;

        let algorithm = self.config.algorithm;
        let stats = algorithm.sort(records);
        assert_descending(records);

        info!(
            records = records.len(),
            prior,
            algorithm = algorithm.name(),
            comparisons = stats.comparisons,
            swaps = stats.swaps,
            "ranked dataset"
        );

        Ok(RankSummary {
            prior,
            algorithm,
            stats,
            record_count: records.len(),
        })
    }

    /// Score once, then run each algorithm on its own copy of the scored store.
    ///
    /// `records` is never mutated, and no variant can see another's
    /// permutation. Each copy is checked for descending order.
    pub fn benchmark(&self, records: &[Record], algorithms: &[Algorithm]) -> Result<BenchmarkReport> {
        let mut scored = records.to_vec();
        let start = Instant::now();
        let prior = self.calculator.compute_scores(&mut scored)?;
        let scoring_elapsed = start.elapsed();

        let mut runs = Vec::with_capacity(algorithms.len());
        for &algorithm in algorithms {
            let mut copy = scored.clone();
            let start = Instant::now();
            let stats = algorithm.sort(&mut copy);
            let elapsed = start.elapsed();
            assert_descending(&copy);

            debug!(algorithm = algorithm.name(), ?elapsed, swaps = stats.swaps, "benchmark run done");
            runs.push(VariantRun {
                algorithm,
                elapsed,
                stats,
                records: copy,
            });
        }

        Ok(BenchmarkReport {
            prior,
            scoring_elapsed,
            runs,
        })
    }
}

/// True when `a` and `b` hold the same multiset of records (all four fields).
pub fn is_permutation_of(a: &[Record], b: &[Record]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let key = |r: &Record| (r.name.clone(), r.rating.to_bits(), r.review_count, r.score.to_bits());
    let mut left: Vec<_> = a.iter().map(key).collect();
    let mut right: Vec<_> = b.iter().map(key).collect();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RankError;
    use crate::sorting::is_descending;

    fn scenario() -> Vec<Record> {
        vec![
            Record::new("A", 5.0, 1000),
            Record::new("B", 1.0, 1),
            Record::new("C", 3.0, 50),
        ]
    }

    fn engine(algorithm: Algorithm) -> RankingEngine {
        RankingEngine::new(EngineConfig { algorithm, smoothing: 100.0 }).unwrap()
    }

    #[test]
    fn test_rank_scores_and_orders_in_place() {
        for algorithm in Algorithm::ALL {
            let mut records = scenario();
            let summary = engine(algorithm).rank(&mut records).unwrap();

            assert_eq!(summary.prior, 3.0);
            assert_eq!(summary.algorithm, algorithm);
            assert_eq!(summary.record_count, 3);
            let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["A", "C", "B"]);
        }
    }

    #[test]
    fn test_rank_empty_store_fails() {
        let mut records: Vec<Record> = Vec::new();
        let err = engine(Algorithm::Partition).rank(&mut records).unwrap_err();
        assert_eq!(err, RankError::EmptyDataset);
    }

    #[test]
    fn test_engine_rejects_bad_smoothing() {
        let err = RankingEngine::new(EngineConfig {
            algorithm: Algorithm::Exchange,
            smoothing: -5.0,
        })
        .unwrap_err();
        assert_eq!(err, RankError::InvalidSmoothing(-5.0));
    }

    #[test]
    fn test_default_config() {
        let engine = RankingEngine::new(EngineConfig::default()).unwrap();
        assert_eq!(engine.config().algorithm, Algorithm::Partition);
        assert_eq!(engine.calculator().smoothing(), 100.0);
    }

    #[test]
    fn test_benchmark_runs_on_independent_copies() {
        let records: Vec<Record> = (0..200)
            .map(|i| Record::new(format!("place {i}"), ((i * 7) % 11) as f64 / 2.0, (i * 13) % 97))
            .collect();
        let before = records.clone();

        let report = engine(Algorithm::Exchange)
            .benchmark(&records, &Algorithm::ALL)
            .unwrap();

        // Input untouched: still unscored and in original order.
        assert_eq!(records, before);
        assert_eq!(report.runs.len(), 3);
        for run in &report.runs {
            assert!(is_descending(&run.records), "{} left its copy unsorted", run.algorithm);
            assert_eq!(run.records.len(), 200);
        }
        assert!(report.runs_agree());
    }

    #[test]
    fn test_benchmark_empty_store_fails() {
        let err = engine(Algorithm::HeapSelect).benchmark(&[], &Algorithm::ALL).unwrap_err();
        assert_eq!(err, RankError::EmptyDataset);
    }

    #[test]
    fn test_is_permutation_of() {
        let a = scenario();
        let mut b = scenario();
        b.reverse();
        assert!(is_permutation_of(&a, &b));

        b[0].review_count += 1;
        assert!(!is_permutation_of(&a, &b));
        assert!(!is_permutation_of(&a, &a[..2]));

        // Duplicates count: {A, A, B} is not {A, B, B}.
        let x = vec![a[0].clone(), a[0].clone(), a[1].clone()];
        let y = vec![a[0].clone(), a[1].clone(), a[1].clone()];
        assert!(!is_permutation_of(&x, &y));
    }
}
