//! Bayesian-average composite scores.
//!
//! score = w * rating + (1 - w) * C, with w = v / (v + m), where C is the mean
//! rating of the whole store and m the smoothing constant. Records with few
//! reviews are pulled towards C; heavily reviewed records keep their own rating.
use tracing::debug;

use crate::constants::DEFAULT_SMOOTHING;
use crate::error::{RankError, Result};
use crate::types::Record;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCalculator {
    smoothing: f64,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        ScoreCalculator { smoothing: DEFAULT_SMOOTHING }
    }
}

impl ScoreCalculator {
    /// `smoothing` is m, the virtual review count. Must be finite and > 0.
    pub fn new(smoothing: f64) -> Result<Self> {
        if !smoothing.is_finite() || smoothing <= 0.0 {
            return Err(RankError::InvalidSmoothing(smoothing));
        }
        Ok(ScoreCalculator { smoothing })
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Mean rating over the store (the global prior C).
    pub fn global_prior(records: &[Record]) -> Result<f64> {
        if records.is_empty() {
            return Err(RankError::EmptyDataset);
        }
        let total: f64 = records.iter().map(|r| r.rating).sum();
        Ok(total / records.len() as f64)
    }

    /// Weight given to a record's own rating: v / (v + m).
    pub fn weight(&self, review_count: u32) -> f64 {
        let v = f64::from(review_count);
        v / (v + self.smoothing)
    }

    /// Composite score for one record against `prior`.
    ///
    /// Evaluated as `C + w * (rating - C)`, which equals
    /// `w * rating + (1 - w) * C` but returns C exactly when w is 0 and the
    /// rating exactly when it already equals C.
    pub fn score(&self, rating: f64, review_count: u32, prior: f64) -> f64 {
        prior + self.weight(review_count) * (rating - prior)
    }

    /// Fill in `score` for every record. Returns the prior used.
    ///
    /// Leaves the order of the store untouched. On an empty store nothing is
    /// computed and `EmptyDataset` is returned.
    pub fn compute_scores(&self, records: &mut [Record]) -> Result<f64> {
        let prior = Self::global_prior(records)?;
        for record in records.iter_mut() {
            record.score = self.score(record.rating, record.review_count, prior);
        }
        debug!(records = records.len(), prior, smoothing = self.smoothing, "computed composite scores");
        Ok(prior)
    }
}

/// Convenience wrapper: validate `smoothing` and score the store in one call.
pub fn compute_scores(records: &mut [Record], smoothing: f64) -> Result<f64> {
    ScoreCalculator::new(smoothing)?.compute_scores(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Record> {
        vec![
            Record::new("A", 5.0, 1000),
            Record::new("B", 1.0, 1),
            Record::new("C", 3.0, 50),
        ]
    }

    fn round4(x: f64) -> f64 {
        (x * 10_000.0).round() / 10_000.0
    }

    #[test]
    fn test_scenario_scores_to_four_places() {
        let mut records = scenario();
        let prior = compute_scores(&mut records, 100.0).unwrap();

        assert_eq!(prior, 3.0);
        // A: 3 + (1000/1100) * 2
        assert_eq!(round4(records[0].score), 4.8182);
        // B: 3 - (1/101) * 2
        assert_eq!(round4(records[1].score), 2.9802);
        // C: rating equals the prior
        assert_eq!(round4(records[2].score), 3.0);
    }

    #[test]
    fn test_scoring_does_not_reorder() {
        let mut records = scenario();
        compute_scores(&mut records, 100.0).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_zero_reviews_scores_exactly_prior() {
        let mut records = vec![
            Record::new("none", 0.5, 0),
            Record::new("many", 4.7, 320),
            Record::new("few", 2.2, 3),
        ];
        let prior = compute_scores(&mut records, 100.0).unwrap();
        assert_eq!(records[0].score, prior);

        // Holds for any rating, including out-of-domain ones.
        let calc = ScoreCalculator::default();
        for rating in [-3.0, 0.0, 1.25, 5.0, 42.0] {
            assert_eq!(calc.score(rating, 0, prior), prior);
        }
    }

    #[test]
    fn test_single_record_scores_its_own_rating() {
        for (rating, reviews) in [(4.1, 7), (0.3, 0), (3.3333, 123_456)] {
            let mut records = vec![Record::new("solo", rating, reviews)];
            let prior = compute_scores(&mut records, 100.0).unwrap();
            assert_eq!(prior, rating);
            assert_eq!(records[0].score, rating);
        }
    }

    #[test]
    fn test_large_review_count_approaches_rating() {
        let calc = ScoreCalculator::default();
        let score = calc.score(4.9, u32::MAX, 2.0);
        assert!((score - 4.9).abs() < 1e-6, "score {score} should approach 4.9");
    }

    #[test]
    fn test_score_is_convex_combination() {
        let calc = ScoreCalculator::new(25.0).unwrap();
        for &(rating, reviews) in &[(1.0, 10), (4.5, 3), (2.0, 999), (5.0, 1)] {
            let score = calc.score(rating, reviews, 3.2);
            let (lo, hi) = if rating < 3.2 { (rating, 3.2) } else { (3.2, rating) };
            assert!(score > lo && score < hi, "{score} not strictly between {lo} and {hi}");
        }
    }

    #[test]
    fn test_compute_scores_is_idempotent() {
        let mut records = scenario();
        compute_scores(&mut records, 100.0).unwrap();
        let first: Vec<f64> = records.iter().map(|r| r.score).collect();
        compute_scores(&mut records, 100.0).unwrap();
        let second: Vec<f64> = records.iter().map(|r| r.score).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_smoothing_changes_scores() {
        let mut loose = scenario();
        let mut tight = scenario();
        compute_scores(&mut loose, 10.0).unwrap();
        compute_scores(&mut tight, 1000.0).unwrap();
        // Smaller m lets B's own (bad) rating dominate sooner.
        assert!(loose[1].score < tight[1].score);
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let mut records: Vec<Record> = Vec::new();
        assert_eq!(compute_scores(&mut records, 100.0), Err(RankError::EmptyDataset));
        assert_eq!(ScoreCalculator::global_prior(&[]), Err(RankError::EmptyDataset));
    }

    #[test]
    fn test_invalid_smoothing_is_rejected() {
        for m in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(ScoreCalculator::new(m), Err(RankError::InvalidSmoothing(_))));
        }
        assert_eq!(ScoreCalculator::new(0.5).unwrap().smoothing(), 0.5);
    }
}
