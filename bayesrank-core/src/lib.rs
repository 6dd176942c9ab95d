//! bayesrank-core: Pure-computation ranking engine.
//!
//! (name, rating, review count) records → Bayesian-average composite scores →
//! store sorted descending in place → de-duplicated top-N view.
//! No IO, no filesystem. Bring your own loader.
//!
//! Three interchangeable sort variants share one contract (descending by
//! score, in place, permutation of the input): [`Algorithm::Exchange`],
//! [`Algorithm::Partition`] and [`Algorithm::HeapSelect`].
//!
//! # Quick start
//!
//! ```rust
//! use bayesrank_core::{Algorithm, EngineConfig, RankingEngine, Record, top_unique};
//!
//! let mut records = vec![
//!     Record::new("Blue Door Cafe", 5.0, 1000),
//!     Record::new("Corner Grill", 1.0, 1),
//!     Record::new("corner grill ", 3.0, 50),
//! ];
//!
//! let engine = RankingEngine::new(EngineConfig {
//!     algorithm: Algorithm::HeapSelect,
//!     smoothing: 100.0,
//! })?;
//! let summary = engine.rank(&mut records)?;
//! assert_eq!(summary.prior, 3.0);
//!
//! for (pos, r) in top_unique(&records, 10).enumerate() {
//!     println!("{}. {} {:.4}", pos + 1, r.name, r.score);
//! }
//! # Ok::<(), bayesrank_core::RankError>(())
//! ```

pub mod constants;
pub mod engine;
pub mod error;
pub mod exchange;
pub mod heap_select;
pub mod partition;
pub mod report;
pub mod scoring;
pub mod sorting;
pub mod types;

// Re-export primary public API at crate root.
pub use engine::{EngineConfig, RankingEngine, is_permutation_of};
pub use error::{RankError, Result};
pub use exchange::exchange_sort;
pub use heap_select::heap_select_sort;
pub use partition::{partition_sort, partition_sort_with_rng};
pub use report::{TopUnique, normalize_name, top_unique, top_unique_by};
pub use scoring::{ScoreCalculator, compute_scores};
pub use sorting::{Algorithm, assert_descending, is_descending};
pub use types::{BenchmarkReport, RankSummary, Record, SortStats, VariantRun};
