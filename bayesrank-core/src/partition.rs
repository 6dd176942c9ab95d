//! Randomized-pivot partition sort (quicksort, Hoare two-pointer scheme).
//!
//! Recursion is replaced by an explicit stack of inclusive ranges. After each
//! partition the larger side is pushed first so the smaller one is processed
//! next, keeping the stack at O(log n) entries.
use rand::Rng;
use tracing::{debug, trace};

use crate::sorting::{exchange, ranks_above, ranks_below};
use crate::types::{Record, SortStats};

/// Sort descending using the thread-local RNG for pivot selection.
pub fn partition_sort(records: &mut [Record]) -> SortStats {
    partition_sort_with_rng(records, &mut rand::rng())
}

/// Sort descending, drawing pivots from `rng`.
pub fn partition_sort_with_rng<R: Rng>(records: &mut [Record], rng: &mut R) -> SortStats {
    let mut stats = SortStats::default();
    if records.len() < 2 {
        return stats;
    }

    let mut stack: Vec<(usize, usize)> = vec![(0, records.len() - 1)];
    let mut max_depth = 1;

    while let Some((lo, hi)) = stack.pop() {
        let (left, right) = hoare_partition(records, lo, hi, rng, &mut stats);
        stats.passes += 1;
        trace!(lo, hi, "partitioned range");

        match (left, right) {
            (Some(l), Some(r)) => {
                if span(l) > span(r) {
                    stack.push(l);
                    stack.push(r);
                } else {
                    stack.push(r);
                    stack.push(l);
                }
            }
            (Some(side), None) | (None, Some(side)) => stack.push(side),
            (None, None) => {}
        }
        max_depth = max_depth.max(stack.len());
    }

    debug!(partitions = stats.passes, swaps = stats.swaps, max_depth, "partition sort finished");
    stats
}

fn span((lo, hi): (usize, usize)) -> usize {
    hi - lo
}

/// Partition `records[lo..=hi]` around a uniformly random pivot score.
///
/// On return everything left of the right-hand range scores at least the
/// pivot and everything in it scores at most the pivot. Returns the two
/// sub-ranges that still need sorting (`None` when a side has fewer than two
/// elements). Both are strictly smaller than the input range.
fn hoare_partition<R: Rng>(
    records: &mut [Record],
    lo: usize,
    hi: usize,
    rng: &mut R,
    stats: &mut SortStats,
) -> (Option<(usize, usize)>, Option<(usize, usize)>) {
    let pivot = records[rng.random_range(lo..=hi)].score;

    // Signed cursors: `j` may step one below `lo` when lo == 0.
    let (lo_i, hi_i) = (lo as isize, hi as isize);
    let mut i = lo_i;
    let mut j = hi_i;

    while i <= j {
        while i <= hi_i && counted(stats, ranks_above(records[i as usize].score, pivot)) {
            i += 1;
        }
        while j >= lo_i && counted(stats, ranks_below(records[j as usize].score, pivot)) {
            j -= 1;
        }
        if i <= j {
            exchange(records, i as usize, j as usize);
            stats.swaps += 1;
            i += 1;
            j -= 1;
        }
    }

    let left = (lo_i < j).then_some((lo, j as usize));
    let right = (i < hi_i).then_some((i as usize, hi));
    (left, right)
}

/// Tally one score comparison and pass its outcome through.
#[inline]
fn counted(stats: &mut SortStats, outcome: bool) -> bool {
    stats.comparisons += 1;
    outcome
}
