//! Heap-select sort over a min-heap keyed on score.
//!
//! The root always holds the smallest remaining score. Each extraction swaps
//! it into the last unsorted slot, so minima fill the array from the back and
//! the finished array reads descending from the front. No reversal pass.
use tracing::debug;

use crate::sorting::{exchange, ranks_below};
use crate::types::{Record, SortStats};

pub fn heap_select_sort(records: &mut [Record]) -> SortStats {
    let n = records.len();
    let mut stats = SortStats::default();
    if n < 2 {
        return stats;
    }

    // Heapify bottom-up from the last internal node.
    for root in (0..n / 2).rev() {
        sift_down(records, root, n, &mut stats);
    }

    for end in (1..n).rev() {
        exchange(records, 0, end);
        stats.swaps += 1;
        stats.passes += 1;
        sift_down(records, 0, end, &mut stats);
    }

    debug!(extractions = stats.passes, swaps = stats.swaps, "heap-select sort finished");
    stats
}

/// Restore the min-heap property for the subtree at `root` within `records[..len]`.
fn sift_down(records: &mut [Record], mut root: usize, len: usize, stats: &mut SortStats) {
    loop {
        let left = 2 * root + 1;
        if left >= len {
            return;
        }
        let right = left + 1;

        let mut smallest = root;
        stats.comparisons += 1;
        if ranks_below(records[left].score, records[smallest].score) {
            smallest = left;
        }
        if right < len {
            stats.comparisons += 1;
            if ranks_below(records[right].score, records[smallest].score) {
                smallest = right;
            }
        }

        if smallest == root {
            return;
        }
        exchange(records, root, smallest);
        stats.swaps += 1;
        root = smallest;
    }
}
