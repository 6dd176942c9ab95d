//! Exchange (bubble) sort, the reference variant.
use tracing::{debug, trace};

use crate::sorting::{exchange, ranks_below};
use crate::types::{Record, SortStats};

/// Sort descending by repeated adjacent-pair passes.
///
/// Stops after the first pass that performs no swap, so an input that is
/// already descending costs exactly one pass. Only strictly out-of-order
/// neighbours are swapped, which keeps the sort stable.
pub fn exchange_sort(records: &mut [Record]) -> SortStats {
    let n = records.len();
    let mut stats = SortStats::default();
    if n < 2 {
        return stats;
    }

    for pass in 0..n - 1 {
        stats.passes += 1;
        let mut swapped = false;

        // The last `pass` slots already hold the smallest scores.
        for j in 0..n - pass - 1 {
            stats.comparisons += 1;
            if ranks_below(records[j].score, records[j + 1].score) {
                exchange(records, j, j + 1);
                stats.swaps += 1;
                swapped = true;
            }
        }

        trace!(pass = pass + 1, of = n - 1, "exchange pass done");
        if !swapped {
            break;
        }
    }

    debug!(passes = stats.passes, swaps = stats.swaps, "exchange sort finished");
    stats
}
