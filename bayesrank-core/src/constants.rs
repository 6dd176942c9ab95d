use crate::sorting::Algorithm;

/// Default smoothing constant m.
///
/// Acts as a virtual review count: a record needs roughly this many reviews
/// before its own rating outweighs the global prior. 100 balances small local
/// spots against heavily reviewed chains on the Yelp-style datasets this was
/// tuned on.
pub const DEFAULT_SMOOTHING: f64 = 100.0;

/// Number of unique names shown in the top-N report.
pub const DEFAULT_TOP_N: usize = 20;

/// Sort variant used when the caller does not pick one.
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::Partition;
