/// The smallest number of buckets a table will ever have.
pub(crate) const DEFAULT_MIN_BUCKETS: usize = 16;

/// Expand once the live node count exceeds half the bucket count.
pub(crate) const DEFAULT_EXPAND_LOAD_FACTOR: f64 = 0.5;
pub(crate) const DEFAULT_EXPAND_FACTOR: f64 = 2.0;

/// Shrink once the live node count falls below a tenth of the bucket count.
pub(crate) const DEFAULT_SHRINK_LOAD_FACTOR: f64 = 0.1;
pub(crate) const DEFAULT_SHRINK_FACTOR: f64 = 0.5;

// Most chains hold zero or one node at a load factor of 0.5. Two inline slots
// keep the common case free of a separate heap allocation.
pub(crate) const BUCKET_INLINE_NODES: usize = 2;
