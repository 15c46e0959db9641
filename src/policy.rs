//! The resize policy: when a table expands or shrinks, and by how much.

use crate::common::{
    concurrent::constants::{
        DEFAULT_EXPAND_FACTOR, DEFAULT_EXPAND_LOAD_FACTOR, DEFAULT_MIN_BUCKETS,
        DEFAULT_SHRINK_FACTOR, DEFAULT_SHRINK_LOAD_FACTOR,
    },
    error::ConfigError,
};

/// The resize policy of a hash table.
///
/// A policy is fixed when the table is built. It decides two things:
///
/// - **When** to resize. After an insertion, the table expands if its live node
///   count exceeds `bucket_count * expand_load_factor`. After an erasure, it
///   shrinks if the count falls below `bucket_count * shrink_load_factor`. Both
///   products are truncated to integers, and both thresholds are recomputed
///   every time the bucket count changes.
/// - **How far** to resize. An expansion multiplies the bucket count by
///   `expand_factor`; a shrink multiplies it by `shrink_factor` but never goes
///   below `min_buckets`.
///
/// The default policy starts at 16 buckets, doubles at 50% load and halves at
/// 10% load. Because the expand and shrink points are far apart, a table under
/// steady insert/erase churn around one size does not resize back and forth.
///
/// # Examples
///
/// ```rust
/// use strset::ResizePolicy;
///
/// let policy = ResizePolicy::default();
/// let thresholds = policy.thresholds(16);
/// assert_eq!(thresholds.expand(), 8);
/// assert_eq!(thresholds.shrink(), 1);
///
/// assert_eq!(policy.expanded(16), 32);
/// assert_eq!(policy.shrunk(16), 16);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ResizePolicy {
    min_buckets: usize,
    expand_load_factor: f64,
    expand_factor: f64,
    shrink_load_factor: f64,
    shrink_factor: f64,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            min_buckets: DEFAULT_MIN_BUCKETS,
            expand_load_factor: DEFAULT_EXPAND_LOAD_FACTOR,
            expand_factor: DEFAULT_EXPAND_FACTOR,
            shrink_load_factor: DEFAULT_SHRINK_LOAD_FACTOR,
            shrink_factor: DEFAULT_SHRINK_FACTOR,
        }
    }
}

impl ResizePolicy {
    /// Creates a policy, checking that a table built with it keeps a positive
    /// expand threshold above its shrink threshold, and that resizes move the
    /// bucket count in the intended direction.
    pub fn new(
        min_buckets: usize,
        expand_load_factor: f64,
        expand_factor: f64,
        shrink_load_factor: f64,
        shrink_factor: f64,
    ) -> Result<Self, ConfigError> {
        let policy = Self {
            min_buckets,
            expand_load_factor,
            expand_factor,
            shrink_load_factor,
            shrink_factor,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.min_buckets == 0 {
            return Err(ConfigError::ZeroMinBuckets);
        }

        for (name, value) in [
            ("expand_load_factor", self.expand_load_factor),
            ("expand_factor", self.expand_factor),
            ("shrink_load_factor", self.shrink_load_factor),
            ("shrink_factor", self.shrink_factor),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }

        if self.shrink_load_factor <= 0.0 || self.shrink_load_factor >= self.expand_load_factor {
            return Err(ConfigError::LoadFactorOrder {
                shrink: self.shrink_load_factor,
                expand: self.expand_load_factor,
            });
        }
        if self.expand_factor <= 1.0 {
            return Err(ConfigError::ExpandFactorTooSmall(self.expand_factor));
        }
        if self.shrink_factor <= 0.0 || self.shrink_factor >= 1.0 {
            return Err(ConfigError::ShrinkFactorOutOfRange(self.shrink_factor));
        }

        let floor = self.thresholds(self.min_buckets);
        if floor.expand == 0 || floor.shrink >= floor.expand {
            return Err(ConfigError::DegenerateThresholds {
                min_buckets: self.min_buckets,
                shrink: floor.shrink,
                expand: floor.expand,
            });
        }

        Ok(())
    }

    /// Returns the number of buckets a table starts with and never goes below.
    pub fn min_buckets(&self) -> usize {
        self.min_buckets
    }

    /// Returns the load factor above which a table expands.
    pub fn expand_load_factor(&self) -> f64 {
        self.expand_load_factor
    }

    /// Returns the factor an expansion multiplies the bucket count by.
    pub fn expand_factor(&self) -> f64 {
        self.expand_factor
    }

    /// Returns the load factor below which a table shrinks.
    pub fn shrink_load_factor(&self) -> f64 {
        self.shrink_load_factor
    }

    /// Returns the factor a shrink multiplies the bucket count by.
    pub fn shrink_factor(&self) -> f64 {
        self.shrink_factor
    }

    /// Returns the expand and shrink thresholds of a table with
    /// `bucket_count` buckets.
    pub fn thresholds(&self, bucket_count: usize) -> Thresholds {
        Thresholds {
            expand: scale(bucket_count, self.expand_load_factor),
            shrink: scale(bucket_count, self.shrink_load_factor),
        }
    }

    /// Returns the bucket count an expansion from `bucket_count` targets.
    pub fn expanded(&self, bucket_count: usize) -> usize {
        scale(bucket_count, self.expand_factor).max(bucket_count.saturating_add(1))
    }

    /// Returns the bucket count a shrink from `bucket_count` targets. Never
    /// less than [`min_buckets`](#method.min_buckets).
    pub fn shrunk(&self, bucket_count: usize) -> usize {
        scale(bucket_count, self.shrink_factor).max(self.min_buckets)
    }
}

// Float to integer `as` casts truncate toward zero and saturate at the bounds
// of `usize`.
fn scale(n: usize, factor: f64) -> usize {
    (n as f64 * factor) as usize
}

/// The node counts at which a table of a given size resizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    expand: usize,
    shrink: usize,
}

impl Thresholds {
    /// The table expands once its live node count is greater than this.
    pub fn expand(&self) -> usize {
        self.expand
    }

    /// The table shrinks once its live node count is less than this.
    pub fn shrink(&self) -> usize {
        self.shrink
    }

    pub(crate) fn should_expand(&self, len: usize) -> bool {
        len > self.expand
    }

    pub(crate) fn should_shrink(&self, len: usize) -> bool {
        len < self.shrink
    }
}
