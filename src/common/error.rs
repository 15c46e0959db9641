/// The error type returned when a [`ResizePolicy`][resize-policy] would break
/// the invariants of the hash table.
///
/// [resize-policy]: ../policy/struct.ResizePolicy.html
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The minimum number of buckets was zero.
    #[error("min_buckets must be greater than zero")]
    ZeroMinBuckets,

    /// One of the load factors or resize factors was NaN or infinite.
    #[error("{name} must be a finite number, but was {value}")]
    NotFinite {
        /// The name of the offending knob.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The shrink load factor was not strictly between zero and the expand
    /// load factor.
    #[error(
        "shrink_load_factor ({shrink}) must be greater than zero and less than \
    expand_load_factor ({expand})"
    )]
    LoadFactorOrder {
        /// The rejected shrink load factor.
        shrink: f64,
        /// The expand load factor it was compared with.
        expand: f64,
    },

    /// The expand factor would not grow the table.
    #[error("expand_factor must be greater than 1.0, but was {0}")]
    ExpandFactorTooSmall(f64),

    /// The shrink factor would not shrink the table, or would shrink it to
    /// nothing.
    #[error("shrink_factor must be greater than 0.0 and less than 1.0, but was {0}")]
    ShrinkFactorOutOfRange(f64),

    /// At the minimum bucket count the thresholds would be unusable: the
    /// table would expand on its first insertion, or the shrink threshold
    /// would not be below the expand threshold.
    #[error(
        "thresholds at {min_buckets} buckets are degenerate (shrink {shrink}, \
    expand {expand}); raise min_buckets or widen the load factors"
    )]
    DegenerateThresholds {
        /// The configured minimum number of buckets.
        min_buckets: usize,
        /// The computed shrink threshold.
        shrink: usize,
        /// The computed expand threshold.
        expand: usize,
    },
}
