use super::ConcurrentSet;
use crate::{
    cht::{DefaultHashBuilder, HashTable},
    common::{builder_utils, error::ConfigError},
    policy::ResizePolicy,
};

use std::{hash::BuildHasher, marker::PhantomData};

/// Builds a [`HashTable`][table-struct] or a [`ConcurrentSet`][set-struct]
/// with a name and a custom resize policy.
///
/// The knobs only exist at build time; a built table never changes its
/// policy. Every knob starts at the default of [`ResizePolicy`].
///
/// [table-struct]: ../struct.HashTable.html
/// [set-struct]: ./struct.ConcurrentSet.html
///
/// # Examples
///
/// ```rust
/// use strset::sync::ConcurrentSet;
///
/// let set = ConcurrentSet::builder()
///     .name("sessions")
///     // Start with 64 buckets and never go below that.
///     .min_buckets(64)
///     // Grow fourfold once the table is three quarters full.
///     .expand_load_factor(0.75)
///     .expand_factor(4.0)
///     .build();
///
/// assert!(!set.add("alice"));
/// assert_eq!(set.table().bucket_count(), 64);
/// ```
///
/// Invalid combinations are reported by `try_build`:
///
/// ```rust
/// use strset::{sync::ConcurrentSet, ConfigError};
///
/// let result = ConcurrentSet::builder()
///     .shrink_load_factor(0.6)
///     .try_build();
///
/// assert!(matches!(result, Err(ConfigError::LoadFactorOrder { .. })));
/// ```
#[must_use]
pub struct Builder<C> {
    name: Option<String>,
    min_buckets: usize,
    expand_load_factor: f64,
    expand_factor: f64,
    shrink_load_factor: f64,
    shrink_factor: f64,
    product_type: PhantomData<C>,
}

impl<C> Default for Builder<C> {
    fn default() -> Self {
        let policy = ResizePolicy::default();
        Self {
            name: None,
            min_buckets: policy.min_buckets(),
            expand_load_factor: policy.expand_load_factor(),
            expand_factor: policy.expand_factor(),
            shrink_load_factor: policy.shrink_load_factor(),
            shrink_factor: policy.shrink_factor(),
            product_type: PhantomData,
        }
    }
}

impl Builder<HashTable<DefaultHashBuilder>> {
    /// Builds a `HashTable`.
    ///
    /// # Panics
    ///
    /// Panics if the configured knobs do not form a valid [`ResizePolicy`].
    /// Use `try_build` to get the error instead.
    pub fn build(self) -> HashTable<DefaultHashBuilder> {
        self.build_with_hasher(DefaultHashBuilder::default())
    }

    /// Builds a `HashTable`, or returns why the knobs are invalid.
    pub fn try_build(self) -> Result<HashTable<DefaultHashBuilder>, ConfigError> {
        self.try_build_with_hasher(DefaultHashBuilder::default())
    }

    /// Builds a `HashTable<S>` that hashes values with `hasher`.
    ///
    /// # Panics
    ///
    /// Panics if the configured knobs do not form a valid [`ResizePolicy`].
    pub fn build_with_hasher<S>(self, hasher: S) -> HashTable<S>
    where
        S: BuildHasher,
    {
        let policy = builder_utils::ensure_policy_or_panic(self.policy());
        HashTable::with_everything(self.name, policy, hasher)
    }

    /// Builds a `HashTable<S>` that hashes values with `hasher`, or returns
    /// why the knobs are invalid.
    pub fn try_build_with_hasher<S>(self, hasher: S) -> Result<HashTable<S>, ConfigError>
    where
        S: BuildHasher,
    {
        let policy = self.policy()?;
        Ok(HashTable::with_everything(self.name, policy, hasher))
    }
}

impl Builder<ConcurrentSet<DefaultHashBuilder>> {
    /// Builds a `ConcurrentSet`.
    ///
    /// # Panics
    ///
    /// Panics if the configured knobs do not form a valid [`ResizePolicy`].
    /// Use `try_build` to get the error instead.
    pub fn build(self) -> ConcurrentSet<DefaultHashBuilder> {
        self.build_with_hasher(DefaultHashBuilder::default())
    }

    /// Builds a `ConcurrentSet`, or returns why the knobs are invalid.
    pub fn try_build(self) -> Result<ConcurrentSet<DefaultHashBuilder>, ConfigError> {
        self.try_build_with_hasher(DefaultHashBuilder::default())
    }

    /// Builds a `ConcurrentSet<S>` that hashes values with `hasher`.
    ///
    /// # Panics
    ///
    /// Panics if the configured knobs do not form a valid [`ResizePolicy`].
    pub fn build_with_hasher<S>(self, hasher: S) -> ConcurrentSet<S>
    where
        S: BuildHasher,
    {
        let policy = builder_utils::ensure_policy_or_panic(self.policy());
        ConcurrentSet::from(HashTable::with_everything(self.name, policy, hasher))
    }

    /// Builds a `ConcurrentSet<S>` that hashes values with `hasher`, or
    /// returns why the knobs are invalid.
    pub fn try_build_with_hasher<S>(self, hasher: S) -> Result<ConcurrentSet<S>, ConfigError>
    where
        S: BuildHasher,
    {
        let policy = self.policy()?;
        Ok(ConcurrentSet::from(HashTable::with_everything(
            self.name, policy, hasher,
        )))
    }
}

impl<C> Builder<C> {
    /// Sets the name of the table. The name prefixes the log messages of the
    /// table when the `logging` feature is enabled.
    pub fn name(self, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..self
        }
    }

    /// Sets the number of buckets the table starts with and never shrinks
    /// below.
    pub fn min_buckets(self, min_buckets: usize) -> Self {
        Self {
            min_buckets,
            ..self
        }
    }

    /// Sets the load factor above which the table expands.
    pub fn expand_load_factor(self, load_factor: f64) -> Self {
        Self {
            expand_load_factor: load_factor,
            ..self
        }
    }

    /// Sets the factor an expansion multiplies the bucket count by.
    pub fn expand_factor(self, factor: f64) -> Self {
        Self {
            expand_factor: factor,
            ..self
        }
    }

    /// Sets the load factor below which the table shrinks.
    pub fn shrink_load_factor(self, load_factor: f64) -> Self {
        Self {
            shrink_load_factor: load_factor,
            ..self
        }
    }

    /// Sets the factor a shrink multiplies the bucket count by.
    pub fn shrink_factor(self, factor: f64) -> Self {
        Self {
            shrink_factor: factor,
            ..self
        }
    }

    /// Replaces every resize knob with the values of `policy`.
    pub fn resize_policy(self, policy: ResizePolicy) -> Self {
        Self {
            min_buckets: policy.min_buckets(),
            expand_load_factor: policy.expand_load_factor(),
            expand_factor: policy.expand_factor(),
            shrink_load_factor: policy.shrink_load_factor(),
            shrink_factor: policy.shrink_factor(),
            ..self
        }
    }

    fn policy(&self) -> Result<ResizePolicy, ConfigError> {
        ResizePolicy::new(
            self.min_buckets,
            self.expand_load_factor,
            self.expand_factor,
            self.shrink_load_factor,
            self.shrink_factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{sync::ConcurrentSet, ConfigError, HashTable, ResizePolicy};

    #[test]
    fn build_table() {
        let table = HashTable::builder().build();
        assert_eq!(table.policy(), &ResizePolicy::default());
        assert_eq!(table.bucket_count(), 16);
        assert_eq!(table.name(), None);

        let table = HashTable::builder()
            .name("tbl")
            .min_buckets(32)
            .expand_load_factor(0.75)
            .expand_factor(3.0)
            .shrink_load_factor(0.2)
            .shrink_factor(0.25)
            .build();
        let policy = table.policy();
        assert_eq!(table.name(), Some("tbl"));
        assert_eq!(table.bucket_count(), 32);
        assert_eq!(policy.min_buckets(), 32);
        assert_eq!(policy.expand_load_factor(), 0.75);
        assert_eq!(policy.expand_factor(), 3.0);
        assert_eq!(policy.shrink_load_factor(), 0.2);
        assert_eq!(policy.shrink_factor(), 0.25);
        assert_eq!(table.thresholds().expand(), 24);
        assert_eq!(table.thresholds().shrink(), 6);
    }

    #[test]
    fn build_set() {
        let set = ConcurrentSet::builder().name("set").min_buckets(128).build();
        assert_eq!(set.table().name(), Some("set"));
        assert_eq!(set.table().bucket_count(), 128);
    }

    #[test]
    fn try_build_reports_errors() {
        assert_eq!(
            HashTable::builder().min_buckets(0).try_build().unwrap_err(),
            ConfigError::ZeroMinBuckets
        );
        assert_eq!(
            ConcurrentSet::builder()
                .expand_factor(0.5)
                .try_build()
                .unwrap_err(),
            ConfigError::ExpandFactorTooSmall(0.5)
        );
        assert!(HashTable::builder()
            .try_build_with_hasher(ahash::RandomState::new())
            .is_ok());
    }

    #[test]
    #[should_panic(expected = "invalid resize policy: shrink_factor must be greater than 0.0")]
    fn build_panics_on_invalid_policy() {
        let _ = HashTable::builder().shrink_factor(2.0).build();
    }
}
