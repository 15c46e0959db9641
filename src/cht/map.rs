//! A resizable hash table of byte strings with one lock per bucket.

pub(crate) mod bucket;

use self::bucket::BucketArray;
use crate::{
    common::fault,
    policy::{ResizePolicy, Thresholds},
    sync::Builder,
};

use std::{
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hasher},
    sync::atomic::{AtomicIsize, Ordering},
};

use crossbeam_utils::CachePadded;
use parking_lot::{RwLock, RwLockReadGuard};

/// Default hasher for `HashTable`.
pub type DefaultHashBuilder = RandomState;

/// A thread-safe, resizable hash set of byte strings.
///
/// `HashTable` is the storage engine behind [`ConcurrentSet`][set-struct]. It
/// can be shared between threads with an `Arc` (or borrowed by scoped
/// threads); every operation takes `&self`.
///
/// # Locking
///
/// The table holds an array of buckets. Each bucket has its own mutex, and
/// the array as a whole sits behind a readers-writer lock, the _resize lock_.
///
/// - `insert`, `erase` and `contains` hold the resize lock in shared mode for
///   their whole duration, and the lock of the one bucket they touch while
///   they scan or change it. Operations on different buckets run in parallel;
///   operations on the same bucket are serialized by its mutex.
/// - A resize holds the resize lock in exclusive mode, so it waits for every
///   in-flight operation to finish and blocks new ones until it is done.
///
/// # Resizing
///
/// The number of live values is kept in an atomic counter, updated after the
/// bucket lock has been released. When an insertion pushes it above the
/// expand threshold, or an erasure pulls it below the shrink threshold, that
/// operation resizes the table before returning (see [`ResizePolicy`]).
///
/// The resize lock has no atomic upgrade. The resizing thread releases its
/// shared hold and then waits for the exclusive one. If another thread
/// resized the table in that window, the resize is dropped. Two threads may
/// therefore both decide to resize, but only the first one to get the
/// exclusive hold does so.
///
/// The counter is read without any lock, so its value is only a heuristic
/// under concurrent updates. For a moment it may even lag behind the buckets,
/// e.g. when an erase of a value is counted before the insertion that created
/// it. It is exact whenever the table is quiescent.
///
/// # Hashing
///
/// Values are hashed with the table's `BuildHasher`, by default the one used
/// by `std::collections::HashMap`. The hash is computed once per operation and
/// cached in the stored node, so resizes never hash again.
///
/// # Examples
///
/// ```rust
/// use strset::HashTable;
///
/// use std::sync::Arc;
/// use std::thread;
///
/// let table = Arc::new(HashTable::new());
///
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let table = Arc::clone(&table);
///         thread::spawn(move || {
///             for i in 0..1000 {
///                 table.insert(format!("{t}-{i}"));
///             }
///         })
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(table.len(), 4000);
/// assert!(table.contains("3-999"));
/// assert!(table.bucket_count() > 16);
/// ```
///
/// [set-struct]: ./sync/struct.ConcurrentSet.html
pub struct HashTable<S = DefaultHashBuilder> {
    bucket_array: RwLock<BucketArray>,
    len: CachePadded<AtomicIsize>,
    policy: ResizePolicy,
    build_hasher: S,
    name: Option<String>,
}

impl HashTable<DefaultHashBuilder> {
    /// Creates an empty table with the default resize policy: 16 buckets,
    /// doubling at 50% load and halving at 10% load.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Returns a [`Builder`][builder-struct], which can build a
    /// `HashTable` with a custom name or resize policy.
    ///
    /// [builder-struct]: ./sync/struct.Builder.html
    pub fn builder() -> Builder<HashTable<DefaultHashBuilder>> {
        Builder::default()
    }
}

impl Default for HashTable<DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> HashTable<S> {
    pub(crate) fn with_everything(
        name: Option<String>,
        policy: ResizePolicy,
        build_hasher: S,
    ) -> Self {
        let bucket_array = match BucketArray::with_length(policy.min_buckets(), &policy) {
            Ok(array) => array,
            Err(f) => fault::fatal(f, name.as_deref()),
        };

        Self {
            bucket_array: RwLock::new(bucket_array),
            len: CachePadded::new(AtomicIsize::new(0)),
            policy,
            build_hasher,
            name,
        }
    }

    /// Returns the number of values in the table.
    ///
    /// Other threads may add or remove values at any time, so the result is
    /// only a snapshot.
    pub fn len(&self) -> usize {
        clamp(self.len.load(Ordering::Relaxed))
    }

    /// Returns `true` if the table holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current number of buckets.
    ///
    /// Waits for a resize in progress to finish.
    pub fn bucket_count(&self) -> usize {
        self.bucket_array.read().len()
    }

    /// Returns the thresholds for the current number of buckets.
    pub fn thresholds(&self) -> Thresholds {
        self.bucket_array.read().thresholds
    }

    /// Returns the resize policy of this table.
    pub fn policy(&self) -> &ResizePolicy {
        &self.policy
    }

    /// Returns the name of this table, if one was given to the builder.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns a reference to the table's `BuildHasher`.
    pub fn hasher(&self) -> &S {
        &self.build_hasher
    }
}

impl<S> HashTable<S>
where
    S: BuildHasher,
{
    /// Creates an empty table with the default resize policy, using
    /// `build_hasher` to hash the values.
    pub fn with_hasher(build_hasher: S) -> Self {
        Self::with_everything(None, ResizePolicy::default(), build_hasher)
    }

    /// Adds `value` to the table.
    ///
    /// Returns `true` if `value` was absent and has been added, `false` if it
    /// was already present, in which case the table is unchanged.
    pub fn insert(&self, value: impl AsRef<[u8]>) -> bool {
        let value = value.as_ref();
        let hash = self.hash(value);

        let bucket_array = self.bucket_array.read();
        if !bucket_array.bucket_for(hash).insert(hash, value) {
            return false;
        }

        let len = self.len.fetch_add(1, Ordering::Relaxed) + 1;
        if bucket_array.thresholds.should_expand(clamp(len)) {
            let target = self.policy.expanded(bucket_array.len());
            self.resize(bucket_array, target);
        }

        true
    }

    /// Removes `value` from the table.
    ///
    /// Returns `true` if `value` was present and has been removed, `false` if
    /// it was absent, in which case the table is unchanged.
    pub fn erase(&self, value: impl AsRef<[u8]>) -> bool {
        let value = value.as_ref();
        let hash = self.hash(value);

        let bucket_array = self.bucket_array.read();
        if !bucket_array.bucket_for(hash).remove(hash, value) {
            return false;
        }

        let len = self.len.fetch_sub(1, Ordering::Relaxed) - 1;
        if bucket_array.thresholds.should_shrink(clamp(len)) {
            let target = self.policy.shrunk(bucket_array.len());
            self.resize(bucket_array, target);
        }

        true
    }

    /// Returns `true` if the table holds `value`.
    ///
    /// Never changes the table and never triggers a resize.
    pub fn contains(&self, value: impl AsRef<[u8]>) -> bool {
        let value = value.as_ref();
        let hash = self.hash(value);

        self.bucket_array.read().bucket_for(hash).contains(hash, value)
    }

    #[inline]
    fn hash(&self, value: &[u8]) -> u64 {
        let mut hasher = self.build_hasher.build_hasher();
        hasher.write(value);
        hasher.finish()
    }
}

impl<S> HashTable<S> {
    /// Resizes the table to `target` buckets, consuming the caller's shared
    /// hold on the resize lock.
    ///
    /// The shared hold is released before the exclusive one is requested. If
    /// the bucket count changed in between, another thread has already
    /// resized and this call does nothing. The caller ends up holding no lock.
    fn resize(&self, shared: RwLockReadGuard<'_, BucketArray>, target: usize) {
        let observed = shared.len();
        drop(shared);
        self.resize_from(observed, target);
    }

    /// Takes the exclusive hold and resizes from `observed` to `target`
    /// buckets, unless the table no longer has `observed` buckets or already
    /// has `target`.
    fn resize_from(&self, observed: usize, target: usize) {
        let mut bucket_array = self.bucket_array.write();
        let current = bucket_array.len();

        if current != observed || current == target {
            #[cfg(feature = "logging")]
            log::trace!(
                "{}Skipped a resize from {observed} to {target} buckets; the table has {current}",
                self.log_prefix()
            );
            return;
        }

        if let Err(f) = bucket_array.rehash(target, &self.policy) {
            fault::fatal(f, self.name());
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "{}Resized from {current} to {target} buckets with {} values",
            self.log_prefix(),
            self.len()
        );
    }

    #[cfg(feature = "logging")]
    fn log_prefix(&self) -> String {
        self.name
            .as_deref()
            .map(|name| format!("[{name}] "))
            .unwrap_or_default()
    }
}

// The counter may be transiently negative; see the type docs.
#[inline]
fn clamp(len: isize) -> usize {
    len.try_into().unwrap_or(0)
}

impl<S> fmt::Debug for HashTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bucket_array = self.bucket_array.read();
        f.debug_struct("HashTable")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("bucket_count", &bucket_array.len())
            .field("thresholds", &bucket_array.thresholds)
            .field("policy", &self.policy)
            .finish()
    }
}
