use super::Builder;
use crate::cht::{DefaultHashBuilder, HashTable};

use std::{fmt, hash::BuildHasher};

/// A thread-safe set of strings.
///
/// `ConcurrentSet` is a thin layer over [`HashTable`][table-struct]. Its
/// `add` and `del` report whether the call was a **no-op**, which is the
/// opposite of what `HashTable::insert` and `HashTable::erase` report:
///
/// | call          | returns `true` when                          |
/// |---------------|----------------------------------------------|
/// | `add(v)`      | `v` was already a member; nothing changed    |
/// | `del(v)`      | `v` was already absent; nothing changed      |
/// | `contains(v)` | `v` is a member                              |
///
/// All methods take `&self`. Share the set between threads by wrapping it in
/// an `Arc`.
///
/// # Examples
///
/// ```rust
/// use strset::sync::ConcurrentSet;
///
/// let set = ConcurrentSet::new();
///
/// assert!(!set.contains("A"));
/// assert!(!set.add("A")); // newly added
/// assert!(set.add("A")); // already a member
/// assert!(set.contains("A"));
/// assert!(!set.del("A")); // removed
/// assert!(set.del("A")); // already absent
/// assert!(!set.contains("A"));
/// ```
///
/// [table-struct]: ../struct.HashTable.html
pub struct ConcurrentSet<S = DefaultHashBuilder> {
    table: HashTable<S>,
}

impl ConcurrentSet<DefaultHashBuilder> {
    /// Creates an empty set with the default resize policy.
    pub fn new() -> Self {
        Self::from(HashTable::new())
    }

    /// Returns a [`Builder`][builder-struct], which can build a
    /// `ConcurrentSet` with a custom name or resize policy.
    ///
    /// [builder-struct]: ./struct.Builder.html
    pub fn builder() -> Builder<ConcurrentSet<DefaultHashBuilder>> {
        Builder::default()
    }
}

impl Default for ConcurrentSet<DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> From<HashTable<S>> for ConcurrentSet<S> {
    fn from(table: HashTable<S>) -> Self {
        Self { table }
    }
}

impl<S> ConcurrentSet<S> {
    /// Returns the number of members. A snapshot under concurrent updates.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the underlying table.
    pub fn table(&self) -> &HashTable<S> {
        &self.table
    }
}

impl<S> ConcurrentSet<S>
where
    S: BuildHasher,
{
    /// Creates an empty set that hashes its members with `build_hasher`.
    pub fn with_hasher(build_hasher: S) -> Self {
        Self::from(HashTable::with_hasher(build_hasher))
    }

    /// Adds `value` to the set.
    ///
    /// Returns `true` if `value` was **already** a member and the set is
    /// unchanged, `false` if it has just been added.
    pub fn add(&self, value: impl AsRef<[u8]>) -> bool {
        !self.table.insert(value)
    }

    /// Removes `value` from the set.
    ///
    /// Returns `true` if `value` was **already** absent and the set is
    /// unchanged, `false` if it has just been removed.
    pub fn del(&self, value: impl AsRef<[u8]>) -> bool {
        !self.table.erase(value)
    }

    /// Returns `true` if `value` is a member of the set.
    pub fn contains(&self, value: impl AsRef<[u8]>) -> bool {
        self.table.contains(value)
    }
}

impl<S> fmt::Debug for ConcurrentSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConcurrentSet").field(&self.table).finish()
    }
}
