//! A concurrent, resizable hash table with per-bucket locking.
//!
//! The table is an array of buckets. Each bucket holds the chain of nodes
//! whose hash selects it, behind its own mutex. Each node stores its value and
//! the value's hash, so redistributing nodes never calls the hasher again.
//!
//! The bucket array sits behind a readers-writer lock, the resize lock.
//! Lookups, insertions and erasures hold it in shared mode and then lock a
//! single bucket, which lets operations on different buckets proceed in
//! parallel while operations on the same bucket are totally ordered.
//!
//! Resizing swaps the whole bucket array and therefore takes the resize lock
//! in exclusive mode. It is triggered by the operation that moved the live node
//! count across a threshold. That operation gives up its shared hold and then
//! waits for the exclusive one; if the bucket count changed while it waited,
//! someone else has already resized and it backs off. Under the exclusive hold
//! every old bucket is drained once, its nodes are moved into a freshly
//! allocated array, and the old buckets with their locks are dropped.
//!
//! The live node count is a padded atomic that is updated outside of every
//! bucket lock. It decides when to resize and is allowed to be momentarily
//! stale; correctness of lookups never depends on it.
//!
//! The idea of guarding a bucket array with a readers-writer lock while
//! locking buckets individually follows [`CHashMap`] and the segment locks of
//! the [`ConcurrentHashMap`] from OpenJDK 7.
//!
//! [`CHashMap`]: https://docs.rs/chashmap
//! [`ConcurrentHashMap`]: https://github.com/openjdk-mirror/jdk7u-jdk/blob/master/src/share/classes/java/util/concurrent/ConcurrentHashMap.java

pub(crate) mod map;

#[cfg(test)]
pub(crate) mod test_util;

pub use map::{DefaultHashBuilder, HashTable};
