#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
#![warn(missing_docs)]

//! A thread-safe, resizable hash set of strings.
//!
//! `strset` provides [`HashTable`], a chained hash table whose buckets are
//! individually locked and whose bucket array is resized online, and
//! [`sync::ConcurrentSet`], a small set API on top of it.
//!
//! Any number of threads may insert, erase and look up values at the same
//! time. Operations on different buckets run in parallel, operations on the
//! same bucket are serialized, and a resize briefly excludes everything else.
//! See the [`HashTable`] docs for the locking protocol.
//!
//! # Examples
//!
//! ```rust
//! use strset::sync::ConcurrentSet;
//!
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(ConcurrentSet::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || {
//!             // Returns `true` when the value was already present.
//!             (0..100).filter(|i| !set.add(i.to_string())).count()
//!         })
//!     })
//!     .collect();
//!
//! let added: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
//! assert_eq!(added, 100);
//! assert_eq!(set.len(), 100);
//! ```
//!
//! # Crate features
//!
//! - `logging`: emits resize events at `debug`/`trace` level and fatal faults
//!   at `error` level through the [`log`](https://docs.rs/log) crate.

pub(crate) mod cht;
pub(crate) mod common;
pub mod policy;
pub mod sync;

pub use cht::{DefaultHashBuilder, HashTable};
pub use common::error::ConfigError;
pub use policy::{ResizePolicy, Thresholds};
