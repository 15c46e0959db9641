//! Provides the thread-safe set and the builder for it and its table.

mod builder;
mod set;

pub use {builder::Builder, set::ConcurrentSet};
