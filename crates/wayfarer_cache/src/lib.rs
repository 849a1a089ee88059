//! Generation result caching with TTL support.
//!
//! This crate provides the in-process [`CacheStore`](wayfarer_interface::CacheStore)
//! implementation and the deterministic keys the planning service caches under.

#![warn(missing_docs)]

mod key;
mod memory;

pub use key::{CACHE_KEY_VERSION, CacheKey};
pub use memory::{CacheStoreConfig, CacheStoreConfigBuilder, MemoryCacheStore};
