//! # objcache
//!
//! Size-bounded object cache with pluggable eviction and synchronization
//! policies.
//!
//! ## Architecture
//! - **ObjectCache**: key → object map with byte accounting (AHash map)
//! - **LruPolicy**: index-linked recency list, O(1) touch and removal
//! - **UniformKey**: per-cache random key generator
//! - **SyncPolicy**: maps write / read / trivial operations onto lock guards
//!
//! ## Example
//!
//! ```rust
//! use objcache::{ObjectCache, SynchronizedObjectCache};
//!
//! // Single-threaded cache of i32 values limited to 5 values
//! let cache: ObjectCache<i32> = ObjectCache::with_capacity(5 * 4);
//! let key = cache.insert_auto(10);
//! assert_eq!(cache.find(key), Some(10));
//!
//! // Heterogeneous, thread-safe cache
//! let shared: SynchronizedObjectCache = SynchronizedObjectCache::new();
//! let list = vec![1u8, 2, 3];
//! let key = shared.insert_any_sized(list.clone(), list.len());
//! assert_eq!(*shared.get_as::<Vec<u8>>(key).unwrap(), list);
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod keygen;
mod lru;
mod policy;
mod stats;
mod sync;
mod traits;
mod value;

pub use cache::{MutexObjectCache, ObjectCache, SynchronizedObjectCache};
pub use error::{CacheError, Result};
pub use keygen::{KeyGenerator, UniformKey};
pub use lru::LruPolicy;
pub use policy::EvictionPolicy;
pub use stats::{CacheStats, StatsSnapshot};
pub use sync::{CacheLock, ExclusiveRw, MutexSync, NoSync, SyncPolicy};
pub use traits::{CacheKey, CacheSize};
pub use value::AnyValue;
