//! Error types for objcache

use thiserror::Error;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Error types for cache and eviction policy operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Key is not (or no longer) cached
    #[error("key {key} not found in cache")]
    NotFound {
        /// Debug rendering of the missing key
        key: String,
    },

    /// A type-erased value was read back as the wrong type
    #[error("cached value has type {found}, requested {expected}")]
    TypeMismatch {
        /// Requested type name
        expected: &'static str,
        /// Stored type name
        found: &'static str,
    },

    /// Eviction policy was asked to track a key it already tracks
    #[error("key {key} is already tracked by the eviction policy")]
    AlreadyTracked {
        /// Debug rendering of the key
        key: String,
    },

    /// Eviction policy was asked about a key it does not track
    #[error("key {key} is not tracked by the eviction policy")]
    Untracked {
        /// Debug rendering of the key
        key: String,
    },

    /// Eviction policy named a victim the cache does not hold
    #[error("key {key} chosen for eviction is missing from the cache")]
    Desynchronized {
        /// Debug rendering of the key
        key: String,
    },

    /// Eviction policy was asked to free more bytes than it tracks
    #[error("cannot evict {requested} bytes, only {available} bytes tracked")]
    EvictionUnderflow {
        /// Bytes requested
        requested: String,
        /// Bytes tracked at the time of the request
        available: String,
    },
}

impl CacheError {
    pub(crate) fn not_found(key: &impl std::fmt::Debug) -> Self {
        CacheError::NotFound {
            key: format!("{key:?}"),
        }
    }

    /// Whether this error signals desynchronized cache bookkeeping rather than
    /// an ordinary miss or type mismatch.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CacheError::AlreadyTracked { .. }
                | CacheError::Untracked { .. }
                | CacheError::Desynchronized { .. }
                | CacheError::EvictionUnderflow { .. }
        )
    }
}
