//! Eviction policy interface
//!
//! An eviction policy only does bookkeeping: it mirrors the set of cached keys
//! with their sizes and decides which keys to give up when space is needed.
//! The cache keeps the policy in lockstep with its value map, so every error
//! returned here means that the two have diverged.

use crate::error::Result;

/// Strategy deciding which cached entries to remove when space must be freed
pub trait EvictionPolicy<K, Z> {
    /// Start tracking a new key.
    ///
    /// Fails with `AlreadyTracked` if the key is already tracked.
    fn insert(&mut self, key: K, size: Z) -> Result<()>;

    /// Record an access to a tracked key.
    ///
    /// Fails with `Untracked` if the key is not tracked.
    fn touch(&mut self, key: &K) -> Result<()>;

    /// Stop tracking a key, returning the size it was registered with.
    ///
    /// Fails with `Untracked` if the key is not tracked.
    fn erase(&mut self, key: &K) -> Result<Z>;

    /// Remove victims until at least `target` bytes have been released.
    ///
    /// Returns the victim keys in eviction order. Fails with
    /// `EvictionUnderflow`, without removing anything, if fewer than `target`
    /// bytes are tracked.
    fn evict(&mut self, target: Z) -> Result<Vec<K>>;

    /// Forget every tracked key
    fn clear(&mut self);

    /// Number of tracked keys
    fn len(&self) -> usize;

    /// Whether no keys are tracked
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
