//! ObjectCache: size-bounded object cache with pluggable policies

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::sync::Arc;

use ahash::RandomState;
use tracing::{debug, error, trace, warn};

use crate::error::{CacheError, Result};
use crate::keygen::{KeyGenerator, UniformKey};
use crate::lru::LruPolicy;
use crate::policy::EvictionPolicy;
use crate::stats::CacheStats;
use crate::sync::{CacheLock, ExclusiveRw, MutexSync, NoSync, SyncPolicy};
use crate::traits::{CacheKey, CacheSize};
use crate::value::AnyValue;

/// Cached object and its accounted size
#[derive(Clone)]
struct CacheEntry<T, Z> {
    value: T,
    size: Z,
}

/// Entries removed in one eviction pass
#[derive(Debug, Clone, Copy)]
struct Eviction<Z> {
    count: usize,
    bytes: Z,
}

/// Everything guarded by the cache lock
#[derive(Clone)]
struct CacheState<T, K, Z, P, G> {
    entries: HashMap<K, CacheEntry<T, Z>, RandomState>,
    policy: P,
    keygen: G,
    size: Z,
    capacity: Z,
}

/// Unwrap an eviction policy result.
///
/// An error here means the value map and the policy disagree about which keys
/// are cached, which no sequence of public calls can cause. The cache panics
/// rather than keep serving from corrupted state.
fn bookkeeping<R>(result: Result<R>) -> R {
    match result {
        Ok(value) => value,
        Err(err) => {
            error!(error = %err, "object cache bookkeeping corrupted");
            panic!("object cache bookkeeping corrupted: {err}");
        }
    }
}

impl<T, K, Z, P, G> CacheState<T, K, Z, P, G>
where
    K: CacheKey,
    Z: CacheSize,
    P: EvictionPolicy<K, Z>,
    G: KeyGenerator<K>,
{
    fn insert(&mut self, value: T, size: Z) -> (K, Eviction<Z>) {
        let required = self.size.saturating_add(size);
        let eviction = if required > self.capacity {
            self.evict(required.saturating_sub(self.capacity))
        } else {
            Eviction {
                count: 0,
                bytes: Z::ZERO,
            }
        };

        let key = self.fresh_key();
        self.entries.insert(key, CacheEntry { value, size });
        bookkeeping(self.policy.insert(key, size));
        self.size = self.size.saturating_add(size);

        (key, eviction)
    }

    /// Draw keys until one is not live
    fn fresh_key(&mut self) -> K {
        loop {
            let key = self.keygen.generate();
            if !self.entries.contains_key(&key) {
                return key;
            }
        }
    }

    fn touch(&mut self, key: K) -> Option<&T> {
        if !self.entries.contains_key(&key) {
            return None;
        }
        bookkeeping(self.policy.touch(&key));
        self.entries.get(&key).map(|entry| &entry.value)
    }

    fn erase(&mut self, key: K) -> Option<Z> {
        let entry = self.entries.remove(&key)?;
        bookkeeping(self.policy.erase(&key));
        self.size = self.size.saturating_sub(entry.size);
        Some(entry.size)
    }

    /// Evict least-recently-used entries until `target` bytes are freed or
    /// the cache is empty
    fn evict(&mut self, target: Z) -> Eviction<Z> {
        let target = target.min(self.size);
        let mut eviction = Eviction {
            count: 0,
            bytes: Z::ZERO,
        };
        if target == Z::ZERO {
            return eviction;
        }

        for key in bookkeeping(self.policy.evict(target)) {
            let entry = bookkeeping(self.entries.remove(&key).ok_or_else(|| {
                CacheError::Desynchronized {
                    key: format!("{key:?}"),
                }
            }));
            eviction.count += 1;
            eviction.bytes = eviction.bytes.saturating_add(entry.size);
        }
        self.size = self.size.saturating_sub(eviction.bytes);
        eviction
    }

    fn clear(&mut self) -> Eviction<Z> {
        let eviction = Eviction {
            count: self.entries.len(),
            bytes: self.size,
        };
        self.entries.clear();
        self.policy.clear();
        self.size = Z::ZERO;
        eviction
    }
}

/// Container for size-limited caching of data objects.
///
/// Every inserted object gets a fresh unique key from the key generator `G`.
/// The cache accounts the byte size given for each object and, when an insert
/// would push the total past the capacity, evicts the objects chosen by the
/// eviction policy `P` (least recently used by default) first. An object
/// larger than the whole capacity is still admitted: everything else is
/// evicted and the size stays above capacity until the next eviction.
///
/// Objects may be evicted at any time by other inserts, so always go through
/// [`find`](Self::find) or [`contains`](Self::contains) rather than assuming a
/// key is still live. In multi-threaded code prefer `find`, which checks and
/// reads under a single lock acquisition.
///
/// Thread-safety comes from the synchronization policy `S`:
/// - [`NoSync`] (the default): no locking, the cache is `!Sync`
/// - [`ExclusiveRw`]: see [`SynchronizedObjectCache`]
/// - [`MutexSync`]: see [`MutexObjectCache`]
///
/// The default value type is [`AnyValue`], which stores values of any type.
/// Use [`insert_any`](Self::insert_any) and [`get_as`](Self::get_as) with it.
pub struct ObjectCache<
    T = AnyValue,
    K = usize,
    Z = usize,
    P = LruPolicy<K, Z>,
    S = NoSync,
    G = UniformKey<K>,
> where
    S: SyncPolicy,
{
    state: S::Lock<CacheState<T, K, Z, P, G>>,
    stats: CacheStats,
}

/// [`ObjectCache`] with exclusive writes and reads and shared trivial reads.
///
/// Safe to share between threads via `Arc`.
pub type SynchronizedObjectCache<
    T = AnyValue,
    K = usize,
    Z = usize,
    P = LruPolicy<K, Z>,
    G = UniformKey<K>,
> = ObjectCache<T, K, Z, P, ExclusiveRw, G>;

/// [`ObjectCache`] serialized by a single mutex
pub type MutexObjectCache<
    T = AnyValue,
    K = usize,
    Z = usize,
    P = LruPolicy<K, Z>,
    G = UniformKey<K>,
> = ObjectCache<T, K, Z, P, MutexSync, G>;

impl<T, K, Z, P, S, G> ObjectCache<T, K, Z, P, S, G>
where
    K: CacheKey,
    Z: CacheSize,
    P: EvictionPolicy<K, Z>,
    S: SyncPolicy,
    G: KeyGenerator<K>,
{
    /// Create an empty cache with the default capacity (10 MB)
    pub fn new() -> Self
    where
        P: Default,
        G: Default,
    {
        Self::with_capacity(Z::DEFAULT_CAPACITY)
    }

    /// Create an empty cache with the given capacity in bytes
    pub fn with_capacity(capacity: Z) -> Self
    where
        P: Default,
        G: Default,
    {
        Self::with_parts(capacity, P::default(), G::default())
    }

    /// Create an empty cache from explicit policy and key generator instances
    ///
    /// # Arguments
    /// * `capacity` - Maximum cached bytes
    /// * `policy` - Eviction policy, cleared before use
    /// * `keygen` - Source of new keys
    pub fn with_parts(capacity: Z, mut policy: P, keygen: G) -> Self {
        policy.clear();
        Self {
            state: CacheLock::new(CacheState {
                entries: HashMap::with_hasher(RandomState::new()),
                policy,
                keygen,
                size: Z::ZERO,
                capacity,
            }),
            stats: CacheStats::new(),
        }
    }

    /// Cache an object with a caller-determined size
    ///
    /// # Arguments
    /// * `value` - Object to cache
    /// * `size` - Bytes to account for the object
    ///
    /// # Returns
    /// * `K` - Key for accessing the cached object
    pub fn insert(&self, value: T, size: Z) -> K {
        let (key, eviction, capacity) = {
            let mut state = self.state.write();
            let (key, eviction) = state.insert(value, size);
            (key, eviction, state.capacity)
        };

        self.record_eviction(eviction);
        self.stats.record_insert();
        if size > capacity {
            warn!(key = ?key, %size, %capacity, "admitted object larger than cache capacity");
        }
        trace!(key = ?key, %size, "cached object");
        key
    }

    /// Cache an object, accounting `size_of::<T>()` bytes for it.
    ///
    /// Objects owning heap memory (`Vec`, `String`, boxed buffers) are
    /// undercounted; use [`insert`](Self::insert) with their real size.
    pub fn insert_auto(&self, value: T) -> K {
        self.insert(value, Z::from_usize(mem::size_of::<T>()))
    }

    /// Return whether the object referenced by `key` is cached
    pub fn contains(&self, key: K) -> bool {
        self.state.trivial().entries.contains_key(&key)
    }

    /// Retrieve a copy of a cached object and mark it as recently used
    ///
    /// # Returns
    /// * `Result<T>` - The object, or `NotFound` if it is not cached
    pub fn get(&self, key: K) -> Result<T>
    where
        T: Clone,
    {
        self.find(key).ok_or_else(|| CacheError::not_found(&key))
    }

    /// Retrieve a copy of a cached object if present and mark it as recently
    /// used
    pub fn find(&self, key: K) -> Option<T>
    where
        T: Clone,
    {
        self.find_with(key, T::clone)
    }

    /// Run `f` on a cached object in place and mark it as recently used.
    ///
    /// `f` runs while the read lock is held and must not call back into
    /// this cache.
    pub fn find_with<R, F>(&self, key: K, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        let result = self.state.read().touch(key).map(f);

        match result {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        result
    }

    /// Remove an object from the cache
    ///
    /// # Returns
    /// * `Z` - Size of the removed object, 0 if the key was not cached
    pub fn erase(&self, key: K) -> Z {
        let erased = self.state.write().erase(key);

        match erased {
            Some(size) => {
                self.stats.record_erase();
                trace!(key = ?key, %size, "erased object");
                size
            }
            None => Z::ZERO,
        }
    }

    /// Remove every object
    ///
    /// # Returns
    /// * `Z` - Total size of the removed objects
    pub fn clear(&self) -> Z {
        let eviction = self.state.write().clear();
        self.record_eviction(eviction);
        eviction.bytes
    }

    /// Remove least-recently-used objects until at least `bytes` have been
    /// freed or the cache is empty
    ///
    /// # Returns
    /// * `Z` - Total size of the removed objects
    pub fn evict(&self, bytes: Z) -> Z {
        let eviction = self.state.write().evict(bytes);
        self.record_eviction(eviction);
        eviction.bytes
    }

    /// Set the maximum capacity in bytes, evicting objects if the cache is
    /// now over capacity
    ///
    /// # Returns
    /// * `Z` - Total size of the evicted objects
    pub fn set_capacity(&self, capacity: Z) -> Z {
        let eviction = {
            let mut state = self.state.write();
            state.capacity = capacity;
            let excess = state.size.saturating_sub(capacity);
            state.evict(excess)
        };

        debug!(%capacity, freed = %eviction.bytes, "cache capacity changed");
        self.record_eviction(eviction);
        eviction.bytes
    }

    /// Get the maximum capacity in bytes
    pub fn capacity(&self) -> Z {
        self.state.trivial().capacity
    }

    /// Get the size of all cached objects in bytes
    pub fn size(&self) -> Z {
        self.state.trivial().size
    }

    /// Get the number of cached objects
    pub fn len(&self) -> usize {
        self.state.trivial().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.state.trivial().entries.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn record_eviction(&self, eviction: Eviction<Z>) {
        if eviction.count == 0 {
            return;
        }
        self.stats
            .record_evictions(eviction.count, eviction.bytes.as_u64());
        debug!(
            evicted = eviction.count,
            freed = %eviction.bytes,
            "evicted cached objects"
        );
    }
}

impl<K, Z, P, S, G> ObjectCache<AnyValue, K, Z, P, S, G>
where
    K: CacheKey,
    Z: CacheSize,
    P: EvictionPolicy<K, Z>,
    S: SyncPolicy,
    G: KeyGenerator<K>,
{
    /// Cache a value of any type, accounting `size_of::<V>()` bytes for it.
    ///
    /// Undercounts values owning heap memory, see
    /// [`insert_any_sized`](Self::insert_any_sized).
    pub fn insert_any<V: Any + Send + Sync>(&self, value: V) -> K {
        self.insert_any_sized(value, Z::from_usize(mem::size_of::<V>()))
    }

    /// Cache a value of any type with a caller-determined size
    pub fn insert_any_sized<V: Any + Send + Sync>(&self, value: V, size: Z) -> K {
        self.insert(AnyValue::new(value), size)
    }

    /// Retrieve a cached value as a `V`
    ///
    /// # Returns
    /// * `Result<Arc<V>>` - The value, `NotFound` if it is not cached, or
    ///   `TypeMismatch` if it is not a `V`
    pub fn get_as<V: Any + Send + Sync>(&self, key: K) -> Result<Arc<V>> {
        self.get(key)?.downcast::<V>()
    }

    /// Retrieve a cached value as a `V` if present
    ///
    /// # Returns
    /// * `Result<Option<Arc<V>>>` - `None` if not cached, `TypeMismatch` if it
    ///   is not a `V`
    pub fn find_as<V: Any + Send + Sync>(&self, key: K) -> Result<Option<Arc<V>>> {
        self.find(key).map(|value| value.downcast::<V>()).transpose()
    }
}

impl<T, K, Z, P, S, G> Default for ObjectCache<T, K, Z, P, S, G>
where
    K: CacheKey,
    Z: CacheSize,
    P: EvictionPolicy<K, Z> + Default,
    S: SyncPolicy,
    G: KeyGenerator<K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Copies the cached objects and policy state into an independent cache.
/// Statistics start from zero in the copy.
impl<T, K, Z, P, S, G> Clone for ObjectCache<T, K, Z, P, S, G>
where
    T: Clone,
    K: CacheKey,
    Z: CacheSize,
    P: EvictionPolicy<K, Z> + Clone,
    S: SyncPolicy,
    G: KeyGenerator<K> + Clone,
{
    fn clone(&self) -> Self {
        let state: CacheState<T, K, Z, P, G> = (*self.state.trivial()).clone();
        Self {
            state: CacheLock::new(state),
            stats: CacheStats::new(),
        }
    }
}

impl<T, K, Z, P, S, G> fmt::Debug for ObjectCache<T, K, Z, P, S, G>
where
    K: CacheKey,
    Z: CacheSize,
    S: SyncPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.trivial();
        f.debug_struct("ObjectCache")
            .field("capacity", &state.capacity)
            .field("size", &state.size)
            .field("count", &state.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const INT: usize = mem::size_of::<i32>();

    type IntCache = ObjectCache<i32>;

    #[test]
    fn test_simple_insert_erase() {
        let cache = ObjectCache::<AnyValue>::new();

        let key = cache.insert_any(10i32);
        assert!(cache.contains(key));
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_empty());
        assert_eq!(cache.size(), INT);

        assert_eq!(*cache.get_as::<i32>(key).unwrap(), 10);

        let erased = cache.erase(key);
        assert!(!cache.contains(key));
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(erased, INT);
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_specialized_cache() {
        let cache = IntCache::new();

        let key = cache.insert_auto(10);
        assert!(cache.contains(key));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size(), INT);
        assert_eq!(cache.get(key).unwrap(), 10);

        assert_eq!(cache.erase(key), INT);
        assert!(cache.is_empty());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_default_capacity() {
        let cache = IntCache::default();
        assert_eq!(cache.capacity(), 10_000_000);

        let cache: ObjectCache<i32, u64, u32> = ObjectCache::new();
        assert_eq!(cache.capacity(), 10_000_000u32);
    }

    #[test]
    fn test_mass_insert_clear() {
        let cache = IntCache::new();

        let keys: Vec<usize> = (0..100)
            .map(|val| {
                let key = cache.insert_auto(val);
                assert!(cache.contains(key));
                key
            })
            .collect();
        assert_eq!(cache.len(), 100);
        assert_eq!(cache.size(), INT * 100);

        for (idx, key) in keys.iter().enumerate() {
            assert_eq!(cache.get(*key).unwrap(), idx as i32);
        }

        // Clear 50%
        let erased = cache.evict(INT * 50);
        assert_eq!(erased, INT * 50);
        assert_eq!(cache.len(), 50);
        assert_eq!(cache.size(), INT * 50);

        // Clear the rest
        assert_eq!(cache.clear(), INT * 50);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_unique_keys() {
        let cache = IntCache::new();

        let keys: Vec<usize> = (0..100).map(|val| cache.insert_auto(val)).collect();
        let set: HashSet<usize> = keys.iter().copied().collect();
        assert_eq!(set.len(), keys.len());
    }

    #[test]
    fn test_key_collision_redraws() {
        let mut draws = vec![7u32, 7, 7, 8].into_iter();
        let cache: ObjectCache<i32, u32, usize, LruPolicy<u32, usize>, NoSync, _> =
            ObjectCache::with_parts(100, LruPolicy::new(), move || draws.next().unwrap_or(0));

        let first = cache.insert_auto(1);
        let second = cache.insert_auto(2);
        assert_eq!(first, 7);
        assert_eq!(second, 8);
        assert_eq!(cache.get(7).unwrap(), 1);
        assert_eq!(cache.get(8).unwrap(), 2);
    }

    #[test]
    fn test_heterogeneous_data() {
        let cache = ObjectCache::<AnyValue>::new();

        let k1 = cache.insert_any(10i32);
        let list = vec![0, 1, 2, 3, 4];
        let list_size = INT * list.len();
        let k2 = cache.insert_any_sized(list.clone(), list_size);
        let k3 = cache.insert_any_sized(String::from("pixels"), 200 * 100 * 3);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.size(), INT + list_size + 200 * 100 * 3);

        assert_eq!(*cache.get_as::<i32>(k1).unwrap(), 10);
        assert_eq!(*cache.get_as::<Vec<i32>>(k2).unwrap(), list);
        assert_eq!(cache.get_as::<String>(k3).unwrap().as_str(), "pixels");

        // Wrong type is a checked failure
        assert!(matches!(
            cache.get_as::<u8>(k1),
            Err(CacheError::TypeMismatch { .. })
        ));
        assert!(cache.find_as::<String>(k2).is_err());
        assert!(cache.get(k2).unwrap().is::<Vec<i32>>());
    }

    #[test]
    fn test_lru_cache() {
        let cache = IntCache::new();

        cache.set_capacity(INT * 50);
        assert_eq!(cache.capacity(), INT * 50);

        let keys: Vec<usize> = (0..100).map(|val| cache.insert_auto(val)).collect();

        assert_eq!(cache.size(), cache.capacity());
        assert_eq!(cache.len(), 50);
        for (idx, key) in keys.iter().enumerate() {
            assert_eq!(cache.contains(*key), idx >= 50);
        }

        // Touch the oldest key still cached
        let keep_alive = keys[50];
        assert_eq!(cache.get(keep_alive).unwrap(), 50);

        let new_key = cache.insert_auto(10);
        assert!(cache.contains(keep_alive));
        assert!(cache.contains(new_key));
        assert!(!cache.contains(keys[51]));
    }

    #[test]
    fn test_touch_resets_recency() {
        let cache = IntCache::with_capacity(INT * 3);

        let a = cache.insert_auto(1);
        let b = cache.insert_auto(2);
        let c = cache.insert_auto(3);
        assert_eq!(cache.find(a), Some(1));

        let d = cache.insert_auto(4);
        assert!(cache.contains(a));
        assert!(!cache.contains(b));
        assert!(cache.contains(c));
        assert!(cache.contains(d));
    }

    #[test]
    fn test_find_with_touches() {
        let cache = IntCache::with_capacity(INT * 2);

        let a = cache.insert_auto(1);
        let b = cache.insert_auto(2);
        assert_eq!(cache.find_with(a, |v| v * 10), Some(10));

        cache.insert_auto(3);
        assert!(cache.contains(a));
        assert!(!cache.contains(b));
    }

    #[test]
    fn test_empty_access() {
        let cache = ObjectCache::<AnyValue>::new();

        assert!(!cache.contains(0));
        assert!(matches!(cache.get(0), Err(CacheError::NotFound { .. })));
        assert!(matches!(
            cache.get_as::<i32>(0),
            Err(CacheError::NotFound { .. })
        ));
        assert_eq!(cache.erase(0), 0);
        assert!(cache.find(0).is_none());
        assert!(cache.find_as::<i32>(0).unwrap().is_none());
        assert_eq!(cache.evict(100), 0);
        assert_eq!(cache.clear(), 0);
    }

    #[test]
    fn test_idempotent_erase() {
        let cache = IntCache::new();
        let key = cache.insert_auto(1);
        cache.insert_auto(2);

        assert_eq!(cache.erase(key), INT);
        assert_eq!(cache.erase(key), 0);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size(), INT);
        assert_eq!(cache.stats().erasures(), 1);
    }

    #[test]
    fn test_oversized_insert_admitted() {
        let cache = IntCache::with_capacity(10);
        let small = cache.insert(1, 4);
        let big = cache.insert(2, 25);

        // Everything else is evicted to make room
        assert!(!cache.contains(small));
        assert!(cache.contains(big));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size(), 25);
        assert!(cache.size() > cache.capacity());

        // The next insert evicts the oversized entry
        let next = cache.insert(3, 4);
        assert!(!cache.contains(big));
        assert!(cache.contains(next));
        assert_eq!(cache.size(), 4);
    }

    #[test]
    fn test_evict_more_than_cached() {
        let cache = IntCache::new();
        cache.insert(1, 4);
        cache.insert(2, 4);

        assert_eq!(cache.evict(1000), 8);
        assert!(cache.is_empty());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_set_capacity_evicts() {
        let cache = IntCache::new();
        let keys: Vec<usize> = (0..10).map(|v| cache.insert(v, 10)).collect();

        assert_eq!(cache.set_capacity(1000), 0);
        assert_eq!(cache.set_capacity(45), 60);
        assert_eq!(cache.size(), 40);
        assert_eq!(cache.len(), 4);
        for (idx, key) in keys.iter().enumerate() {
            assert_eq!(cache.contains(*key), idx >= 6);
        }
    }

    #[test]
    fn test_zero_size_entries() {
        let cache = IntCache::with_capacity(4);
        let free = cache.insert(1, 0);
        let paid = cache.insert(2, 4);

        assert_eq!(cache.size(), 4);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(free));
        assert!(cache.contains(paid));
        assert_eq!(cache.erase(free), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stats_recorded() {
        let cache = IntCache::with_capacity(INT * 2);

        let a = cache.insert_auto(1);
        cache.insert_auto(2);
        cache.insert_auto(3);
        cache.find(a);
        cache.find(cache.insert_auto(4));

        let stats = cache.stats().snapshot();
        assert_eq!(stats.inserts, 4);
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.evicted_bytes, (INT * 2) as u64);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let a = IntCache::new();
        let key0 = a.insert_auto(0);

        let b = a.clone();
        let key1 = b.insert_auto(1);

        assert_eq!(b.len(), 2);
        assert_ne!(a.len(), b.len());
        assert_eq!(b.get(key0).unwrap(), a.get(key0).unwrap());
        assert_eq!(b.get(key1).unwrap(), 1);
        assert!(!a.contains(key1));
    }

    #[test]
    fn test_move() {
        let a = IntCache::new();
        let key0 = a.insert_auto(0);

        let b = a;
        let key1 = b.insert_auto(1);
        assert_eq!(b.len(), 2);
        assert_eq!(b.get(key0).unwrap(), 0);
        assert_eq!(b.get(key1).unwrap(), 1);
    }

    #[test]
    fn test_shared_pointer_released() {
        let cache = ObjectCache::<AnyValue>::new();

        let weak = {
            let shared = Arc::new(10);
            let weak = Arc::downgrade(&shared);
            let key = cache.insert_any_sized(shared, INT);

            let stored = cache.get_as::<Arc<i32>>(key).unwrap();
            assert_eq!(**stored, 10);
            drop(stored);

            assert_eq!(cache.erase(key), INT);
            weak
        };

        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_debug_output() {
        let cache = IntCache::with_capacity(64);
        cache.insert_auto(1);

        let text = format!("{cache:?}");
        assert!(text.contains("capacity: 64"));
        assert!(text.contains("size: 4"));
        assert!(text.contains("count: 1"));
    }

    #[test]
    fn test_synchronized_cache_api() {
        let cache = SynchronizedObjectCache::<i32>::with_capacity(INT * 2);
        let a = cache.insert_auto(1);
        cache.insert_auto(2);
        cache.get(a).unwrap();
        cache.insert_auto(3);

        assert!(cache.contains(a));
        assert_eq!(cache.len(), 2);

        let cache = MutexObjectCache::<i32>::new();
        let key = cache.insert_auto(5);
        assert_eq!(cache.find(key), Some(5));
    }
}
