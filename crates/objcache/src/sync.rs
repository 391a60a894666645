//! Cache synchronization policies
//!
//! Cache operations fall into three categories:
//! - **write**: insert, erase, clear, evict, set_capacity
//! - **read**: get, find (these also touch the eviction policy)
//! - **trivial**: contains, len, is_empty, capacity, size
//!
//! A [`SyncPolicy`] picks the lock that guards the cache state and which kind
//! of guard each category takes from it. The cache code is the same for every
//! policy; only the guard types change.

use std::cell::{Ref, RefCell, RefMut};
use std::ops::{Deref, DerefMut};

use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock around the cache state, handing out one guard kind per category
pub trait CacheLock<V> {
    /// Guard for write operations
    type WriteGuard<'a>: DerefMut<Target = V>
    where
        Self: 'a;

    /// Guard for complex reads (must allow touching the eviction policy)
    type ReadGuard<'a>: DerefMut<Target = V>
    where
        Self: 'a;

    /// Guard for trivial reads
    type TrivialGuard<'a>: Deref<Target = V>
    where
        Self: 'a;

    /// Wrap the state
    fn new(value: V) -> Self;

    /// Acquire for a write operation
    fn write(&self) -> Self::WriteGuard<'_>;

    /// Acquire for a complex read
    fn read(&self) -> Self::ReadGuard<'_>;

    /// Acquire for a trivial read
    fn trivial(&self) -> Self::TrivialGuard<'_>;
}

/// Synchronization policy: selects the [`CacheLock`] used by a cache
pub trait SyncPolicy {
    /// Lock type wrapping the cache state `V`
    type Lock<V>: CacheLock<V>;
}

/// No synchronization.
///
/// Guards are plain `RefCell` borrows. The resulting cache is `!Sync`, so it
/// cannot be shared between threads without external locking.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSync;

impl SyncPolicy for NoSync {
    type Lock<V> = RefCell<V>;
}

impl<V> CacheLock<V> for RefCell<V> {
    type WriteGuard<'a> = RefMut<'a, V> where Self: 'a;
    type ReadGuard<'a> = RefMut<'a, V> where Self: 'a;
    type TrivialGuard<'a> = Ref<'a, V> where Self: 'a;

    fn new(value: V) -> Self {
        RefCell::new(value)
    }

    fn write(&self) -> Self::WriteGuard<'_> {
        self.borrow_mut()
    }

    fn read(&self) -> Self::ReadGuard<'_> {
        self.borrow_mut()
    }

    fn trivial(&self) -> Self::TrivialGuard<'_> {
        self.borrow()
    }
}

/// Exclusive writes and reads, shared trivial reads.
///
/// Reads are exclusive because they reorder the LRU list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExclusiveRw;

impl SyncPolicy for ExclusiveRw {
    type Lock<V> = RwLock<V>;
}

impl<V> CacheLock<V> for RwLock<V> {
    type WriteGuard<'a> = RwLockWriteGuard<'a, V> where Self: 'a;
    type ReadGuard<'a> = RwLockWriteGuard<'a, V> where Self: 'a;
    type TrivialGuard<'a> = RwLockReadGuard<'a, V> where Self: 'a;

    fn new(value: V) -> Self {
        RwLock::new(value)
    }

    fn write(&self) -> Self::WriteGuard<'_> {
        RwLock::write(self)
    }

    fn read(&self) -> Self::ReadGuard<'_> {
        RwLock::write(self)
    }

    fn trivial(&self) -> Self::TrivialGuard<'_> {
        RwLock::read(self)
    }
}

/// Every category takes the same exclusive mutex
#[derive(Debug, Clone, Copy, Default)]
pub struct MutexSync;

impl SyncPolicy for MutexSync {
    type Lock<V> = Mutex<V>;
}

impl<V> CacheLock<V> for Mutex<V> {
    type WriteGuard<'a> = MutexGuard<'a, V> where Self: 'a;
    type ReadGuard<'a> = MutexGuard<'a, V> where Self: 'a;
    type TrivialGuard<'a> = MutexGuard<'a, V> where Self: 'a;

    fn new(value: V) -> Self {
        Mutex::new(value)
    }

    fn write(&self) -> Self::WriteGuard<'_> {
        self.lock()
    }

    fn read(&self) -> Self::ReadGuard<'_> {
        self.lock()
    }

    fn trivial(&self) -> Self::TrivialGuard<'_> {
        self.lock()
    }
}
