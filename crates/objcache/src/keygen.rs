//! Key generation for cached objects

use std::fmt;
use std::marker::PhantomData;

use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of fresh cache keys.
///
/// A generator cannot see which keys are live; the cache re-draws on
/// collision. Any `FnMut() -> K` closure is a generator.
pub trait KeyGenerator<K> {
    /// Produce the next candidate key
    fn generate(&mut self) -> K;
}

impl<K, F> KeyGenerator<K> for F
where
    F: FnMut() -> K,
{
    fn generate(&mut self) -> K {
        self()
    }
}

/// Uniformly distributed random integer keys.
///
/// Each generator owns its random engine, seeded once from OS entropy, so
/// separate caches never share generator state.
pub struct UniformKey<K> {
    rng: StdRng,
    _key: PhantomData<fn() -> K>,
}

impl<K> UniformKey<K> {
    /// Create a generator seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a generator with a fixed seed (reproducible key sequence)
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            _key: PhantomData,
        }
    }
}

impl<K> Default for UniformKey<K> {
    fn default() -> Self {
        Self::new()
    }
}

// Clones get a fresh engine seeded from OS entropy.
impl<K> Clone for UniformKey<K> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for UniformKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniformKey")
            .field("key", &std::any::type_name::<K>())
            .finish_non_exhaustive()
    }
}

impl<K> KeyGenerator<K> for UniformKey<K>
where
    Standard: Distribution<K>,
{
    fn generate(&mut self) -> K {
        self.rng.gen()
    }
}
