//! Bounds for cache keys and byte counters

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait for cache keys.
///
/// Keys are small handles returned by the cache, so they are `Copy`.
pub trait CacheKey: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> CacheKey for T {}

/// Unsigned integer type used to count cached bytes.
///
/// Arithmetic saturates: byte counters never wrap.
pub trait CacheSize: Copy + Ord + Default + Debug + Display + Send + Sync + 'static {
    /// Zero bytes
    const ZERO: Self;

    /// Default cache capacity (10 MB)
    const DEFAULT_CAPACITY: Self;

    /// Saturating addition
    fn saturating_add(self, rhs: Self) -> Self;

    /// Saturating subtraction
    fn saturating_sub(self, rhs: Self) -> Self;

    /// Convert an in-memory size, saturating at the type's maximum
    fn from_usize(n: usize) -> Self;

    /// Widen to `u64` for statistics
    fn as_u64(self) -> u64;
}

macro_rules! impl_cache_size {
    ($($t:ty),*) => {
        $(
            impl CacheSize for $t {
                const ZERO: Self = 0;
                const DEFAULT_CAPACITY: Self = 10_000_000;

                #[inline]
                fn saturating_add(self, rhs: Self) -> Self {
                    <$t>::saturating_add(self, rhs)
                }

                #[inline]
                fn saturating_sub(self, rhs: Self) -> Self {
                    <$t>::saturating_sub(self, rhs)
                }

                #[inline]
                fn from_usize(n: usize) -> Self {
                    <$t>::try_from(n).unwrap_or(<$t>::MAX)
                }

                #[inline]
                fn as_u64(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_cache_size!(u32, u64, usize);
