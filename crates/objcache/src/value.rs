//! Type-erased cache payloads

use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

use crate::error::{CacheError, Result};

/// Owning, type-erased value for heterogeneous caches.
///
/// Stores any `Send + Sync + 'static` value behind a shared pointer together
/// with the name of its concrete type. Clones are cheap and share the value.
/// Reading the value back requires naming its type; a wrong guess fails with
/// [`CacheError::TypeMismatch`].
#[derive(Clone)]
pub struct AnyValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl AnyValue {
    /// Erase the type of `value`
    pub fn new<V: Any + Send + Sync>(value: V) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: any::type_name::<V>(),
        }
    }

    /// Name of the stored type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the stored value is a `V`
    pub fn is<V: Any>(&self) -> bool {
        self.inner.is::<V>()
    }

    /// Borrow the stored value as a `V`
    pub fn downcast_ref<V: Any>(&self) -> Result<&V> {
        self.inner
            .downcast_ref::<V>()
            .ok_or_else(|| self.mismatch::<V>())
    }

    /// Get a shared pointer to the stored value as a `V`
    pub fn downcast<V: Any + Send + Sync>(&self) -> Result<Arc<V>> {
        Arc::clone(&self.inner)
            .downcast::<V>()
            .map_err(|_| self.mismatch::<V>())
    }

    fn mismatch<V>(&self) -> CacheError {
        CacheError::TypeMismatch {
            expected: any::type_name::<V>(),
            found: self.type_name,
        }
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}
