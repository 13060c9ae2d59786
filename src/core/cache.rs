// src/core/cache.rs

use std::sync::{Arc, Mutex, PoisonError};

/// A single-entry, write-once store for an initialization result.
///
/// The first successful initializer populates the slot, and from then on every
/// caller receives the same `Arc`, whatever arguments it would have initialized
/// with. A failing initializer leaves the slot empty, so the next call starts over.
///
/// The mutex is held for the whole initialization: concurrent first calls are
/// serialized and only one of them runs the initializer.
#[derive(Debug)]
pub struct InitCache<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> InitCache<T> {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached value, or runs `init` and caches its result on success.
    pub fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E> {
        // A panic inside a previous `init` cannot leave a half-written value, so
        // a poisoned lock is still safe to use.
        let mut guard = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(value) = &*guard {
            log::debug!("Initialization cache hit");
            return Ok(Arc::clone(value));
        }

        log::debug!("Initialization cache miss, running initializer");
        let value = Arc::new(init()?);
        *guard = Some(Arc::clone(&value));
        Ok(value)
    }

    /// Returns the cached value without initializing.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }

    pub fn is_populated(&self) -> bool {
        self.get().is_some()
    }
}

impl<T> Default for InitCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let cache = InitCache::new();
        let first = cache.get_or_try_init(|| Ok::<_, ()>(1)).unwrap();
        let second = cache.get_or_try_init(|| Ok::<_, ()>(2)).unwrap();

        assert_eq!(*second, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_failure_leaves_cache_empty() {
        let cache: InitCache<u32> = InitCache::new();
        let result = cache.get_or_try_init(|| Err("boom"));

        assert_eq!(result, Err("boom"));
        assert!(!cache.is_populated());

        let retried = cache.get_or_try_init(|| Ok::<_, &str>(7)).unwrap();
        assert_eq!(*retried, 7);
        assert!(cache.is_populated());
    }

    #[test]
    fn test_cached_value_skips_initializer() {
        let cache = InitCache::new();
        cache.get_or_try_init(|| Ok::<_, ()>("ready")).unwrap();

        let mut ran = false;
        let value = cache
            .get_or_try_init(|| {
                ran = true;
                Ok::<_, ()>("again")
            })
            .unwrap();
        assert!(!ran);
        assert_eq!(*value, "ready");
    }
}
