//! Object pooling for the streaming decode path.
//!
//! A [`Pool`] hands out [`Pooled`] guards. Dropping a guard resets the
//! instance and returns it to the free list, so a later `acquire()` gets
//! an instance indistinguishable from `T::default()` that still owns the
//! string and vector buffers of its previous life.
//!
//! Reuse reaches as deep as the zero state allows. Fields that are always
//! present, including nested records, are reset in place and keep their
//! buffers. Optional values and array elements are dropped, since their
//! zero state is absence; only the array's own allocation survives.
//!
//! # Thread Safety
//!
//! The free list is the only shared state and is guarded by a mutex.
//! Instances themselves are owned exclusively by whoever holds the guard.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

use crate::config::CodecConfig;

/// Restores a value to its zero state.
///
/// Implementations must be exhaustive: every field returns to the value
/// `Default::default()` would produce. Heap buffers may be kept.
pub trait Reset {
    /// Resets `self` in place.
    fn reset(&mut self);
}

macro_rules! reset_to_default {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reset for $ty {
                #[inline]
                fn reset(&mut self) {
                    *self = <$ty>::default();
                }
            }
        )*
    };
}

reset_to_default!(bool, i32, i64, u32, u64, f64);

impl Reset for String {
    fn reset(&mut self) {
        self.clear();
    }
}

impl<T> Reset for Vec<T> {
    fn reset(&mut self) {
        self.clear();
    }
}

impl<T> Reset for Option<T> {
    fn reset(&mut self) {
        *self = None;
    }
}

impl<K, V> Reset for BTreeMap<K, V> {
    fn reset(&mut self) {
        self.clear();
    }
}

impl Reset for serde_json::Value {
    fn reset(&mut self) {
        *self = serde_json::Value::Null;
    }
}

/// A bounded free list of reusable instances.
pub struct Pool<T> {
    free: Mutex<Vec<T>>,
    capacity: usize,
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("idle", &self.idle())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T: Reset + Default> Default for Pool<T> {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_POOL_CAPACITY)
    }
}

impl<T> Pool<T> {
    /// Returns the number of idle instances.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.free.lock().map(|free| free.len()).unwrap_or(0)
    }

    /// Returns the maximum number of idle instances retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Reset + Default> Pool<T> {
    /// Creates an empty pool retaining at most `capacity` idle instances.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// Creates a pool sized from configuration.
    #[must_use]
    pub fn with_config(config: &CodecConfig) -> Self {
        Self::new(config.pool_capacity)
    }

    /// Takes an instance from the free list, or allocates a fresh one.
    pub fn acquire(&self) -> Pooled<'_, T> {
        let recycled = self.free.lock().ok().and_then(|mut free| free.pop());
        Pooled {
            pool: self,
            item: Some(recycled.unwrap_or_default()),
        }
    }

    /// Resets `item` and returns it to the free list.
    ///
    /// The instance is dropped instead when the pool is full or its lock
    /// is poisoned.
    pub fn release(&self, mut item: T) {
        item.reset();
        let Ok(mut free) = self.free.lock() else {
            return;
        };
        if free.len() < self.capacity {
            free.push(item);
        } else {
            crate::log_pool!(
                "pool full ({} idle), dropping {}",
                free.len(),
                std::any::type_name::<T>()
            );
        }
    }

    /// Drops every idle instance.
    pub fn clear(&self) {
        if let Ok(mut free) = self.free.lock() {
            free.clear();
        }
    }
}

/// An instance borrowed from a [`Pool`].
///
/// Returned to the pool on drop.
pub struct Pooled<'a, T: Reset + Default> {
    pool: &'a Pool<T>,
    item: Option<T>,
}

impl<T: Reset + Default> Pooled<'_, T> {
    /// Detaches the instance; it will not return to the pool.
    #[must_use]
    pub fn into_inner(mut self) -> T {
        self.item.take().unwrap_or_default()
    }
}

impl<T: Reset + Default> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Only `into_inner` and `drop` take the item, and both consume the guard.
        match &self.item {
            Some(item) => item,
            None => unreachable!("pooled item accessed after release"),
        }
    }
}

impl<T: Reset + Default> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.item {
            Some(item) => item,
            None => unreachable!("pooled item accessed after release"),
        }
    }
}

impl<T: Reset + Default + fmt::Debug> fmt::Debug for Pooled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pooled").field(&self.item).finish()
    }
}

impl<T: Reset + Default> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.pool.release(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Scratch {
        name: String,
        tags: Vec<String>,
        count: u32,
        label: Option<String>,
    }

    impl Reset for Scratch {
        fn reset(&mut self) {
            self.name.reset();
            self.tags.reset();
            self.count.reset();
            self.label.reset();
        }
    }

    #[test]
    fn acquire_from_empty_pool_is_default() {
        let pool: Pool<Scratch> = Pool::new(2);
        let item = pool.acquire();
        assert_eq!(*item, Scratch::default());
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn release_resets_and_keeps_buffers() {
        let pool: Pool<Scratch> = Pool::new(2);
        {
            let mut item = pool.acquire();
            item.name.push_str("a fairly long document name");
            item.tags.push("x".into());
            item.count = 7;
            item.label = Some("l".into());
        }
        assert_eq!(pool.idle(), 1);

        let item = pool.acquire();
        assert_eq!(*item, Scratch::default());
        assert!(item.name.capacity() >= "a fairly long document name".len());
        assert!(item.tags.capacity() >= 1);
    }

    #[test]
    fn full_pool_drops_extra_instances() {
        let pool: Pool<Scratch> = Pool::new(1);
        let a = pool.acquire();
        let b = pool.acquire();
        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn into_inner_detaches() {
        let pool: Pool<Scratch> = Pool::new(4);
        let mut item = pool.acquire();
        item.count = 3;
        let owned = item.into_inner();
        assert_eq!(owned.count, 3);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn explicit_release_resets() {
        let pool: Pool<Scratch> = Pool::new(4);
        pool.release(Scratch {
            count: 9,
            ..Scratch::default()
        });
        assert_eq!(*pool.acquire(), Scratch::default());
    }

    #[test]
    fn clear_empties_free_list() {
        let pool: Pool<Scratch> = Pool::new(4);
        drop(pool.acquire());
        assert_eq!(pool.idle(), 1);
        pool.clear();
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn concurrent_acquire_release() {
        let pool: Pool<Scratch> = Pool::new(8);
        std::thread::scope(|scope| {
            for worker in 0..8u32 {
                let pool = &pool;
                scope.spawn(move || {
                    for round in 0..200u32 {
                        let mut item = pool.acquire();
                        assert_eq!(*item, Scratch::default());
                        item.count = worker * 1000 + round;
                        item.name.push_str("busy");
                    }
                });
            }
        });
        assert!(pool.idle() <= pool.capacity());
        assert_eq!(*pool.acquire(), Scratch::default());
    }

    #[test]
    fn std_resets() {
        let mut v = serde_json::json!({"a": 1});
        v.reset();
        assert!(v.is_null());

        let mut map = BTreeMap::from([(1, 2)]);
        map.reset();
        assert!(map.is_empty());

        let mut f = 2.5f64;
        f.reset();
        assert_eq!(f, 0.0);
    }
}
