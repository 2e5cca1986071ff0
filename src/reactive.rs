//! Explicit reactive primitives: generation-stamped inputs and lazily
//! recomputed, version-stamped caches.
//!
//! ```text
//!   Signal<T> ──generation──▶ Memo<K, T> ──version──▶ Memo<K2, U> ...
//!     (write bumps)            (read recomputes        (downstream keys on
//!                               when key moved)          upstream version)
//! ```
//!
//! Nothing is pushed: a write only moves a counter, and each reader decides
//! on access whether its cached value is still valid.

use std::sync::Arc;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Monotonic change counter of a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

// ---------------------------------------------------------------------------
// Signal – observable input value
// ---------------------------------------------------------------------------

/// A mutable input value that records every effective change.
#[derive(Debug, Clone)]
pub struct Signal<T> {
    value: T,
    generation: Generation,
}

impl<T: PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            generation: Generation::default(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Replace the value. Returns `true` (and bumps the generation) only if
    /// the new value differs from the current one.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.generation.bump();
        true
    }

    /// Mutate in place; the generation moves only if the value changed.
    pub fn update<F>(&mut self, f: F) -> bool
    where
        T: Clone,
        F: FnOnce(&mut T),
    {
        let mut next = self.value.clone();
        f(&mut next);
        self.set(next)
    }
}

// ---------------------------------------------------------------------------
// Memo – lazily recomputed cache
// ---------------------------------------------------------------------------

/// Cache validity of a [`Memo`] relative to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No value, or the value was computed for a different key.
    Stale,
    /// The cached value is valid for the key.
    Fresh,
}

/// A derived value cached against the key it was computed for.
///
/// The value is handed out as an `Arc` so that every reader within one
/// update cycle holds the same snapshot.
#[derive(Debug)]
pub struct Memo<K, T> {
    cached: Option<(K, Arc<T>)>,
    recompute_count: u64,
}

impl<K, T> Default for Memo<K, T> {
    fn default() -> Self {
        Self {
            cached: None,
            recompute_count: 0,
        }
    }
}

impl<K: PartialEq + Copy, T> Memo<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value for `key`, computing it only if the cache is stale.
    pub fn get<F>(&mut self, key: K, compute: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        if let Some((cached_key, value)) = &self.cached {
            if *cached_key == key {
                return Arc::clone(value);
            }
        }
        let value = Arc::new(compute());
        self.cached = Some((key, Arc::clone(&value)));
        self.recompute_count += 1;
        value
    }

    /// Cache status for `key` without computing anything.
    pub fn status(&self, key: K) -> CacheStatus {
        match &self.cached {
            Some((cached_key, _)) if *cached_key == key => CacheStatus::Fresh,
            _ => CacheStatus::Stale,
        }
    }

    /// How many times the value has been computed.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Identifies the cached value; changes on every recompute, so
    /// downstream memos key on it.
    pub fn version(&self) -> u64 {
        self.recompute_count
    }
}
