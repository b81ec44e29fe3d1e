// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! In-memory provider implementation using moka.
//!
//! This module provides a concurrent in-memory data provider backed by the
//! moka crate, with per-retrieval freshness enforced against a [`Clock`].

use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use moka::future::Cache;
use tick::Clock;
use tierfall_provider::{DataProvider, Error, WriteBack};

use crate::builder::MemoryProviderBuilder;

/// A stored value together with the instant it was written.
#[derive(Clone)]
struct Stamped<R> {
    value: R,
    stored_at: Instant,
}

/// An in-memory data provider backed by moka.
///
/// Values are stamped with the clock instant at which they were written.
/// A retrieval passes its own `lifetime`; any entry older than that
/// lifetime is treated as absent and evicted, so the same store can serve
/// callers with different freshness requirements.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tick::Clock;
/// use tierfall_memory::MemoryProvider;
/// use tierfall_provider::{DataProvider, WriteBack};
/// # futures::executor::block_on(async {
///
/// let provider = MemoryProvider::new(Clock::new_frozen());
///
/// provider.write_back(&"key".to_string(), &42).await.unwrap();
/// let value = provider.retrieve(&"key".to_string(), Duration::from_secs(60)).await.unwrap();
/// assert_eq!(value, Some(42));
/// # });
/// ```
#[derive(Clone)]
pub struct MemoryProvider<K, R>
where
    K: Hash + Eq + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    inner: Cache<K, Stamped<R>>,
    clock: Clock,
}

impl<K, R> fmt::Debug for MemoryProvider<K, R>
where
    K: Hash + Eq + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryProvider")
            .field("entry_count", &self.inner.entry_count())
            .finish_non_exhaustive()
    }
}

impl<K, R> MemoryProvider<K, R>
where
    K: Hash + Eq + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Creates a new unbounded in-memory provider.
    ///
    /// # Examples
    ///
    /// ```
    /// use tick::Clock;
    /// use tierfall_memory::MemoryProvider;
    ///
    /// let provider = MemoryProvider::<String, i32>::new(Clock::new_frozen());
    /// ```
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self::builder(clock).build()
    }

    /// Creates a new in-memory provider with a maximum capacity.
    ///
    /// Once the capacity is reached, entries are evicted using the
    /// `TinyLFU` policy (combination of LRU eviction and LFU admission).
    #[must_use]
    pub fn with_capacity(clock: Clock, max_capacity: u64) -> Self {
        Self::builder(clock).max_capacity(max_capacity).build()
    }

    /// Creates a new builder for configuring an in-memory provider.
    ///
    /// # Examples
    ///
    /// ```
    /// use tick::Clock;
    /// use tierfall_memory::MemoryProvider;
    ///
    /// let provider = MemoryProvider::<String, i32>::builder(Clock::new_frozen())
    ///     .max_capacity(1000)
    ///     .name("user-store")
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder(clock: Clock) -> MemoryProviderBuilder<K, R> {
        MemoryProviderBuilder::new(clock)
    }

    pub(crate) fn from_builder(builder: &MemoryProviderBuilder<K, R>) -> Self {
        let mut moka_builder = Cache::builder();

        if let Some(capacity) = builder.max_capacity {
            moka_builder = moka_builder.max_capacity(capacity);
        }

        if let Some(capacity) = builder.initial_capacity {
            moka_builder = moka_builder.initial_capacity(capacity);
        }

        if let Some(name) = builder.name.as_deref() {
            moka_builder = moka_builder.name(name);
        }

        Self {
            inner: moka_builder.build(),
            clock: builder.clock.clone(),
        }
    }

    /// Stores a value directly, stamped with the current instant.
    ///
    /// Equivalent to [`WriteBack::write_back`] but takes the value by
    /// ownership, which is convenient when seeding a store.
    pub async fn insert(&self, key: K, value: R) {
        let stamped = Stamped {
            value,
            stored_at: self.clock.instant(),
        };
        self.inner.insert(key, stamped).await;
    }

    /// Removes every entry from the provider.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Returns the approximate number of stored entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl<K, R> DataProvider<K, R> for MemoryProvider<K, R>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    async fn retrieve(&self, key: &K, lifetime: Duration) -> Result<Option<R>, Error> {
        let Some(stamped) = self.inner.get(key).await else {
            return Ok(None);
        };

        let age = self
            .clock
            .instant()
            .saturating_duration_since(stamped.stored_at);
        if age > lifetime {
            self.inner.invalidate(key).await;
            return Ok(None);
        }

        Ok(Some(stamped.value))
    }
}

impl<K, R> WriteBack<K, R> for MemoryProvider<K, R>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    async fn write_back(&self, key: &K, value: &R) -> Result<(), Error> {
        let stamped = Stamped {
            value: value.clone(),
            stored_at: self.clock.instant(),
        };
        self.inner.insert(key.clone(), stamped).await;
        Ok(())
    }
}
