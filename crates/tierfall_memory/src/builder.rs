// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! Builder for configuring in-memory providers.
//!
//! This module provides a builder API for `MemoryProvider` that abstracts
//! the underlying moka configuration, providing a stable API surface
//! without exposing moka's types.

use std::hash::Hash;
use std::marker::PhantomData;

use tick::Clock;

use crate::provider::MemoryProvider;

/// Builder for configuring a `MemoryProvider`.
///
/// # Examples
///
/// ```
/// use tick::Clock;
/// use tierfall_memory::MemoryProvider;
///
/// let provider = MemoryProvider::<String, i32>::builder(Clock::new_frozen())
///     .max_capacity(1000)
///     .initial_capacity(100)
///     .name("user-store")
///     .build();
/// ```
#[derive(Debug)]
pub struct MemoryProviderBuilder<K, R> {
    pub(crate) clock: Clock,
    pub(crate) max_capacity: Option<u64>,
    pub(crate) initial_capacity: Option<usize>,
    pub(crate) name: Option<String>,
    _phantom: PhantomData<(K, R)>,
}

impl<K, R> MemoryProviderBuilder<K, R> {
    /// Creates a new builder with default settings.
    ///
    /// The default configuration creates an unbounded provider with the
    /// `TinyLFU` eviction policy. Freshness is not configured here; every
    /// retrieval carries its own lifetime.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            max_capacity: None,
            initial_capacity: None,
            name: None,
            _phantom: PhantomData,
        }
    }

    /// Sets the maximum capacity of the provider.
    ///
    /// Once the capacity is reached, entries will be evicted to make room
    /// for new entries using the `TinyLFU` eviction policy (combination of
    /// LRU eviction and LFU admission).
    ///
    /// If not set, the store is unbounded (limited only by available memory).
    #[must_use]
    pub fn max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Sets the initial capacity (pre-allocation hint) for the store.
    ///
    /// This can improve performance by avoiding reallocations during
    /// initial population. The store may still grow beyond this size.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Sets a name for the store.
    ///
    /// This name may appear in logs or debugging output from the
    /// underlying cache implementation.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds the configured `MemoryProvider`.
    #[must_use]
    pub fn build(self) -> MemoryProvider<K, R>
    where
        K: Hash + Eq + Send + Sync + 'static,
        R: Clone + Send + Sync + 'static,
    {
        MemoryProvider::from_builder(&self)
    }
}
