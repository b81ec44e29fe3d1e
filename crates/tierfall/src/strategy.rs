// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! Retrieval strategies.
//!
//! A [`Strategy`] is an ordered plan of [`StrategyEntry`] values. Entries are
//! tried left to right; order encodes precedence. When a hit occurs at
//! position `i`, every entry before `i` whose source is a cache becomes a
//! backfill target, including entries that were skipped on the forward pass.

use std::borrow::Cow;

use crate::DataSource;

/// One step of a [`Strategy`]: a source tag plus a flag controlling whether
/// the step participates in the forward retrieval pass.
///
/// An entry marked `ignored_on_retrieval` is never read from, but it still
/// counts as a backfill target when a later entry hits. This is how
/// [`Strategy::NETWORK_REPLACE_CACHE`] refreshes the cache without ever
/// consulting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyEntry {
    source: DataSource,
    ignored_on_retrieval: bool,
}

impl StrategyEntry {
    /// Creates an entry that is consulted during retrieval.
    #[must_use]
    pub const fn new(source: DataSource) -> Self {
        Self {
            source,
            ignored_on_retrieval: false,
        }
    }

    /// Creates an entry that is skipped during retrieval but remains a
    /// backfill target.
    #[must_use]
    pub const fn ignored(source: DataSource) -> Self {
        Self {
            source,
            ignored_on_retrieval: true,
        }
    }

    /// The source this entry consults.
    #[must_use]
    pub const fn source(&self) -> DataSource {
        self.source
    }

    /// Whether this entry is skipped during the forward retrieval pass.
    #[must_use]
    pub const fn is_ignored_on_retrieval(&self) -> bool {
        self.ignored_on_retrieval
    }
}

/// An ordered, immutable retrieval plan.
///
/// Strategies are cheap to clone; preset strategies borrow their entries
/// from static storage. With `multi_emission` disabled the walk stops at the
/// first hit; enabled, it keeps consulting later entries and can emit
/// several responses for one execution.
///
/// # Examples
///
/// ```
/// use tierfall::{DataSource, Strategy};
///
/// let strategy = Strategy::STANDARD;
/// let entries = strategy.entries();
/// assert_eq!(entries[0].source(), DataSource::Cache);
/// assert_eq!(entries[1].source(), DataSource::Network);
/// assert!(!Strategy::STANDARD.is_multi_emission());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    multi_emission: bool,
    entries: Cow<'static, [StrategyEntry]>,
}

impl Strategy {
    /// Cache first, then network. Stops at the first hit.
    pub const STANDARD: Self = Self::preset(
        false,
        &[
            StrategyEntry::new(DataSource::Cache),
            StrategyEntry::new(DataSource::Network),
        ],
    );

    /// Cache only; a cache miss is a failure.
    pub const CACHE_ONLY: Self = Self::preset(false, &[StrategyEntry::new(DataSource::Cache)]);

    /// Network only; the cache is neither read nor refreshed.
    pub const NETWORK_ONLY: Self = Self::preset(false, &[StrategyEntry::new(DataSource::Network)]);

    /// Cache first, then network, emitting both results when both hit.
    /// A network hit refreshes the cache.
    pub const CACHE_THEN_NETWORK: Self = Self::preset(
        true,
        &[
            StrategyEntry::new(DataSource::Cache),
            StrategyEntry::new(DataSource::Network),
        ],
    );

    /// Network read that overwrites the cache without consulting it.
    /// The cache entry is ignored on retrieval but remains a backfill
    /// target for the network hit.
    pub const NETWORK_REPLACE_CACHE: Self = Self::preset(
        false,
        &[
            StrategyEntry::ignored(DataSource::Cache),
            StrategyEntry::new(DataSource::Network),
        ],
    );

    /// Local storage only.
    pub const LOCAL: Self = Self::preset(false, &[StrategyEntry::new(DataSource::Local)]);

    const fn preset(multi_emission: bool, entries: &'static [StrategyEntry]) -> Self {
        Self {
            multi_emission,
            entries: Cow::Borrowed(entries),
        }
    }

    /// Creates a custom strategy from an ordered list of entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use tierfall::{DataSource, Strategy, StrategyEntry};
    ///
    /// let strategy = Strategy::new(
    ///     false,
    ///     vec![
    ///         StrategyEntry::new(DataSource::Local),
    ///         StrategyEntry::new(DataSource::Network),
    ///     ],
    /// );
    /// assert_eq!(strategy.entries().len(), 2);
    /// ```
    #[must_use]
    pub fn new(multi_emission: bool, entries: Vec<StrategyEntry>) -> Self {
        Self {
            multi_emission,
            entries: Cow::Owned(entries),
        }
    }

    /// Whether the walk keeps consulting later entries after a hit.
    #[must_use]
    pub const fn is_multi_emission(&self) -> bool {
        self.multi_emission
    }

    /// The ordered entries of this strategy.
    #[must_use]
    pub fn entries(&self) -> &[StrategyEntry] {
        &self.entries
    }
}
