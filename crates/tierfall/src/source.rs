// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! Data source tags.

use std::fmt;

/// Identifies a class of data provider within a [`Strategy`][crate::Strategy].
///
/// A strategy entry names the source class it consults; the repository maps
/// each tag to a registered provider at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// On-device storage such as a file or an embedded database.
    Local,

    /// A remote origin reached over the network.
    Network,

    /// A fast intermediate store that can be refilled from other sources.
    Cache,
}

impl DataSource {
    /// Whether responses from other sources should be written back into
    /// providers registered under this tag.
    ///
    /// Only [`DataSource::Cache`] participates in backfill.
    ///
    /// # Examples
    ///
    /// ```
    /// use tierfall::DataSource;
    ///
    /// assert!(DataSource::Cache.is_cache());
    /// assert!(!DataSource::Local.is_cache());
    /// assert!(!DataSource::Network.is_cache());
    /// ```
    #[must_use]
    pub const fn is_cache(self) -> bool {
        matches!(self, Self::Cache)
    }

    /// Returns the tag as a static string, suitable for log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Network => "network",
            Self::Cache => "cache",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::DataSource;

    #[test]
    fn only_cache_is_a_backfill_target() {
        assert!(DataSource::Cache.is_cache());
        assert!(!DataSource::Local.is_cache());
        assert!(!DataSource::Network.is_cache());
    }

    #[test]
    fn display_matches_as_str() {
        for source in [DataSource::Local, DataSource::Network, DataSource::Cache] {
            assert_eq!(source.to_string(), source.as_str());
        }
    }
}
