// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! Type-erased provider wrapper.

use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{DataProvider, Error, WriteBack, provider::DynDataProvider};

/// Extension trait for converting any [`DataProvider`] into a [`DynamicProvider`].
///
/// This trait is automatically implemented for all types that implement `DataProvider`.
///
/// # Examples
///
/// ```
/// use tierfall_provider::{DataProvider, DynamicProvider, DynamicProviderExt};
///
/// fn erase<T>(provider: T) -> DynamicProvider<String, String>
/// where
///     T: DataProvider<String, String> + 'static,
/// {
///     provider.into_dynamic()
/// }
/// ```
pub trait DynamicProviderExt<K, R>: Sized {
    /// Converts this provider into a [`DynamicProvider`].
    fn into_dynamic(self) -> DynamicProvider<K, R>;
}

impl<K, R, T> DynamicProviderExt<K, R> for T
where
    T: DataProvider<K, R> + 'static,
{
    fn into_dynamic(self) -> DynamicProvider<K, R> {
        DynamicProvider::new(self)
    }
}

/// A clonable provider with the concrete storage type erased.
///
/// `DynamicProvider` wraps a trait object in an `Arc` so heterogeneous
/// provider registries can share one element type without naming every
/// backend. Erasure covers the read capability only: the [`WriteBack`]
/// impl is the default no-op, which makes dynamic providers suitable for
/// network or local tiers but not for cache tiers that must be refreshed
/// by backfill.
pub struct DynamicProvider<K, R>(Arc<DynDataProvider<'static, K, R>>);

impl<K, R> DynamicProvider<K, R> {
    /// Creates a new dynamic provider from any `DataProvider` implementation.
    pub(crate) fn new<T>(provider: T) -> Self
    where
        T: DataProvider<K, R> + Send + Sync + 'static,
    {
        Self(DynDataProvider::new_arc(provider))
    }
}

impl<K, R> Debug for DynamicProvider<K, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicProvider").finish()
    }
}

impl<K, R> Clone for DynamicProvider<K, R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<K, R> DataProvider<K, R> for DynamicProvider<K, R>
where
    K: Sync,
    R: Send,
{
    async fn retrieve(&self, key: &K, lifetime: Duration) -> Result<Option<R>, Error> {
        self.0.retrieve(key, lifetime).await
    }
}

/// Write-back is intentionally the default no-op; see the type docs.
impl<K, R> WriteBack<K, R> for DynamicProvider<K, R>
where
    K: Sync,
    R: Send,
{
}
