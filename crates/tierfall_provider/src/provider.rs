// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! The capability traits all data providers are built from.
//!
//! [`DataProvider`] is the required read capability: given a key and a
//! caller-supplied cache lifetime hint, produce a response or report a miss.
//! [`WriteBack`] is the optional write capability used for backfill; its
//! default body is a no-op, so a provider that is not a cache tier declares
//! the capability with an empty `impl` block and backfill attempts against
//! it succeed without doing anything.

use std::time::Duration;

use crate::Error;

/// Required read capability of a provider tier.
///
/// The `lifetime` argument is a hint from the caller describing how stale a
/// cached response may be before the provider should treat it as absent.
/// Providers that do not cache (a network client, say) are free to ignore it.
///
/// Returning `Ok(None)` means "no data here" and is a miss, not a failure;
/// the distinction only matters for diagnostics.
#[cfg_attr(
    any(test, feature = "dynamic-provider"),
    dynosaur::dynosaur(pub(crate) DynDataProvider = dyn(box) DataProvider, bridge(none))
)]
pub trait DataProvider<K, R>: Send + Sync {
    /// Retrieves the response for `key`, honoring the cache lifetime hint.
    fn retrieve(&self, key: &K, lifetime: Duration) -> impl Future<Output = Result<Option<R>, Error>> + Send;
}

/// Optional write-back capability of a provider tier.
///
/// The retrieval engine invokes `write_back` on earlier cache tiers after a
/// later tier produced a response. Providers with nothing to refresh keep the
/// default no-op body:
///
/// ```
/// use tierfall_provider::{DataProvider, Error, WriteBack};
/// use std::time::Duration;
///
/// struct Remote;
///
/// impl DataProvider<String, String> for Remote {
///     async fn retrieve(&self, _key: &String, _lifetime: Duration) -> Result<Option<String>, Error> {
///         Ok(Some("from the wire".to_string()))
///     }
/// }
///
/// // Not a cache: write-back stays a no-op.
/// impl WriteBack<String, String> for Remote {}
/// ```
pub trait WriteBack<K, R>: DataProvider<K, R> {
    /// Stores `value` for `key` so later retrievals can hit this tier.
    ///
    /// Failures here are the provider's own concern; the engine logs and
    /// swallows them rather than failing the retrieval chain.
    fn write_back(&self, key: &K, value: &R) -> impl Future<Output = Result<(), Error>> + Send {
        let _ = (key, value);
        std::future::ready(Ok(()))
    }
}
