// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! The repository: provider registry plus the retrieval engine.
//!
//! [`Repository`] maps [`DataSource`] tags to providers and executes a
//! [`Strategy`] against them. Execution is lazy: nothing is consulted until
//! the returned sequence is polled, and dropping the sequence abandons the
//! remaining entries without side effects beyond those already performed.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use futures::stream::Stream;
use tierfall_provider::{Error, WriteBack};

use crate::emissions::Emissions;
use crate::walk::{Step, Walk};
use crate::{DataSource, Strategy};

/// A registry of providers keyed by [`DataSource`], with strategy execution.
///
/// Registration requires `&mut self` while execution borrows `&self`, so the
/// registry cannot change underneath a running execution.
///
/// # Examples
///
/// ```
/// use futures::executor::block_on;
/// use futures::{FutureExt, StreamExt};
/// use tierfall::{DataSource, Repository, Strategy};
///
/// let mut repository = Repository::new();
/// repository.set_provider(DataSource::Network, "origin");
///
/// let results: Vec<_> = block_on(
///     repository
///         .execute(
///             &Strategy::NETWORK_ONLY,
///             |name: &&str| {
///                 let name = *name;
///                 async move { Ok(Some(format!("hello from {name}"))) }.boxed()
///             },
///             |_, _| async { Ok(()) }.boxed(),
///         )
///         .collect(),
/// );
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].as_deref().ok(), Some("hello from origin"));
/// ```
#[derive(Debug)]
pub struct Repository<P> {
    providers: HashMap<DataSource, P>,
}

impl<P> Default for Repository<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Repository<P> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Registers `provider` under `source`, replacing any previous one.
    pub fn set_provider(&mut self, source: DataSource, provider: P) -> Option<P> {
        self.providers.insert(source, provider)
    }

    /// Removes the provider registered under `source`, if any.
    pub fn remove_provider(&mut self, source: DataSource) -> Option<P> {
        self.providers.remove(&source)
    }

    /// Looks up the provider registered under `source`.
    #[must_use]
    pub fn provider(&self, source: DataSource) -> Option<&P> {
        self.providers.get(&source)
    }

    /// Executes `strategy` lazily, yielding responses as an async stream.
    ///
    /// `retrieve` is called for each non-ignored entry in plan order, with
    /// the provider registered under the entry's source. A miss, whether an
    /// absent provider, an error, or an empty response, falls through to
    /// the next entry. On a hit, `backfill` is called once per cache entry
    /// before the hit, nearest first, before the response is yielded.
    ///
    /// If no entry produces a response the stream yields a single terminal
    /// error; the stream is fused afterwards.
    pub fn execute<'a, R, Ret, Back>(
        &'a self,
        strategy: &Strategy,
        retrieve: Ret,
        backfill: Back,
    ) -> impl Stream<Item = Result<R, Error>> + 'a
    where
        R: Clone + 'a,
        Ret: FnMut(&'a P) -> BoxFuture<'a, Result<Option<R>, Error>> + 'a,
        Back: FnMut(&'a P, R) -> BoxFuture<'a, Result<(), Error>> + 'a,
    {
        let drive = Drive::new(self, strategy, retrieve, backfill);
        futures::stream::unfold(drive, |mut drive| async move {
            let item = drive.advance().await;
            item.map(|item| (item, drive))
        })
    }

    /// Executes `strategy` lazily as a blocking iterator.
    ///
    /// Semantics are identical to [`execute`][Self::execute]; each call to
    /// [`Iterator::next`] blocks the current thread until the engine reaches
    /// its next emission or terminal state.
    pub fn execute_blocking<'a, R, Ret, Back>(
        &'a self,
        strategy: &Strategy,
        retrieve: Ret,
        backfill: Back,
    ) -> Emissions<'a, P, R, Ret, Back>
    where
        R: Clone + 'a,
        Ret: FnMut(&'a P) -> BoxFuture<'a, Result<Option<R>, Error>> + 'a,
        Back: FnMut(&'a P, R) -> BoxFuture<'a, Result<(), Error>> + 'a,
    {
        Emissions::new(Drive::new(self, strategy, retrieve, backfill))
    }

    /// Executes `strategy` for a single key against providers implementing
    /// the capability traits.
    ///
    /// This wires [`DataProvider::retrieve`][tierfall_provider::DataProvider::retrieve]
    /// and [`WriteBack::write_back`] into [`execute`][Self::execute], so
    /// callers with trait-based providers do not have to write the callback
    /// plumbing themselves.
    pub fn fetch<'a, K, R>(
        &'a self,
        strategy: &Strategy,
        key: &'a K,
        lifetime: Duration,
    ) -> impl Stream<Item = Result<R, Error>> + 'a
    where
        P: WriteBack<K, R>,
        K: Sync + 'a,
        R: Clone + Send + Sync + 'a,
    {
        self.execute(
            strategy,
            move |provider: &'a P| provider.retrieve(key, lifetime).boxed(),
            move |provider: &'a P, value: R| {
                async move { provider.write_back(key, &value).await }.boxed()
            },
        )
    }

    /// Blocking counterpart of [`fetch`][Self::fetch].
    pub fn fetch_blocking<'a, K, R>(
        &'a self,
        strategy: &Strategy,
        key: &'a K,
        lifetime: Duration,
    ) -> impl Iterator<Item = Result<R, Error>> + 'a
    where
        P: WriteBack<K, R>,
        K: Sync + 'a,
        R: Clone + Send + Sync + 'a,
    {
        self.execute_blocking(
            strategy,
            move |provider: &'a P| provider.retrieve(key, lifetime).boxed(),
            move |provider: &'a P, value: R| {
                async move { provider.write_back(key, &value).await }.boxed()
            },
        )
    }
}

/// One in-flight execution: the walk plus the caller's callbacks.
///
/// Both delivery models drive this struct, one `advance` call per item.
pub(crate) struct Drive<'a, P, R, Ret, Back> {
    repository: &'a Repository<P>,
    walk: Walk,
    retrieve: Ret,
    backfill: Back,
    _response: PhantomData<fn() -> R>,
}

impl<'a, P, R, Ret, Back> Drive<'a, P, R, Ret, Back>
where
    R: Clone,
    Ret: FnMut(&'a P) -> BoxFuture<'a, Result<Option<R>, Error>>,
    Back: FnMut(&'a P, R) -> BoxFuture<'a, Result<(), Error>>,
{
    fn new(repository: &'a Repository<P>, strategy: &Strategy, retrieve: Ret, backfill: Back) -> Self {
        Self {
            repository,
            walk: Walk::new(strategy),
            retrieve,
            backfill,
            _response: PhantomData,
        }
    }

    /// Runs the walk to its next emission, terminal failure, or completion.
    pub(crate) async fn advance(&mut self) -> Option<Result<R, Error>> {
        loop {
            match self.walk.next_attempt() {
                Step::Complete => return None,
                Step::Exhausted => {
                    return Some(Err(Error::from_message(
                        "no data source produced a response",
                    )));
                }
                Step::Attempt { index, source } => {
                    let Some(provider) = self.repository.provider(source) else {
                        tracing::warn!(source = %source, "no provider registered, skipping entry");
                        continue;
                    };

                    match (self.retrieve)(provider).await {
                        Ok(Some(response)) => {
                            for target in self.walk.record_hit(index) {
                                self.backfill_into(target, response.clone()).await;
                            }
                            return Some(Ok(response));
                        }
                        Ok(None) => {
                            tracing::debug!(source = %source, "source returned no data");
                        }
                        Err(error) => {
                            tracing::warn!(source = %source, error = %error, "retrieval failed, falling back");
                        }
                    }
                }
            }
        }
    }

    /// Writes a response into one backfill target. Failures are logged and
    /// never affect the emission that triggered them.
    async fn backfill_into(&mut self, target: DataSource, response: R) {
        let Some(provider) = self.repository.provider(target) else {
            tracing::warn!(source = %target, "no provider registered, skipping backfill");
            return;
        };

        if let Err(error) = (self.backfill)(provider, response).await {
            tracing::warn!(source = %target, error = %error, "backfill failed");
        }
    }
}
