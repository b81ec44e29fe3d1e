// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

#![cfg_attr(docsrs, feature(doc_cfg))]

//! Strategy-driven data retrieval with fallback and cache backfill.
//!
//! This crate provides a small engine for answering one question: given
//! several places a value might live, in what order should they be asked,
//! and what should happen to the answer? A [`Strategy`] encodes the order,
//! a [`Repository`] holds the providers, and one execution walks the plan
//! lazily:
//! - Entries are consulted left to right; a miss falls through to the next.
//! - A hit is written back into every cache entry earlier in the plan,
//!   including entries that were skipped on the forward pass.
//! - Multi-emission strategies keep going after a hit and can yield
//!   several responses; single-emission strategies stop at the first.
//! - If nothing answers, the sequence ends in a single terminal error.
//!
//! Results are delivered either as an async [`Stream`][futures::Stream] or
//! as a blocking [`Iterator`]; both run the identical walk.
//!
//! # Examples
//!
//! ## Trait-based providers
//!
//! ```
//! use std::time::Duration;
//! use futures::StreamExt;
//! use tick::Clock;
//! use tierfall::{DataSource, MemoryProvider, Repository, Strategy};
//!
//! # futures::executor::block_on(async {
//! let mut repository = Repository::new();
//! repository.set_provider(
//!     DataSource::Cache,
//!     MemoryProvider::new(Clock::new_frozen()),
//! );
//!
//! let cache = repository.provider(DataSource::Cache).unwrap();
//! cache.insert("user:1".to_string(), "Ada".to_string()).await;
//!
//! let results: Vec<_> = repository
//!     .fetch(&Strategy::CACHE_ONLY, &"user:1".to_string(), Duration::from_secs(60))
//!     .collect()
//!     .await;
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].as_deref().ok(), Some("Ada"));
//! # });
//! ```
//!
//! ## Callback-based execution
//!
//! The engine itself is agnostic about where data comes from; the
//! callback form of [`Repository::execute`] works with any provider
//! representation.
//!
//! ```
//! use futures::FutureExt;
//! use tierfall::{DataSource, Repository, Strategy};
//!
//! let mut repository = Repository::new();
//! repository.set_provider(DataSource::Local, "disk");
//!
//! let mut emissions = repository.execute_blocking(
//!     &Strategy::LOCAL,
//!     |name: &&str| {
//!         let name = *name;
//!         async move { Ok(Some(format!("read from {name}"))) }.boxed()
//!     },
//!     |_, _| async { Ok(()) }.boxed(),
//! );
//! assert_eq!(
//!     emissions.next().unwrap().ok().as_deref(),
//!     Some("read from disk"),
//! );
//! assert!(emissions.next().is_none());
//! ```

mod emissions;
mod repository;
mod source;
mod strategy;
mod walk;

#[doc(inline)]
pub use emissions::Emissions;
#[doc(inline)]
pub use repository::Repository;
#[doc(inline)]
pub use source::DataSource;
#[doc(inline)]
pub use strategy::{Strategy, StrategyEntry};

#[cfg(feature = "memory")]
#[doc(inline)]
pub use tierfall_memory::{MemoryProvider, MemoryProviderBuilder};
#[doc(inline)]
pub use tierfall_provider::{DataProvider, Error, Result, WriteBack};

#[cfg(feature = "dynamic-provider")]
#[doc(inline)]
pub use tierfall_provider::{DynamicProvider, DynamicProviderExt};

#[cfg(any(feature = "test-util", test))]
#[doc(inline)]
pub use tierfall_provider::testing::{MockProvider, ProviderOp};
