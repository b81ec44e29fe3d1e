// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

#![cfg_attr(docsrs, feature(doc_cfg))]

//! Concurrent in-memory provider backed by moka.
//!
//! This crate provides [`MemoryProvider`], an in-memory implementation of the
//! `tierfall_provider` capability traits using moka's `TinyLFU` eviction
//! algorithm. Use [`MemoryProviderBuilder`] to configure capacity and naming
//! without exposing moka types directly.
//!
//! Freshness is decided per retrieval rather than per store: each value is
//! stamped with the [`tick::Clock`] instant at which it was written, and a
//! retrieval only returns values younger than the lifetime it asks for.
//! Injecting the clock keeps expiry fully deterministic in tests.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use tick::Clock;
//! use tierfall_memory::MemoryProvider;
//! use tierfall_provider::DataProvider;
//!
//! # futures::executor::block_on(async {
//! let provider = MemoryProvider::builder(Clock::new_frozen())
//!     .max_capacity(1000)
//!     .build();
//!
//! provider.insert("key".to_string(), 42).await;
//! let value = provider
//!     .retrieve(&"key".to_string(), Duration::from_secs(300))
//!     .await
//!     .unwrap();
//! assert_eq!(value, Some(42));
//! # });
//! ```

pub mod builder;
pub mod provider;

#[doc(inline)]
pub use builder::MemoryProviderBuilder;
#[doc(inline)]
pub use provider::MemoryProvider;
