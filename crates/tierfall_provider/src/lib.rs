// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

#![cfg_attr(docsrs, feature(doc_cfg))]

//! Core provider abstractions for the tierfall retrieval engine.
//!
//! This crate defines the two capability traits every provider tier is built
//! from — [`DataProvider`], the required read capability, and [`WriteBack`],
//! the optional write capability used for cache backfill — along with the
//! [`Error`] type shared by providers and the engine.
//!
//! # Implementing a provider
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//! use std::time::Duration;
//! use tierfall_provider::{DataProvider, Error, WriteBack};
//!
//! struct SimpleStore(RwLock<HashMap<String, String>>);
//!
//! impl DataProvider<String, String> for SimpleStore {
//!     async fn retrieve(&self, key: &String, _lifetime: Duration) -> Result<Option<String>, Error> {
//!         Ok(self.0.read().unwrap().get(key).cloned())
//!     }
//! }
//!
//! impl WriteBack<String, String> for SimpleStore {
//!     async fn write_back(&self, key: &String, value: &String) -> Result<(), Error> {
//!         self.0.write().unwrap().insert(key.clone(), value.clone());
//!         Ok(())
//!     }
//! }
//! ```
//!
//! A provider that is not a cache keeps [`WriteBack`]'s default no-op body;
//! see the trait docs.
//!
//! # Dynamic dispatch
//!
//! Enable the `dynamic-provider` feature for [`DynamicProvider`], which wraps
//! any `DataProvider` in a type-erased container for heterogeneous
//! registries.

pub mod error;
pub(crate) mod provider;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[cfg(any(test, feature = "dynamic-provider"))]
mod dynamic;

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use provider::{DataProvider, WriteBack};

#[cfg(any(test, feature = "dynamic-provider"))]
#[doc(inline)]
pub use dynamic::{DynamicProvider, DynamicProviderExt};
