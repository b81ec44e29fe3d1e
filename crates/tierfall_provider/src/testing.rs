// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! Mock provider for testing retrieval chains.
//!
//! This module provides [`MockProvider`], a configurable in-memory provider
//! that records every retrieval and write-back and supports failure injection
//! for exercising error paths.

use std::{collections::HashMap, hash::Hash, sync::Arc, time::Duration};

use parking_lot::Mutex;

use crate::{DataProvider, Error, WriteBack};

/// Recorded provider operation with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOp<K, R> {
    /// A retrieval was attempted for the given key.
    Retrieve(K),
    /// A write-back was performed with the given key and value.
    WriteBack {
        /// The key that was written.
        key: K,
        /// The value that was written back.
        value: R,
    },
}

type FailPredicate<K, R> = Box<dyn Fn(&ProviderOp<K, R>) -> bool + Send + Sync>;

/// A configurable mock provider for testing.
///
/// The provider stores values in memory, records all operations for later
/// verification, and can be told to fail operations on demand. A key that is
/// not present produces `Ok(None)` — the "empty result" miss case.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tierfall_provider::{DataProvider, WriteBack, testing::{MockProvider, ProviderOp}};
///
/// # futures::executor::block_on(async {
/// let provider = MockProvider::<String, i32>::new();
///
/// provider.write_back(&"key".to_string(), &42).await?;
/// let value = provider.retrieve(&"key".to_string(), Duration::from_secs(60)).await?;
/// assert_eq!(value, Some(42));
///
/// assert_eq!(provider.operations(), vec![
///     ProviderOp::WriteBack { key: "key".to_string(), value: 42 },
///     ProviderOp::Retrieve("key".to_string()),
/// ]);
/// # Ok::<(), tierfall_provider::Error>(())
/// # });
/// ```
///
/// # Failure injection
///
/// ```
/// use std::time::Duration;
/// use tierfall_provider::{DataProvider, testing::{MockProvider, ProviderOp}};
///
/// # futures::executor::block_on(async {
/// let provider: MockProvider<String, i32> = MockProvider::new();
///
/// // Fail every retrieval.
/// provider.fail_when(|op| matches!(op, ProviderOp::Retrieve(_)));
/// assert!(provider.retrieve(&"key".to_string(), Duration::ZERO).await.is_err());
///
/// // Fail only a specific key.
/// provider.fail_when(|op| matches!(op, ProviderOp::Retrieve(k) if k == "forbidden"));
/// assert!(provider.retrieve(&"forbidden".to_string(), Duration::ZERO).await.is_err());
/// assert!(provider.retrieve(&"allowed".to_string(), Duration::ZERO).await.is_ok());
/// # });
/// ```
pub struct MockProvider<K, R> {
    data: Arc<Mutex<HashMap<K, R>>>,
    operations: Arc<Mutex<Vec<ProviderOp<K, R>>>>,
    fail_when: Arc<Mutex<Option<FailPredicate<K, R>>>>,
}

impl<K, R> std::fmt::Debug for MockProvider<K, R>
where
    K: std::fmt::Debug,
    R: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("data", &self.data)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl<K, R> Clone for MockProvider<K, R> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
        }
    }
}

impl<K, R> Default for MockProvider<K, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, R> MockProvider<K, R> {
    /// Creates a new empty mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }
}

impl<K, R> MockProvider<K, R>
where
    K: Eq + Hash,
{
    /// Creates a mock provider with pre-populated data.
    #[must_use]
    pub fn with_data(data: HashMap<K, R>) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns true if the provider holds a value for the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.lock().contains_key(key)
    }
}

impl<K, R> MockProvider<K, R>
where
    K: Clone,
    R: Clone,
{
    /// Sets a predicate that determines which operations should fail.
    ///
    /// The predicate receives the operation and returns `true` if it should
    /// fail. Failing operations are still recorded.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&ProviderOp<K, R>) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<ProviderOp<K, R>> {
        self.operations.lock().clone()
    }

    /// Returns how many retrievals were attempted against this provider.
    #[must_use]
    pub fn retrieve_count(&self) -> usize {
        self.operations
            .lock()
            .iter()
            .filter(|op| matches!(op, ProviderOp::Retrieve(_)))
            .count()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    fn record(&self, op: ProviderOp<K, R>) {
        self.operations.lock().push(op);
    }

    fn should_fail(&self, op: &ProviderOp<K, R>) -> bool {
        self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(op))
    }
}

impl<K, R> DataProvider<K, R> for MockProvider<K, R>
where
    K: Clone + Eq + Hash + Send + Sync,
    R: Clone + Send + Sync,
{
    async fn retrieve(&self, key: &K, _lifetime: Duration) -> Result<Option<R>, Error> {
        let op = ProviderOp::Retrieve(key.clone());
        if self.should_fail(&op) {
            self.record(op);
            return Err(Error::from_message("mock: retrieve failed"));
        }
        self.record(op);
        Ok(self.data.lock().get(key).cloned())
    }
}

impl<K, R> WriteBack<K, R> for MockProvider<K, R>
where
    K: Clone + Eq + Hash + Send + Sync,
    R: Clone + Send + Sync,
{
    async fn write_back(&self, key: &K, value: &R) -> Result<(), Error> {
        let op = ProviderOp::WriteBack {
            key: key.clone(),
            value: value.clone(),
        };
        if self.should_fail(&op) {
            self.record(op);
            return Err(Error::from_message("mock: write_back failed"));
        }
        self.record(op);
        self.data.lock().insert(key.clone(), value.clone());
        Ok(())
    }
}
