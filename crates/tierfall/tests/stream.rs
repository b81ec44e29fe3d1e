// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! Integration tests for the async stream delivery model.

use std::collections::HashMap;
use std::time::Duration;

use futures::StreamExt;
use tierfall::{DataSource, Repository, Strategy};
use tierfall_provider::testing::{MockProvider, ProviderOp};

const LIFETIME: Duration = Duration::from_secs(300);

fn key() -> String {
    "user:1".to_string()
}

fn provider_with(value: &str) -> MockProvider<String, String> {
    MockProvider::with_data(HashMap::from([(key(), value.to_string())]))
}

#[tokio::test]
async fn fetch_emits_the_first_hit_and_stops() {
    let mut repository = Repository::new();
    repository.set_provider(DataSource::Cache, provider_with("cached"));
    repository.set_provider(DataSource::Network, provider_with("fresh"));

    let results: Vec<_> = repository
        .fetch(&Strategy::STANDARD, &key(), LIFETIME)
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_deref().ok(), Some("cached"));

    let network = repository.provider(DataSource::Network).unwrap();
    assert_eq!(network.retrieve_count(), 0);
}

#[tokio::test]
async fn fetch_backfills_the_cache_on_a_network_hit() {
    let mut repository = Repository::new();
    repository.set_provider(DataSource::Cache, MockProvider::new());
    repository.set_provider(DataSource::Network, provider_with("fresh"));

    let results: Vec<_> = repository
        .fetch(&Strategy::STANDARD, &key(), LIFETIME)
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_deref().ok(), Some("fresh"));

    let cache = repository.provider(DataSource::Cache).unwrap();
    assert!(cache.contains_key(&key()));
    assert_eq!(
        cache.operations(),
        vec![
            ProviderOp::Retrieve(key()),
            ProviderOp::WriteBack {
                key: key(),
                value: "fresh".to_string(),
            },
        ],
    );
}

#[tokio::test]
async fn network_replace_cache_never_reads_the_cache() {
    let mut repository = Repository::new();
    repository.set_provider(DataSource::Cache, provider_with("stale"));
    repository.set_provider(DataSource::Network, provider_with("fresh"));

    let results: Vec<_> = repository
        .fetch(&Strategy::NETWORK_REPLACE_CACHE, &key(), LIFETIME)
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_deref().ok(), Some("fresh"));

    let cache = repository.provider(DataSource::Cache).unwrap();
    assert_eq!(
        cache.operations(),
        vec![ProviderOp::WriteBack {
            key: key(),
            value: "fresh".to_string(),
        }],
    );
}

#[tokio::test]
async fn dropping_the_stream_cancels_remaining_entries() {
    let mut repository = Repository::new();
    repository.set_provider(DataSource::Cache, provider_with("cached"));
    repository.set_provider(DataSource::Network, provider_with("fresh"));

    let first: Vec<_> = repository
        .fetch(&Strategy::CACHE_THEN_NETWORK, &key(), LIFETIME)
        .take(1)
        .collect()
        .await;

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].as_deref().ok(), Some("cached"));

    // The walk was abandoned before reaching the network entry.
    let network = repository.provider(DataSource::Network).unwrap();
    assert_eq!(network.retrieve_count(), 0);
}

#[tokio::test]
async fn cache_then_network_emits_twice_over_the_stream() {
    let mut repository = Repository::new();
    repository.set_provider(DataSource::Cache, provider_with("cached"));
    repository.set_provider(DataSource::Network, provider_with("fresh"));

    let results: Vec<_> = repository
        .fetch(&Strategy::CACHE_THEN_NETWORK, &key(), LIFETIME)
        .collect()
        .await;

    let values: Vec<_> = results.iter().map(|r| r.as_deref().ok()).collect();
    assert_eq!(values, [Some("cached"), Some("fresh")]);
}

#[tokio::test]
async fn exhausted_chain_ends_in_a_single_error() {
    let mut repository: Repository<MockProvider<String, String>> = Repository::new();
    repository.set_provider(DataSource::Cache, MockProvider::new());
    repository.set_provider(DataSource::Network, MockProvider::new());

    let results: Vec<_> = repository
        .fetch(&Strategy::STANDARD, &key(), LIFETIME)
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    assert!(results[0].is_err());
}

#[tokio::test]
async fn failed_backfill_does_not_affect_the_emission() {
    let cache: MockProvider<String, String> = MockProvider::new();
    cache.fail_when(|op| matches!(op, ProviderOp::WriteBack { .. }));

    let mut repository = Repository::new();
    repository.set_provider(DataSource::Cache, cache);
    repository.set_provider(DataSource::Network, provider_with("fresh"));

    let results: Vec<_> = repository
        .fetch(&Strategy::STANDARD, &key(), LIFETIME)
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_deref().ok(), Some("fresh"));
}

#[tokio::test]
async fn retrieval_failure_falls_back_to_the_network() {
    let cache = provider_with("cached");
    cache.fail_when(|op| matches!(op, ProviderOp::Retrieve(_)));

    let mut repository = Repository::new();
    repository.set_provider(DataSource::Cache, cache);
    repository.set_provider(DataSource::Network, provider_with("fresh"));

    let results: Vec<_> = repository
        .fetch(&Strategy::STANDARD, &key(), LIFETIME)
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_deref().ok(), Some("fresh"));
}
