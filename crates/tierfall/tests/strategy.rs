// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! Integration tests for the preset strategies.

use tierfall::{DataSource, Strategy, StrategyEntry};

fn sources(strategy: &Strategy) -> Vec<DataSource> {
    strategy.entries().iter().map(StrategyEntry::source).collect()
}

#[test]
fn standard_tries_cache_then_network_once() {
    let strategy = &Strategy::STANDARD;
    assert!(!strategy.is_multi_emission());
    assert_eq!(sources(strategy), [DataSource::Cache, DataSource::Network]);
    assert!(strategy.entries().iter().all(|e| !e.is_ignored_on_retrieval()));
}

#[test]
fn cache_only_has_a_single_cache_entry() {
    let strategy = &Strategy::CACHE_ONLY;
    assert!(!strategy.is_multi_emission());
    assert_eq!(sources(strategy), [DataSource::Cache]);
    assert!(!strategy.entries()[0].is_ignored_on_retrieval());
}

#[test]
fn network_only_has_a_single_network_entry() {
    let strategy = &Strategy::NETWORK_ONLY;
    assert!(!strategy.is_multi_emission());
    assert_eq!(sources(strategy), [DataSource::Network]);
    assert!(!strategy.entries()[0].is_ignored_on_retrieval());
}

#[test]
fn cache_then_network_is_multi_emission() {
    let strategy = &Strategy::CACHE_THEN_NETWORK;
    assert!(strategy.is_multi_emission());
    assert_eq!(sources(strategy), [DataSource::Cache, DataSource::Network]);
    assert!(strategy.entries().iter().all(|e| !e.is_ignored_on_retrieval()));
}

#[test]
fn network_replace_cache_ignores_the_cache_on_retrieval() {
    let strategy = &Strategy::NETWORK_REPLACE_CACHE;
    assert!(!strategy.is_multi_emission());
    assert_eq!(sources(strategy), [DataSource::Cache, DataSource::Network]);
    assert!(strategy.entries()[0].is_ignored_on_retrieval());
    assert!(!strategy.entries()[1].is_ignored_on_retrieval());
}

#[test]
fn local_has_a_single_local_entry() {
    let strategy = &Strategy::LOCAL;
    assert!(!strategy.is_multi_emission());
    assert_eq!(sources(strategy), [DataSource::Local]);
    assert!(!strategy.entries()[0].is_ignored_on_retrieval());
}
