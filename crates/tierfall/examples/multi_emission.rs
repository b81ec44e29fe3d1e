// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! Multi-emission delivery over the blocking iterator.
//!
//! `CacheThenNetwork` yields the cached value right away, then the fresher
//! network value once it arrives, so a caller can render stale data first
//! and update in place.

use futures::FutureExt;
use tierfall::{DataSource, Repository, Strategy};

fn main() {
    let mut repository = Repository::new();
    repository.set_provider(DataSource::Cache, "yesterday's headline");
    repository.set_provider(DataSource::Network, "today's headline");

    let emissions = repository.execute_blocking(
        &Strategy::CACHE_THEN_NETWORK,
        |content: &&str| {
            let content = (*content).to_string();
            async move { Ok(Some(content)) }.boxed()
        },
        |_, refreshed: String| {
            println!("(cache refreshed with {refreshed:?})");
            async { Ok(()) }.boxed()
        },
    );

    for (index, result) in emissions.enumerate() {
        match result {
            Ok(headline) => println!("emission {index}: {headline}"),
            Err(error) => println!("emission {index} failed: {error}"),
        }
    }
}
