// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! A user lookup repository with cache, network, and local tiers.
//!
//! The first `Standard` fetch misses the cache, hits the simulated remote
//! directory, and backfills the cache; the second is answered from the
//! cache immediately. A `NetworkReplaceCache` fetch then forces a refresh
//! without consulting the cache.

use std::time::Duration;

use futures::StreamExt;
use tick::Clock;
use tierfall::{
    DataProvider, DataSource, Error, MemoryProvider, Repository, Strategy, WriteBack,
};

#[derive(Clone, Debug)]
struct User {
    id: u32,
    name: String,
}

/// Simulated remote origin with some latency.
struct RemoteDirectory {
    clock: Clock,
}

impl RemoteDirectory {
    async fn lookup(&self, id: u32) -> User {
        self.clock.delay(Duration::from_millis(300)).await;
        User {
            id,
            name: format!("user-{id}"),
        }
    }
}

/// One tier of the user repository.
enum UserStore {
    Cache(MemoryProvider<u32, User>),
    Directory(RemoteDirectory),
    Local,
}

impl DataProvider<u32, User> for UserStore {
    async fn retrieve(&self, key: &u32, lifetime: Duration) -> Result<Option<User>, Error> {
        match self {
            Self::Cache(provider) => provider.retrieve(key, lifetime).await,
            Self::Directory(directory) => Ok(Some(directory.lookup(*key).await)),
            Self::Local => Err(Error::from_message("local storage unavailable")),
        }
    }
}

impl WriteBack<u32, User> for UserStore {
    async fn write_back(&self, key: &u32, value: &User) -> Result<(), Error> {
        match self {
            Self::Cache(provider) => provider.write_back(key, value).await,
            Self::Directory(_) | Self::Local => Ok(()),
        }
    }
}

async fn get_user(repository: &Repository<UserStore>, strategy: &Strategy, id: u32) {
    let results: Vec<_> = repository
        .fetch(strategy, &id, Duration::from_secs(60))
        .collect()
        .await;

    for result in results {
        match result {
            Ok(user) => println!("  user {}: {}", user.id, user.name),
            Err(error) => println!("  lookup failed: {error}"),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let clock = Clock::new_tokio();

    let mut repository = Repository::new();
    repository.set_provider(
        DataSource::Cache,
        UserStore::Cache(MemoryProvider::new(clock.clone())),
    );
    repository.set_provider(
        DataSource::Network,
        UserStore::Directory(RemoteDirectory { clock }),
    );
    repository.set_provider(DataSource::Local, UserStore::Local);

    println!("first Standard fetch (network, then backfill):");
    get_user(&repository, &Strategy::STANDARD, 1).await;

    println!("second Standard fetch (cache hit):");
    get_user(&repository, &Strategy::STANDARD, 1).await;

    println!("forced refresh (cache ignored, then overwritten):");
    get_user(&repository, &Strategy::NETWORK_REPLACE_CACHE, 1).await;

    println!("Local fetch (provider fails, chain exhausted):");
    get_user(&repository, &Strategy::LOCAL, 1).await;
}
