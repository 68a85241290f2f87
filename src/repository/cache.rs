//! In-memory response cache for the remote catalog.
//!
//! Products-family entries are keyed together with an epoch. A successful
//! mutation bumps the epoch and drops every entry, so a load that started
//! before the mutation stores its result under a key nobody asks for again.
//!
//! Alongside the expiring entries the cache keeps the last page delivered
//! for every listing key. That slot survives invalidation and is what the
//! views fall back to when a refetch fails.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use moka::future::Cache;
use moka::sync::Cache as SyncCache;

use crate::domain::product::{Product, ProductPage};
use crate::domain::types::ProductId;
use crate::repository::ProductListQuery;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Freshness window of a single product.
pub const DETAIL_TTL: Duration = Duration::from_secs(5 * 60);

type Epoch = u64;

#[derive(Clone)]
pub struct ProductCache {
    listings: Cache<(Epoch, ProductListQuery), ProductPage>,
    details: Cache<(Epoch, ProductId), Product>,
    categories: Cache<(), Vec<String>>,
    previous: SyncCache<ProductListQuery, (u64, ProductPage)>,
    previous_lock: Arc<Mutex<()>>,
    epoch: Arc<AtomicU64>,
    sequence: Arc<AtomicU64>,
}

impl ProductCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            listings: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
            details: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(DETAIL_TTL)
                .build(),
            categories: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            previous: SyncCache::builder().max_capacity(capacity).build(),
            previous_lock: Arc::new(Mutex::new(())),
            epoch: Arc::new(AtomicU64::new(0)),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Next request generation.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns the cached page for `query` or runs `load`. Concurrent calls
    /// for the same key share a single load.
    pub async fn listing<F>(&self, query: &ProductListQuery, load: F) -> RepositoryResult<ProductPage>
    where
        F: Future<Output = RepositoryResult<ProductPage>>,
    {
        let sequence = self.next_sequence();
        let key = (self.epoch(), query.clone());

        let page = self
            .listings
            .try_get_with(key, load)
            .await
            .map_err(unshare)?;

        self.remember(query, sequence, &page);
        Ok(page)
    }

    /// Stores `page` as the previous data of `query` unless a newer
    /// generation already did.
    pub fn remember(&self, query: &ProductListQuery, sequence: u64, page: &ProductPage) -> bool {
        let _guard = self
            .previous_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let is_newer = self
            .previous
            .get(query)
            .is_none_or(|(stored, _)| stored < sequence);

        if is_newer {
            self.previous.insert(query.clone(), (sequence, page.clone()));
        }
        is_newer
    }

    pub fn previous(&self, query: &ProductListQuery) -> Option<ProductPage> {
        self.previous.get(query).map(|(_, page)| page)
    }

    pub async fn detail<F>(&self, id: ProductId, load: F) -> RepositoryResult<Product>
    where
        F: Future<Output = RepositoryResult<Product>>,
    {
        self.details
            .try_get_with((self.epoch(), id), load)
            .await
            .map_err(unshare)
    }

    pub async fn categories<F>(&self, load: F) -> RepositoryResult<Vec<String>>
    where
        F: Future<Output = RepositoryResult<Vec<String>>>,
    {
        self.categories
            .try_get_with((), load)
            .await
            .map_err(unshare)
    }

    /// Drops every cached product listing and detail.
    pub fn invalidate_products(&self) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.listings.invalidate_all();
        self.details.invalidate_all();
        log::debug!("Product cache invalidated, epoch {epoch}");
    }
}

fn unshare(err: Arc<RepositoryError>) -> RepositoryError {
    Arc::unwrap_or_clone(err)
}
