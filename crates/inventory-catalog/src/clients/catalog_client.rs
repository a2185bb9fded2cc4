//! # Catalog Client
//!
//! The API the request layer talks to. It wraps a [`CatalogCache`] handle and turns "give me
//! the top products by X" into a snapshot read plus a ranking.
use crate::model::{ProductRecord, SortKey};
use crate::ranking::top_products;
use crate::{CatalogCache, CatalogSnapshot};
use snapshot_cache::CacheError;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, error, instrument};

/// Client for reading the product catalog.
#[derive(Clone)]
pub struct CatalogClient {
    inner: CatalogCache,
}

impl CatalogClient {
    pub fn new(inner: CatalogCache) -> Self {
        Self { inner }
    }

    /// The underlying cache handle, for state and statistics.
    pub fn cache(&self) -> &CatalogCache {
        &self.inner
    }

    /// The current catalog snapshot, loading it if needed.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, CacheError> {
        debug!("Sending request");
        self.inner.get_snapshot().await
    }

    /// Top products by `sort_key`.
    ///
    /// Always returns a well-formed list. If the catalog cannot be obtained the error is
    /// logged and the list is empty, which callers cannot tell apart from an empty catalog.
    pub async fn top_products(&self, sort_key: Option<&str>) -> Vec<ProductRecord> {
        self.top_products_at(Instant::now(), sort_key).await
    }

    #[instrument(skip(self))]
    pub async fn top_products_at(&self, now: Instant, sort_key: Option<&str>) -> Vec<ProductRecord> {
        let key = SortKey::parse(sort_key);
        match self.inner.get_snapshot_at(now).await {
            Ok(snapshot) => {
                let ranked = top_products(snapshot.items(), key);
                debug!(%key, catalog = snapshot.len(), returned = ranked.len(), "Ranked");
                ranked
            }
            Err(e) => {
                error!(%key, error = %e, "Catalog unavailable, returning no products");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadError;
    use rust_decimal::Decimal;
    use snapshot_cache::mock::{create_mock_cache, expect_populate};
    use snapshot_cache::Snapshot;
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(600);

    fn record(name: &str, price: i64, quantity: u32) -> ProductRecord {
        ProductRecord::new(name, Decimal::from(price), quantity).unwrap()
    }

    #[tokio::test]
    async fn test_top_products_ranks_the_snapshot() {
        let (cache, mut receiver) = create_mock_cache(TTL, 4);
        let client = CatalogClient::new(cache);

        let query = tokio::spawn(async move { client.top_products(Some("price")).await });

        let (now, responder) = expect_populate(&mut receiver)
            .await
            .expect("Expected Populate request");
        let records = vec![record("Pricey", 30, 1), record("Cheap", 2, 5)];
        responder
            .send(Ok(Arc::new(Snapshot::new(records, now))))
            .unwrap();

        let products = query.await.unwrap();
        let names: Vec<_> = products.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Cheap", "Pricey"]);
    }

    #[tokio::test]
    async fn test_population_failure_becomes_empty_list() {
        let (cache, mut receiver) = create_mock_cache(TTL, 4);
        let client = CatalogClient::new(cache);

        let query = tokio::spawn(async move { client.top_products(None).await });

        let (_, responder) = expect_populate(&mut receiver)
            .await
            .expect("Expected Populate request");
        responder
            .send(Err(CacheError::population_failed(LoadError::Interrupted(
                "worker panicked".into(),
            ))))
            .unwrap();

        assert!(query.await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_surfaces_cache_errors() {
        let (cache, receiver) = create_mock_cache::<ProductRecord>(TTL, 4);
        let client = CatalogClient::new(cache);
        drop(receiver);

        assert!(matches!(client.snapshot().await, Err(CacheError::ActorClosed)));
        assert!(client.top_products(Some("quantity")).await.is_empty());
    }
}
