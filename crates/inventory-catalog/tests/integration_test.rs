use inventory_catalog::clients::CatalogClient;
use inventory_catalog::config::CatalogConfig;
use inventory_catalog::lifecycle::CatalogSystem;
use inventory_catalog::loader::CatalogLoader;
use snapshot_cache::{CacheActor, SlotState};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const CATALOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<products>
  <product name="A" price="10" qty="1" />
  <product name="B" price="5" qty="2" />
  <product name="Broken" price="free" qty="2" />
  <product name="C" price="5" qty="9" />
  <product name="D" price="1" qty="0" />
  <product name="E" price="20" qty="3" />
  <product name="F" price="30" qty="4" />
</products>
"#;

const TTL: Duration = Duration::from_secs(600);

fn names(products: &[inventory_catalog::model::ProductRecord]) -> Vec<&str> {
    products.iter().map(|p| p.name()).collect()
}

/// Full end-to-end test: real file, real cache task, real ranking.
#[tokio::test]
async fn test_full_catalog_system() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.xml");
    fs::write(&path, CATALOG).unwrap();

    let system = CatalogSystem::start(&CatalogConfig::new(&path));

    let by_price = system.catalog_client.top_products(Some("price")).await;
    assert_eq!(names(&by_price), vec!["D", "B", "C", "A", "E"]);

    let by_quantity = system.catalog_client.top_products(Some("QUANTITY")).await;
    assert_eq!(names(&by_quantity), vec!["D", "A", "B", "E", "F"]);

    let by_name = system.catalog_client.top_products(None).await;
    assert_eq!(names(&by_name), vec!["A", "B", "C", "D", "E"]);

    // One load served all three queries; the malformed record was skipped.
    let cache = system.catalog_client.cache();
    assert_eq!(cache.stats().loads(), 1);
    assert_eq!(cache.peek().map(|s| s.len()), Some(6));

    system.shutdown().await.expect("Shutdown failed");
}

/// A missing file caches an empty catalog for the full TTL, even if the file appears meanwhile.
#[tokio::test]
async fn test_missing_file_is_cached_until_expiry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.xml");

    let (actor, cache) = CacheActor::new(CatalogLoader::new(&path), TTL, 8);
    let handle = tokio::spawn(actor.run());
    let client = CatalogClient::new(cache.clone());
    let t0 = Instant::now();

    assert!(client.top_products_at(t0, Some("price")).await.is_empty());
    assert_eq!(cache.state_at(t0), SlotState::Fresh);

    fs::write(&path, CATALOG).unwrap();

    let still_empty = client.top_products_at(t0 + Duration::from_secs(599), None).await;
    assert!(still_empty.is_empty());
    assert_eq!(cache.stats().loads(), 1);
    assert_eq!(cache.state_at(t0 + TTL), SlotState::Expired);

    let reloaded = client.top_products_at(t0 + TTL, Some("price")).await;
    assert_eq!(names(&reloaded), vec!["D", "B", "C", "A", "E"]);
    assert_eq!(cache.stats().loads(), 2);

    drop(client);
    drop(cache);
    handle.await.unwrap();
}

/// A truncated document is never cached: every read retries the load.
#[tokio::test]
async fn test_broken_document_is_retried_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.xml");
    fs::write(&path, "<products><product name=\"A\" price=\"1\" qty=\"1\"/>").unwrap();

    let system = CatalogSystem::start(&CatalogConfig::new(&path).with_ttl(TTL));
    let client = &system.catalog_client;

    assert!(client.snapshot().await.is_err());
    assert!(client.top_products(None).await.is_empty());
    assert_eq!(client.cache().stats().failures(), 2);
    assert_eq!(client.cache().state(), SlotState::Empty);

    fs::write(&path, CATALOG).unwrap();

    let recovered = client.top_products(Some("name")).await;
    assert_eq!(names(&recovered), vec!["A", "B", "C", "D", "E"]);
    assert_eq!(client.cache().stats().loads(), 1);

    system.shutdown().await.expect("Shutdown failed");
}

/// Concurrent first requests share one snapshot.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_one_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.xml");
    fs::write(&path, CATALOG).unwrap();

    let system = CatalogSystem::start(&CatalogConfig::new(&path));

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let client = system.catalog_client.clone();
        tasks.push(tokio::spawn(async move { client.snapshot().await.unwrap() }));
    }

    let mut snapshots = Vec::new();
    for task in tasks {
        snapshots.push(task.await.unwrap());
    }

    assert!(snapshots.iter().all(|s| Arc::ptr_eq(s, &snapshots[0])));
    assert_eq!(system.catalog_client.cache().stats().loads(), 1);

    system.shutdown().await.expect("Shutdown failed");
}

/// A config built by hand with a zero channel capacity still starts a working system.
#[tokio::test]
async fn test_zero_channel_capacity_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.xml");
    fs::write(&path, CATALOG).unwrap();

    let config = CatalogConfig {
        channel_capacity: 0,
        ..CatalogConfig::new(&path)
    };
    let system = CatalogSystem::start(&config);

    let top = system.catalog_client.top_products(Some("price")).await;
    assert_eq!(names(&top), vec!["D", "B", "C", "A", "E"]);

    system.shutdown().await.expect("Shutdown failed");
}
