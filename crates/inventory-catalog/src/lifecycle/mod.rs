//! # System Lifecycle
//!
//! Starts the catalog cache task, hands out the client the request path uses, and shuts the
//! task down again.
//!
//! ## The CatalogSystem Pattern
//!
//! The cache is an object with an explicit lifecycle rather than ambient global state:
//!
//! 1. **Construct once** at process start with [`CatalogSystem::start`]
//! 2. **Inject** [`CatalogSystem::catalog_client`] (or clones of it) into whatever serves requests
//! 3. **Shut down** with [`CatalogSystem::shutdown`]
//!
//! ## Graceful Shutdown
//!
//! The cache task stops when every handle to it is gone:
//!
//! 1. **Drop all clients** - closes the sender side of the request channel
//! 2. **Task detects closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - `shutdown` waits for the task to finish
//!
//! A load in progress when shutdown starts runs to completion first. Clones of the client
//! held elsewhere keep the task alive, so drop them before calling `shutdown`.

use crate::clients::CatalogClient;
use crate::config::CatalogConfig;
use crate::loader::CatalogLoader;
use snapshot_cache::CacheActor;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Owns the running catalog cache.
///
/// # Example
///
/// ```rust,no_run
/// use inventory_catalog::config::CatalogConfig;
/// use inventory_catalog::lifecycle::CatalogSystem;
///
/// #[tokio::main]
/// async fn main() {
///     let system = CatalogSystem::start(&CatalogConfig::default());
///     let top = system.catalog_client.top_products(Some("price")).await;
///     println!("{} products", top.len());
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct CatalogSystem {
    /// Client for reading the catalog
    pub catalog_client: CatalogClient,

    /// Cache task handle (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl CatalogSystem {
    /// Spawns the cache task. Must be called from within a tokio runtime.
    ///
    /// Nothing is loaded here: the first read populates the cache.
    pub fn start(config: &CatalogConfig) -> Self {
        let loader = CatalogLoader::new(config.source_path.clone());
        let (actor, cache) = CacheActor::new(loader, config.ttl, config.channel_capacity);
        let handle = tokio::spawn(actor.run());

        info!(
            source = %config.source_path.display(),
            ttl_secs = config.ttl.as_secs(),
            "Catalog system started"
        );

        Self {
            catalog_client: CatalogClient::new(cache),
            handle,
        }
    }

    /// Drops the system's client and waits for the cache task to finish.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Shutting down catalog system...");
        drop(self.catalog_client);

        if let Err(e) = self.handle.await {
            error!("Cache task failed: {:?}", e);
            return Err(e);
        }

        info!("Catalog system shutdown complete.");
        Ok(())
    }
}
