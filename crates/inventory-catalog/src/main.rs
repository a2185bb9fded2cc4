//! # Inventory Catalog
//!
//! Prints the top five catalog products as JSON.
//!
//! ```bash
//! inventory-catalog [price|quantity|name]
//! ```
//!
//! With no argument (or an unrecognised one) products are ordered by name.

use inventory_catalog::config::CatalogConfig;
use inventory_catalog::lifecycle::CatalogSystem;
use snapshot_cache::tracing::setup_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = CatalogConfig::from_env()?;
    let sort_key = std::env::args().nth(1);
    info!(?sort_key, "Starting inventory catalog");

    let system = CatalogSystem::start(&config);

    let products = system.catalog_client.top_products(sort_key.as_deref()).await;
    println!("{}", serde_json::to_string_pretty(&products)?);

    system.shutdown().await?;
    Ok(())
}
