//! # Inventory Catalog
//!
//! Serves the top five products of a static XML catalog, sorted by price, quantity or name,
//! without parsing the catalog on every request.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! - **Role**: The validated [`ProductRecord`](model::ProductRecord) and the
//!   [`SortKey`](model::SortKey) vocabulary.
//!
//! ### 2. The Loader ([`loader`])
//! - **Role**: Reads the XML file into records, skipping bad elements with a warning instead of
//!   failing the whole catalog.
//! - **Key items**: [`CatalogLoader`](loader::CatalogLoader), [`LoadWarning`](loader::LoadWarning).
//!
//! ### 3. The Cache ([`snapshot_cache`])
//! - **Role**: Loads the catalog at most once per TTL window, however many requests arrive at
//!   once, and serves the same immutable snapshot to all of them.
//! - **Key items**: [`CatalogCache`], [`CatalogSnapshot`].
//!
//! ### 4. The Ranking ([`ranking`])
//! - **Role**: Pure, stable sort-and-limit to [`TOP_N`](ranking::TOP_N) records.
//!
//! ### 5. The Interface ([`clients`]) and the Orchestrator ([`lifecycle`])
//! - **Role**: [`CatalogClient`](clients::CatalogClient) is what a request handler calls;
//!   [`CatalogSystem`](lifecycle::CatalogSystem) starts and stops the cache task.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Top five by price, with load logs
//! RUST_LOG=info cargo run -p inventory-catalog -- price
//!
//! # Point at another catalog and refresh every 30 seconds
//! CATALOG_SOURCE=/srv/products.xml CATALOG_TTL_SECS=30 cargo run -p inventory-catalog
//! ```

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod loader;
pub mod model;
pub mod ranking;

use model::ProductRecord;
use snapshot_cache::{Snapshot, SnapshotCache};

/// An immutable view of the catalog at one point in time.
pub type CatalogSnapshot = Snapshot<ProductRecord>;

/// Handle to the catalog's snapshot cache.
pub type CatalogCache = SnapshotCache<ProductRecord>;
