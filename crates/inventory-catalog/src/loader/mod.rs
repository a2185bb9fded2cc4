//! # Catalog Loader
//!
//! Turns the catalog file into validated [`ProductRecord`]s.
//!
//! ## Partial-failure tolerance
//!
//! The loader's job is to get as much of the catalog as it can:
//!
//! - **Missing or unreadable file**: an empty catalog and one
//!   [`LoadWarning::SourceUnavailable`]. The caller decides whether that is acceptable.
//! - **Bad product element**: that element is skipped with a
//!   [`LoadWarning::RecordMalformed`]; the rest of the document still loads.
//! - **Not well-formed XML**: the only case that fails, with [`LoadError::MalformedDocument`].
//!   There is no sensible partial answer for a document whose structure cannot be trusted.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use inventory_catalog::loader::CatalogLoader;
//!
//! let loader = CatalogLoader::new("wwwroot/products.xml");
//! let report = loader.load_blocking().unwrap();
//! println!("{} products, {} skipped", report.items.len(), report.warnings.len());
//! ```
//!
//! As a [`SnapshotSource`], the same loader runs on tokio's blocking pool so the cache task
//! never stalls the runtime on file I/O.

pub mod error;
pub mod xml;

pub use error::*;
pub use xml::parse_catalog;

use crate::model::ProductRecord;
use async_trait::async_trait;
use snapshot_cache::{LoadReport, SnapshotSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Records and warnings produced by one load.
pub type CatalogReport = LoadReport<ProductRecord, LoadWarning>;

/// Loads the product catalog from an XML file.
///
/// Stateless beyond the path: every call reads the file again.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    path: Arc<PathBuf>,
}

impl CatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the file on the current thread.
    pub fn load_blocking(&self) -> Result<CatalogReport, LoadError> {
        let xml = match std::fs::read_to_string(self.path.as_path()) {
            Ok(xml) => xml,
            Err(e) => {
                return Ok(CatalogReport::empty_with(LoadWarning::SourceUnavailable {
                    path: self.path.to_path_buf(),
                    cause: e.to_string(),
                }))
            }
        };
        debug!(path = %self.path.display(), bytes = xml.len(), "Catalog read");
        parse_catalog(&xml, &self.path)
    }
}

#[async_trait]
impl SnapshotSource for CatalogLoader {
    type Item = ProductRecord;
    type Warning = LoadWarning;
    type Error = LoadError;

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<CatalogReport, LoadError> {
        let loader = self.clone();
        tokio::task::spawn_blocking(move || loader.load_blocking())
            .await
            .map_err(|e| LoadError::Interrupted(e.to_string()))?
    }

    fn on_warning(&self, warning: &LoadWarning) {
        match warning {
            LoadWarning::SourceUnavailable { path, cause } => {
                error!(path = %path.display(), %cause, "Catalog source unavailable");
            }
            LoadWarning::RecordMalformed {
                path,
                index,
                position,
                element,
                cause,
            } => {
                warn!(
                    path = %path.display(),
                    index,
                    position,
                    %element,
                    %cause,
                    "Skipped malformed product"
                );
            }
        }
    }
}
