//! # Cache Errors
//!
//! This module defines the errors a caller of [`SnapshotCache`](crate::SnapshotCache) can see.
//! Recoverable data problems never show up here; sources report those as warnings.

use std::sync::Arc;

/// Errors that can occur while obtaining a snapshot.
///
/// The type is `Clone` because one failed load is reported to every caller that was waiting
/// on it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("Cache task closed")]
    ActorClosed,
    #[error("Cache task dropped response channel")]
    ActorDropped,
    #[error("Population failed: {0}")]
    PopulationFailed(Arc<dyn std::error::Error + Send + Sync>),
}

impl CacheError {
    pub fn population_failed(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        CacheError::PopulationFailed(Arc::new(error))
    }
}
