//! # Cache Messages
//!
//! The request type sent from [`SnapshotCache`](crate::SnapshotCache) handles to the
//! [`CacheActor`](crate::CacheActor), and the one-shot channel used to answer it.

use crate::error::CacheError;
use crate::snapshot::Snapshot;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::Instant;

/// Type alias for the one-shot response channel used by the cache task.
pub type Response<T> = oneshot::Sender<Result<Arc<Snapshot<T>>, CacheError>>;

/// Internal message type sent to the cache task.
///
/// Clients only send a request after finding the slot empty or stale at `now`. The cache task
/// checks again with the same `now` before loading, which is what collapses a burst of
/// requests into a single load.
#[derive(Debug)]
pub enum CacheRequest<T> {
    Populate {
        now: Instant,
        respond_to: Response<T>,
    },
}
