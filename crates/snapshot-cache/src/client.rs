//! # Snapshot Cache Handle
//!
//! The "Client" side of the cache. Cheap to clone, safe to share across tasks, and the only
//! type the request path needs to hold.

use crate::error::CacheError;
use crate::message::CacheRequest;
use crate::slot::{Slot, SlotState};
use crate::snapshot::Snapshot;
use crate::stats::CacheStats;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::trace;

/// A handle for reading snapshots from a [`CacheActor`](crate::CacheActor).
///
/// # Read path
/// A fresh slot is answered in place: a read lock, a timestamp comparison and an `Arc` clone.
/// Only an empty or expired slot sends a message to the cache task, and the caller then waits
/// for whichever load answers it.
pub struct SnapshotCache<T> {
    sender: mpsc::Sender<CacheRequest<T>>,
    slot: Arc<Slot<T>>,
}

impl<T> Clone for SnapshotCache<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Send + Sync + 'static> SnapshotCache<T> {
    pub(crate) fn new(sender: mpsc::Sender<CacheRequest<T>>, slot: Arc<Slot<T>>) -> Self {
        Self { sender, slot }
    }

    /// Returns the current snapshot, loading it first if the slot is empty or expired.
    pub async fn get_snapshot(&self) -> Result<Arc<Snapshot<T>>, CacheError> {
        self.get_snapshot_at(Instant::now()).await
    }

    /// Same as [`get_snapshot`](Self::get_snapshot) with an explicit notion of "now".
    ///
    /// A snapshot loaded at `t` is fresh for every `now` in `[t, t + ttl)`.
    pub async fn get_snapshot_at(&self, now: Instant) -> Result<Arc<Snapshot<T>>, CacheError> {
        if let Some(snapshot) = self.slot.fresh_at(now) {
            self.slot.stats().record_hit();
            trace!("Fresh hit");
            return Ok(snapshot);
        }

        self.slot.stats().record_miss();
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CacheRequest::Populate { now, respond_to })
            .await
            .map_err(|_| CacheError::ActorClosed)?;
        response.await.map_err(|_| CacheError::ActorDropped)?
    }

    /// The last published snapshot, fresh or not, without triggering a load.
    pub fn peek(&self) -> Option<Arc<Snapshot<T>>> {
        self.slot.current()
    }

    pub fn state_at(&self, now: Instant) -> SlotState {
        self.slot.state_at(now)
    }

    pub fn state(&self) -> SlotState {
        self.slot.state_at(Instant::now())
    }

    pub fn stats(&self) -> &CacheStats {
        self.slot.stats()
    }

    pub fn ttl(&self) -> Duration {
        self.slot.ttl()
    }

    /// Number of requests sitting in the channel, not yet picked up by the cache task.
    pub fn pending_requests(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }
}
