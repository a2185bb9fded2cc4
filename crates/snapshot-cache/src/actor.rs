//! # Cache Task
//!
//! This module defines the [`CacheActor`], the single task that owns population of the slot.
//! It is the "Server" side of the cache: it receives [`CacheRequest`]s, runs loads one at a
//! time, and publishes the results for every [`SnapshotCache`] handle to read.

use crate::client::SnapshotCache;
use crate::error::CacheError;
use crate::message::CacheRequest;
use crate::slot::Slot;
use crate::snapshot::Snapshot;
use crate::source::SnapshotSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// The task that serialises population of a single cache slot.
///
/// # Architecture Note
/// Requests are processed sequentially, so two loads can never overlap. That is the whole
/// single-flight guarantee: while a load runs, further `Populate` requests wait in the channel.
/// When the load finishes, each of them re-checks the slot with its own `now`, finds the fresh
/// snapshot, and is answered with it without loading again.
///
/// A failed load publishes nothing. Requests already queued behind it are released with the
/// same error, and the slot stays as it was so the next request retries.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `CacheActor::new()` to get the `actor` (server) and `cache` (interface).
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Share**: Clone the `cache` handle into whatever serves requests.
///
/// ```rust
/// use snapshot_cache::mock::MockSource;
/// use snapshot_cache::CacheActor;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, cache) = CacheActor::new(MockSource::new(vec![1, 2, 3]), Duration::from_secs(60), 8);
///     tokio::spawn(actor.run());
///
///     let first = cache.get_snapshot().await.unwrap();
///     let second = cache.get_snapshot().await.unwrap();
///     assert!(std::sync::Arc::ptr_eq(&first, &second));
/// }
/// ```
pub struct CacheActor<S: SnapshotSource> {
    receiver: mpsc::Receiver<CacheRequest<S::Item>>,
    source: S,
    slot: Arc<Slot<S::Item>>,
}

impl<S: SnapshotSource> CacheActor<S> {
    /// Creates a new `CacheActor` and its associated `SnapshotCache`.
    ///
    /// # Arguments
    ///
    /// * `source` - Where snapshots come from. Moved into the task.
    /// * `ttl` - How long a snapshot stays fresh after the request that loaded it.
    /// * `buffer_size` - Capacity of the request channel. It only carries cache misses, so it
    ///   bounds how many callers can be queued behind one load before `send` waits. Raised to
    ///   1 if zero.
    pub fn new(source: S, ttl: Duration, buffer_size: usize) -> (Self, SnapshotCache<S::Item>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let slot = Arc::new(Slot::new(ttl));
        let actor = Self {
            receiver,
            source,
            slot: Arc::clone(&slot),
        };
        let cache = SnapshotCache::new(sender, slot);
        (actor, cache)
    }

    /// Runs the cache task, processing requests until every handle has been dropped.
    pub async fn run(mut self) {
        let source = self.source.describe();
        info!(%source, ttl_secs = self.slot.ttl().as_secs(), "Cache task started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CacheRequest::Populate { now, respond_to } => {
                    if let Some(snapshot) = self.slot.fresh_at(now) {
                        self.slot.stats().record_collapsed();
                        debug!(%source, "Answered by completed load");
                        let _ = respond_to.send(Ok(snapshot));
                        continue;
                    }

                    let outcome = self.populate(now, &source).await;
                    if let Err(e) = &outcome {
                        self.release_waiters(e, &source);
                    }
                    let _ = respond_to.send(outcome);
                }
            }
        }

        info!(%source, loads = self.slot.stats().loads(), "Shutdown");
    }

    async fn populate(
        &self,
        now: Instant,
        source: &str,
    ) -> Result<Arc<Snapshot<S::Item>>, CacheError> {
        self.slot.set_populating(true);
        let started = std::time::Instant::now();
        debug!(source, "Populating");

        let outcome = match self.source.load().await {
            Ok(report) => {
                for warning in &report.warnings {
                    self.source.on_warning(warning);
                }
                let warnings = report.warnings.len();
                let snapshot = Arc::new(Snapshot::new(report.items, now));
                self.slot.publish(Arc::clone(&snapshot));
                self.slot.stats().record_load();
                info!(
                    source,
                    records = snapshot.len(),
                    warnings,
                    elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "Snapshot published"
                );
                Ok(snapshot)
            }
            Err(e) => {
                self.slot.stats().record_failure();
                error!(source, error = %e, "Population failed");
                Err(CacheError::population_failed(e))
            }
        };

        self.slot.set_populating(false);
        outcome
    }

    /// Answers every request already queued behind a failed load with that load's error.
    fn release_waiters(&mut self, error: &CacheError, source: &str) {
        let mut released = 0usize;
        while let Ok(CacheRequest::Populate { respond_to, .. }) = self.receiver.try_recv() {
            self.slot.stats().record_collapsed();
            let _ = respond_to.send(Err(error.clone()));
            released += 1;
        }
        if released > 0 {
            debug!(source, released, "Released waiters with load failure");
        }
    }
}
