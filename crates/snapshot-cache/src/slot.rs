//! # The Cache Slot
//!
//! The one piece of state shared between the [`CacheActor`](crate::CacheActor) and every
//! [`SnapshotCache`](crate::SnapshotCache) handle. Only the cache task writes it; handles read
//! it on every call.
//!
//! The write lock is held for a pointer swap and nothing else. Loading happens before the
//! lock is taken, so a reader can only ever wait for the swap, never for a load.

use crate::snapshot::Snapshot;
use crate::stats::CacheStats;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Observable state of the slot at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Nothing has been loaded yet, or every load so far has failed.
    Empty,
    /// A load is in flight.
    Populating,
    /// A snapshot is published and within its time-to-live.
    Fresh,
    /// A snapshot is published but the next read will trigger a reload.
    Expired,
}

/// A published snapshot and the instant it stops being fresh.
#[derive(Debug)]
pub(crate) struct CacheEntry<T> {
    snapshot: Arc<Snapshot<T>>,
    // None when loaded_at + ttl is past what Instant can represent.
    expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    pub(crate) fn new(snapshot: Arc<Snapshot<T>>, ttl: Duration) -> Self {
        let expires_at = snapshot.loaded_at().checked_add(ttl);
        Self {
            snapshot,
            expires_at,
        }
    }

    pub(crate) fn is_fresh_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires_at) => now < expires_at,
            None => true,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Slot<T> {
    entry: RwLock<Option<CacheEntry<T>>>,
    ttl: Duration,
    populating: AtomicBool,
    stats: CacheStats,
}

impl<T> Slot<T> {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl,
            populating: AtomicBool::new(false),
            stats: CacheStats::new(),
        }
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    pub(crate) fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The published snapshot, if there is one and it is fresh at `now`.
    pub(crate) fn fresh_at(&self, now: Instant) -> Option<Arc<Snapshot<T>>> {
        let entry = self.entry.read();
        entry
            .as_ref()
            .filter(|entry| entry.is_fresh_at(now))
            .map(|entry| Arc::clone(&entry.snapshot))
    }

    /// The published snapshot regardless of freshness.
    pub(crate) fn current(&self) -> Option<Arc<Snapshot<T>>> {
        let entry = self.entry.read();
        entry.as_ref().map(|entry| Arc::clone(&entry.snapshot))
    }

    pub(crate) fn publish(&self, snapshot: Arc<Snapshot<T>>) {
        let entry = CacheEntry::new(snapshot, self.ttl);
        *self.entry.write() = Some(entry);
    }

    pub(crate) fn set_populating(&self, populating: bool) {
        self.populating.store(populating, Ordering::Release);
    }

    pub(crate) fn state_at(&self, now: Instant) -> SlotState {
        if self.populating.load(Ordering::Acquire) {
            return SlotState::Populating;
        }
        let entry = self.entry.read();
        match entry.as_ref() {
            None => SlotState::Empty,
            Some(entry) if entry.is_fresh_at(now) => SlotState::Fresh,
            Some(_) => SlotState::Expired,
        }
    }
}
