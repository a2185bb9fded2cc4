//! # Mock Sources & Testing Guide
//!
//! Testing a cache means testing *timing*: how many loads ran, who waited on which load, what
//! happened when a load failed. This module gives you two tools for that.
//!
//! | Tool | Replaces | Use Case |
//! |------|----------|----------|
//! | [`MockSource`] | the data source | Testing the cache itself: load counts, failures, collapsing |
//! | [`create_mock_cache`] | the cache task | Testing code *around* the cache: how it reacts to errors |
//!
//! ## Pattern 1: Scripted Source
//!
//! ```rust
//! use snapshot_cache::mock::MockSource;
//! use snapshot_cache::{CacheActor, CacheError};
//! use std::time::Duration;
//! use tokio::time::Instant;
//!
//! #[tokio::main]
//! async fn main() {
//!     // First load fails, every load after that returns [1, 2]
//!     let source = MockSource::new(vec![1, 2]).script_err("disk unplugged");
//!     let loads = source.load_counter();
//!
//!     let (actor, cache) = CacheActor::new(source, Duration::from_secs(60), 8);
//!     tokio::spawn(actor.run());
//!
//!     let now = Instant::now();
//!     assert!(matches!(cache.get_snapshot_at(now).await, Err(CacheError::PopulationFailed(_))));
//!     assert_eq!(cache.get_snapshot_at(now).await.unwrap().items(), &[1, 2]);
//!     assert_eq!(loads.get(), 2);
//! }
//! ```
//!
//! ## Pattern 2: Gated Source (lining up concurrent callers)
//!
//! A gated source blocks inside `load` until the test opens the gate. Start the callers, wait
//! until they are all queued behind the load with
//! [`SnapshotCache::pending_requests`](crate::SnapshotCache::pending_requests), then open.
//!
//! ## Pattern 3: Mock Cache Task
//!
//! [`create_mock_cache`] returns a real [`SnapshotCache`] wired to a channel the test owns.
//! Use [`expect_populate`] to receive the request and answer it with whatever result the
//! scenario needs.

use crate::client::SnapshotCache;
use crate::message::{CacheRequest, Response};
use crate::slot::Slot;
use crate::source::{LoadReport, SnapshotSource};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

/// Error returned by a [`MockSource`] load scripted to fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Mock load failed: {0}")]
pub struct MockLoadError(pub String);

/// Shared view of how many times a [`MockSource`] has been asked to load.
///
/// The count goes up when a load *starts*, before any gate or delay.
#[derive(Debug, Clone, Default)]
pub struct LoadCounter(Arc<AtomicUsize>);

impl LoadCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Opens the gate of a source created with [`MockSource::gated`].
#[derive(Debug)]
pub struct MockGate {
    sender: watch::Sender<bool>,
}

impl MockGate {
    pub fn open(&self) {
        self.sender.send_replace(true);
    }
}

/// An in-memory [`SnapshotSource`] with a script of outcomes.
///
/// Scripted outcomes are consumed in order, one per load. Once the script is empty every load
/// returns the default items.
#[derive(Debug)]
pub struct MockSource<T> {
    default_items: Vec<T>,
    script: Mutex<VecDeque<Result<Vec<T>, String>>>,
    loads: LoadCounter,
    gate: Option<watch::Receiver<bool>>,
    free_loads: usize,
    delay: Option<Duration>,
}

impl<T: Clone + Send + Sync + Debug + 'static> MockSource<T> {
    pub fn new(default_items: Vec<T>) -> Self {
        Self {
            default_items,
            script: Mutex::new(VecDeque::new()),
            loads: LoadCounter::default(),
            gate: None,
            free_loads: 0,
            delay: None,
        }
    }

    /// Queues a load that returns `items`.
    pub fn script_ok(self, items: Vec<T>) -> Self {
        self.push(Ok(items))
    }

    /// Queues a load that fails with `message`.
    pub fn script_err(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()))
    }

    /// Makes every load sleep for `delay` before returning.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Makes every load wait until the returned gate is opened.
    pub fn gated(self) -> (Self, MockGate) {
        self.gated_after(0)
    }

    /// Like [`gated`](Self::gated), but the first `free_loads` loads pass straight through.
    /// Use it to hold a refresh while the initial load completes normally.
    pub fn gated_after(mut self, free_loads: usize) -> (Self, MockGate) {
        let (sender, receiver) = watch::channel(false);
        self.gate = Some(receiver);
        self.free_loads = free_loads;
        (self, MockGate { sender })
    }

    pub fn load_counter(&self) -> LoadCounter {
        self.loads.clone()
    }

    fn push(self, outcome: Result<Vec<T>, String>) -> Self {
        self.script.lock().push_back(outcome);
        self
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + Debug + 'static> SnapshotSource for MockSource<T> {
    type Item = T;
    type Warning = String;
    type Error = MockLoadError;

    fn describe(&self) -> String {
        "mock".to_string()
    }

    async fn load(&self) -> Result<LoadReport<T, String>, MockLoadError> {
        let started_before = self.loads.0.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = self.gate.as_ref().filter(|_| started_before >= self.free_loads) {
            let mut gate = gate.clone();
            // A dropped gate counts as open
            let _ = gate.wait_for(|open| *open).await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.script.lock().pop_front();
        match next {
            Some(Ok(items)) => Ok(LoadReport::new(items, Vec::new())),
            Some(Err(message)) => Err(MockLoadError(message)),
            None => Ok(LoadReport::new(self.default_items.clone(), Vec::new())),
        }
    }
}

/// Creates a cache handle and a receiver standing in for the cache task.
///
/// # Testing Strategy
/// When the code under test only *uses* a cache, spinning up a real cache task and a source
/// just to provoke an error is noise. The handle returned here behaves like a real one whose
/// slot is empty, so every read turns into a request on `receiver`, which the test answers.
pub fn create_mock_cache<T: Send + Sync + 'static>(
    ttl: Duration,
    buffer_size: usize,
) -> (SnapshotCache<T>, mpsc::Receiver<CacheRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size.max(1));
    let slot = Arc::new(Slot::new(ttl));
    (SnapshotCache::new(sender, slot), receiver)
}

/// Helper to receive the next Populate request
pub async fn expect_populate<T>(
    receiver: &mut mpsc::Receiver<CacheRequest<T>>,
) -> Option<(Instant, Response<T>)> {
    match receiver.recv().await {
        Some(CacheRequest::Populate { now, respond_to }) => Some((now, respond_to)),
        None => None,
    }
}
