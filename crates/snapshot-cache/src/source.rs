//! # Snapshot Sources
//!
//! A [`SnapshotSource`] is the only thing a [`CacheActor`](crate::CacheActor) needs to know
//! about the data it caches: how to load it, what a warning looks like, and what a hard
//! failure looks like.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use tracing::warn;

/// The outcome of a successful load: the items that made it, and what was skipped on the way.
///
/// A source that tolerates bad input reports it here instead of failing the whole load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport<T, W> {
    pub items: Vec<T>,
    pub warnings: Vec<W>,
}

impl<T, W> LoadReport<T, W> {
    pub fn new(items: Vec<T>, warnings: Vec<W>) -> Self {
        Self { items, warnings }
    }

    /// A report with no items and a single warning.
    pub fn empty_with(warning: W) -> Self {
        Self {
            items: Vec::new(),
            warnings: vec![warning],
        }
    }
}

impl<T, W> Default for LoadReport<T, W> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Trait that anything cached by a [`CacheActor`](crate::CacheActor) must implement.
///
/// # Architecture Note
/// The source is moved into the cache task and only ever called from there, one load at a
/// time. It does not need interior locking for the cache's sake.
///
/// # Provided Methods (Hooks)
/// - [`SnapshotSource::on_warning`] is called once per warning after every successful load.
///   The default logs the warning's `Display` form at `warn` level. Override it to emit
///   structured fields.
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    /// The element type stored in a [`Snapshot`](crate::Snapshot).
    type Item: Send + Sync + Debug + 'static;

    /// A recoverable problem encountered during a load.
    type Warning: Send + Sync + Display + Debug + 'static;

    /// A load that could not produce any report at all.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short human-readable name for logs (a path, a URL, ...).
    fn describe(&self) -> String;

    /// Loads the full data set.
    async fn load(&self) -> Result<LoadReport<Self::Item, Self::Warning>, Self::Error>;

    fn on_warning(&self, warning: &Self::Warning) {
        warn!(source = %self.describe(), %warning, "Load warning");
    }
}
