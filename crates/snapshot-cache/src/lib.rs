//! # Snapshot Cache
//!
//! This crate provides a single-slot, time-to-live cache for data sets that are expensive
//! to build and cheap to share. A value is loaded at most once per expiration window, handed
//! out as an immutable [`Snapshot`], and replaced wholesale when it goes stale.
//!
//! ## Why an actor for a cache?
//!
//! The hard part of a lazily populated cache is not storing the value, it is making sure that
//! twenty requests arriving at once on a cold cache produce **one** load, not twenty.
//!
//! This crate splits the problem the same way the Actor Model splits state management:
//!
//! - **Population** is owned by a single task, the [`CacheActor`]. It receives
//!   [`CacheRequest::Populate`] messages and processes them one at a time, so there is never
//!   more than one load in flight. Requests that queue up behind a load re-check the slot
//!   before doing anything and collapse onto the result that just landed (single-flight).
//! - **Reads** never touch the actor once the slot is fresh. Every [`SnapshotCache`] handle
//!   shares the published entry and answers from it after a timestamp comparison.
//!
//! Reads are frequent and cheap, population is rare and expensive. The message channel is
//! only on the rare path.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Source Layer** ([`SnapshotSource`]) - knows how to produce the items (files, services, fixtures)
//! 2. **Runtime Layer** ([`CacheActor`]) - serialises population and publishes snapshots
//! 3. **Interface Layer** ([`SnapshotCache`]) - cloneable handle used on the request path
//!
//! ## Slot Lifecycle
//!
//! ```text
//!   Empty ──get──▶ Populating ──load ok──▶ Fresh ──ttl elapsed──▶ Expired
//!                     ▲   │                                        │
//!                     │   └──load failed (nothing cached)──▶ Empty │
//!                     └────────────────────get─────────────────────┘
//! ```
//!
//! The slot is never terminal. A failed load is reported to the callers that were waiting on
//! it and is **not** cached; the next call simply tries again.
//!
//! ## Usage
//!
//! ```rust
//! use snapshot_cache::mock::MockSource;
//! use snapshot_cache::CacheActor;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     // 1. Create
//!     let source = MockSource::new(vec!["alpha", "beta"]);
//!     let (actor, cache) = CacheActor::new(source, Duration::from_secs(600), 32);
//!
//!     // 2. Run
//!     tokio::spawn(actor.run());
//!
//!     // 3. Use
//!     let snapshot = cache.get_snapshot().await.unwrap();
//!     assert_eq!(snapshot.items(), &["alpha", "beta"]);
//! }
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for a scripted [`SnapshotSource`](mock::MockSource) that counts its
//! loads and can be held closed to line up concurrent callers.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod slot;
pub mod snapshot;
pub mod source;
pub mod stats;
pub mod tracing;

// Re-export core types for convenience
pub use actor::CacheActor;
pub use client::SnapshotCache;
pub use error::CacheError;
pub use message::{CacheRequest, Response};
pub use slot::SlotState;
pub use snapshot::Snapshot;
pub use source::{LoadReport, SnapshotSource};
pub use stats::CacheStats;
