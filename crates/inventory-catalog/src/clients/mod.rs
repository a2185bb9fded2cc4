//! Request-path wrappers around the generic [`SnapshotCache`](snapshot_cache::SnapshotCache).

pub mod catalog_client;

pub use catalog_client::*;
