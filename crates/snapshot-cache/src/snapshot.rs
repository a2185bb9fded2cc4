//! # Snapshots
//!
//! A [`Snapshot`] is an immutable, fully-populated view of the cached data at one point in time.
//! The cache hands out `Arc<Snapshot<T>>`; a refresh publishes a new `Arc` and never touches
//! the old one, so a reader keeps a consistent view for as long as it holds on to it.

use tokio::time::Instant;

#[derive(Debug)]
pub struct Snapshot<T> {
    items: Vec<T>,
    loaded_at: Instant,
}

impl<T> Snapshot<T> {
    pub fn new(items: Vec<T>, loaded_at: Instant) -> Self {
        Self { items, loaded_at }
    }

    /// Items in the order the source produced them.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The instant of the request that triggered this load.
    pub fn loaded_at(&self) -> Instant {
        self.loaded_at
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
