//! Pure data structures: the validated product record and the sort key vocabulary.

pub mod product;
pub mod sort_key;

pub use product::*;
pub use sort_key::*;
