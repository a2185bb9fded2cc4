//! Error and warning types for the catalog loader.
//!
//! Only [`LoadError`] ever leaves the loader as an `Err`. Everything else is data quality and
//! travels as a [`LoadWarning`] next to the records that did load.

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single `<product>` element was not turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required attribute is absent.
    #[error("Missing attribute: {0}")]
    MissingAttribute(&'static str),

    /// An attribute could not be read (bad escape, duplicate key, broken quoting).
    #[error("Unreadable attribute: {0}")]
    InvalidAttribute(String),

    #[error("Product name is empty")]
    EmptyName,

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Negative price: {0}")]
    NegativePrice(Decimal),

    /// Not a whole number, negative, or larger than `u32::MAX`.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
}

/// A recoverable problem found while loading the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadWarning {
    /// The source file is missing or unreadable. The load yields an empty catalog.
    #[error("Catalog source unavailable: {}: {cause}", .path.display())]
    SourceUnavailable { path: PathBuf, cause: String },

    /// One product element was skipped.
    #[error("Skipped product #{index} at byte {position} of {}: {cause}", .path.display())]
    RecordMalformed {
        path: PathBuf,
        /// 0-based ordinal among the document's product elements
        index: usize,
        /// Byte offset of the element in the document
        position: u64,
        /// The element's start tag as written
        element: String,
        cause: RecordError,
    },
}

/// A load that could not produce a catalog at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Malformed catalog document {} at byte {position}: {cause}", .path.display())]
    MalformedDocument {
        path: PathBuf,
        position: u64,
        cause: String,
    },

    /// The blocking load task panicked or was cancelled.
    #[error("Catalog load interrupted: {0}")]
    Interrupted(String),
}
