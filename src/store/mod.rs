//! Storage module
//!
//! Text-file backed stores: the product catalog and the meal ledger. Paths are
//! injected at construction; every operation re-reads or rewrites the file in a
//! single call, so no partial state is ever visible.

pub mod catalog;
pub mod ledger;

use std::io;

use thiserror::Error;

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid number '{value}' on line {line}")]
    InvalidNumber { line: usize, value: String },
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

pub use catalog::{lookup, normalize_name, Catalog, ProductMap};
pub use ledger::Ledger;
