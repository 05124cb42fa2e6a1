//! Core domain models
//!
//! These are the shapes the catalog hands to its callers. Storage-only columns
//! never make it in here.

pub mod entry;

pub use entry::{normalize_name, CreateEntry, Entry, Pagination, UpdateEntry};
