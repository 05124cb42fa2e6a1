//! Test helper modules for integration tests

pub mod catalog_harness;

pub use catalog_harness::*;
