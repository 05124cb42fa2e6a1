//! Catalog operations

pub mod catalog;
pub mod resolve;
pub mod seed;
