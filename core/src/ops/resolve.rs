//! Identifier resolution
//!
//! A term handed to the catalog can be a catalog number, a store identifier or
//! a name. Each key space is a [`Strategy`]; they are tried one at a time in
//! [`Strategy::PRECEDENCE`] order and the first hit wins.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::{normalize_name, Entry};
use crate::error::{handle_store_error, CatalogError, Result};
use crate::infra::db::{EntryStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
	/// The whole term is a number: match on `no`
	NumericKey,
	/// The term is a well-formed store identifier: match on `id`
	NativeId,
	/// Anything else: match on the lowercased name
	NameKey,
}

impl Strategy {
	pub const PRECEDENCE: [Strategy; 3] = [Self::NumericKey, Self::NativeId, Self::NameKey];

	/// Whether this strategy is allowed to look at `term` at all.
	pub fn applies(self, term: &str) -> bool {
		match self {
			Self::NumericKey => term.parse::<f64>().is_ok_and(f64::is_finite),
			Self::NativeId => Uuid::parse_str(term).is_ok(),
			Self::NameKey => true,
		}
	}

	async fn lookup(
		self,
		store: &dyn EntryStore,
		term: &str,
	) -> std::result::Result<Option<Entry>, StoreError> {
		match self {
			// A fractional or out of range number can't equal any `no`.
			Self::NumericKey => match catalog_no(term) {
				Some(no) => store.find_by_no(no).await,
				None => Ok(None),
			},
			Self::NativeId => match Uuid::parse_str(term) {
				Ok(id) => store.find_by_id(id).await,
				Err(_) => Ok(None),
			},
			Self::NameKey => store.find_by_name(&normalize_name(term)).await,
		}
	}
}

/// Reads a numeric term as a catalog number, if it denotes an integer.
fn catalog_no(term: &str) -> Option<i64> {
	if let Ok(no) = term.parse::<i64>() {
		return Some(no);
	}

	let value = term.parse::<f64>().ok()?;
	if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
		Some(value as i64)
	} else {
		None
	}
}

pub struct Resolver {
	store: Arc<dyn EntryStore>,
}

impl Resolver {
	pub fn new(store: Arc<dyn EntryStore>) -> Self {
		Self { store }
	}

	/// Finds the entry `term` refers to, or `NotFound` with `term` in the message.
	pub async fn resolve(&self, term: &str) -> Result<Entry> {
		for strategy in Strategy::PRECEDENCE {
			if !strategy.applies(term) {
				continue;
			}

			debug!(?strategy, term, "Resolving entry");

			if let Some(entry) = strategy
				.lookup(self.store.as_ref(), term)
				.await
				.map_err(|e| handle_store_error("find", e))?
			{
				return Ok(entry);
			}
		}

		Err(CatalogError::NotFound(term.to_string()))
	}
}
