//! Catalog service: create, read, update and delete over the entry store
//!
//! Lookups by term go through the [`Resolver`]; `remove` is the exception and
//! only ever takes a store identifier.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{normalize_name, CreateEntry, Entry, Pagination, UpdateEntry};
use crate::error::{handle_store_error, CatalogError, Result};
use crate::infra::db::EntryStore;
use crate::ops::resolve::Resolver;

pub struct CatalogService {
	store: Arc<dyn EntryStore>,
	resolver: Resolver,
}

impl CatalogService {
	pub fn new(store: Arc<dyn EntryStore>) -> Self {
		Self {
			resolver: Resolver::new(Arc::clone(&store)),
			store,
		}
	}

	pub async fn create(&self, mut input: CreateEntry) -> Result<Entry> {
		validate_name(&input.name)?;
		validate_no(input.no)?;
		input.name = normalize_name(&input.name);

		let entry = self
			.store
			.insert_one(input)
			.await
			.map_err(|e| handle_store_error("create", e))?;

		info!(id = %entry.id, no = entry.no, name = %entry.name, "Created pokemon");

		Ok(entry)
	}

	pub async fn find_one(&self, term: &str) -> Result<Entry> {
		self.resolver.resolve(term).await
	}

	pub async fn find_all(&self, page: Pagination) -> Result<Vec<Entry>> {
		let limit = validate_window("limit", page.limit())?;
		let offset = validate_window("offset", page.offset())?;

		self.store
			.list(limit, offset)
			.await
			.map_err(|e| handle_store_error("list", e))
	}

	/// Applies `changes` to the entry `term` resolves to.
	///
	/// The returned entry is the existing one overlaid with `changes`; it is not
	/// read back from the store.
	pub async fn update(&self, term: &str, mut changes: UpdateEntry) -> Result<Entry> {
		let existing = self.find_one(term).await?;

		if let Some(name) = &changes.name {
			validate_name(name)?;
			changes.name = Some(normalize_name(name));
		}
		if let Some(no) = changes.no {
			validate_no(no)?;
		}

		if changes.is_empty() {
			return Ok(existing);
		}

		let updated = self
			.store
			.update_one(existing.id, &changes)
			.await
			.map_err(|e| handle_store_error("update", e))?;

		// Deleted between the lookup and the write.
		if updated == 0 {
			return Err(CatalogError::NotFound(term.to_string()));
		}

		info!(id = %existing.id, ?changes, "Updated pokemon");

		Ok(changes.apply_to(existing))
	}

	/// Deletes by store identifier. Nothing is returned on success.
	pub async fn remove(&self, id: &str) -> Result<()> {
		let not_found = || CatalogError::InvalidArgument(format!("Pokemon with id \"{id}\" not found"));

		let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;

		let deleted = self
			.store
			.delete_one(uuid)
			.await
			.map_err(|e| handle_store_error("delete", e))?;

		if deleted == 0 {
			return Err(not_found());
		}

		info!(%id, "Removed pokemon");

		Ok(())
	}
}

fn validate_name(name: &str) -> Result<()> {
	if name.trim().is_empty() {
		return Err(CatalogError::InvalidArgument(
			"Pokemon name must not be empty".to_string(),
		));
	}
	Ok(())
}

fn validate_no(no: i64) -> Result<()> {
	if no < 1 {
		return Err(CatalogError::InvalidArgument(format!(
			"Pokemon no must be a positive integer, got {no}"
		)));
	}
	Ok(())
}

/// SQLite binds LIMIT/OFFSET as signed 64-bit integers.
fn validate_window(field: &str, value: u64) -> Result<u64> {
	if i64::try_from(value).is_err() {
		return Err(CatalogError::InvalidArgument(format!(
			"Pagination {field} must be at most {}, got {value}",
			i64::MAX
		)));
	}
	Ok(value)
}
