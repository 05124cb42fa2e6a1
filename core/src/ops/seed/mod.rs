//! Seeding: replace the whole catalog with a snapshot of the remote one
//!
//! The remote page is fetched and transformed before anything is deleted, so a
//! failed fetch or a malformed record leaves the current collection alone. The
//! clear and the bulk insert are not wrapped in a transaction; readers can see
//! an empty collection in between, and a failed insert leaves it empty.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::CreateEntry;
use crate::error::{CatalogError, Result};
use crate::infra::db::EntryStore;

pub mod source;

pub use source::{CatalogSource, NamedResource, PokeApiSource, PokeResponse, SourceError};

/// Large enough for PokéAPI to hand back every species in one response.
pub const DEFAULT_PAGE_SIZE: u32 = 650;

pub struct SeedPipeline {
	store: Arc<dyn EntryStore>,
	source: Arc<dyn CatalogSource>,
	page_size: u32,
}

impl SeedPipeline {
	pub fn new(store: Arc<dyn EntryStore>, source: Arc<dyn CatalogSource>) -> Self {
		Self {
			store,
			source,
			page_size: DEFAULT_PAGE_SIZE,
		}
	}

	pub fn with_page_size(mut self, page_size: u32) -> Self {
		self.page_size = page_size;
		self
	}

	/// Runs a full replace and reports how many entries landed.
	pub async fn execute_seed(&self) -> Result<String> {
		let page = self
			.source
			.fetch_page(self.page_size)
			.await
			.map_err(|e| CatalogError::internal("fetch", e))?;

		if page.next.is_some() {
			warn!(
				count = page.count,
				page_size = self.page_size,
				"Remote catalog has more records than one page holds, only the first page is seeded"
			);
		}

		let entries = page
			.results
			.iter()
			.map(to_entry)
			.collect::<Result<Vec<_>>>()?;

		let cleared = self
			.store
			.delete_all()
			.await
			.map_err(|e| CatalogError::internal("clear", e))?;

		let inserted = self
			.store
			.insert_many(entries)
			.await
			.map_err(|e| CatalogError::internal("seed", e))?;

		info!(cleared, inserted, "Seed executed");

		Ok(format!("Seed executed: {inserted} registers."))
	}
}

fn to_entry(resource: &NamedResource) -> Result<CreateEntry> {
	let no = catalog_no_from_url(&resource.url).ok_or_else(|| {
		CatalogError::internal(
			"seed",
			format!(
				"malformed reference {:?} for {:?}",
				resource.url, resource.name
			),
		)
	})?;

	Ok(CreateEntry::new(resource.name.clone(), no))
}

/// The catalog number is the second-to-last path segment of a resource URL,
/// e.g. `https://pokeapi.co/api/v2/pokemon/25/` yields 25.
pub fn catalog_no_from_url(url: &str) -> Option<i64> {
	let segments = url.split('/').collect::<Vec<_>>();
	let index = segments.len().checked_sub(2)?;
	segments[index].parse().ok()
}
