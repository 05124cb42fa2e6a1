//! Pokedex core
//!
//! A catalog of numbered, named entries backed by SQLite: term resolution,
//! CRUD, and bulk seeding from PokéAPI.

pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ops;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::infra::db::{Database, EntryStore, SqlEntryStore};
use crate::ops::catalog::CatalogService;
use crate::ops::seed::{CatalogSource, PokeApiSource, SeedPipeline};

pub use crate::domain::{CreateEntry, Entry, Pagination, UpdateEntry};
pub use crate::error::CatalogError;

/// The main context for all catalog operations
pub struct Core {
	/// Application configuration
	pub config: AppConfig,

	/// CRUD over the catalog
	pub catalog: CatalogService,

	/// Bulk replace from the remote catalog
	pub seed: SeedPipeline,
}

impl Core {
	/// Open (or create) the database described by `config` and wire the
	/// services against PokéAPI.
	pub async fn new(config: AppConfig) -> Result<Self> {
		let db = Database::open(&config.database_path()).await?;
		let source = Arc::new(PokeApiSource::new(config.seed.base_url.clone()));

		Self::with_parts(config, db, source).await
	}

	/// Wire the services against an already opened database and any source.
	pub async fn with_parts(
		config: AppConfig,
		db: Database,
		source: Arc<dyn CatalogSource>,
	) -> Result<Self> {
		db.migrate().await?;

		let store: Arc<dyn EntryStore> = Arc::new(SqlEntryStore::new(db.conn().clone()));
		let catalog = CatalogService::new(Arc::clone(&store));
		let seed = SeedPipeline::new(store, source).with_page_size(config.seed.page_size);

		info!(data_dir = ?config.data_dir, "Core initialized");

		Ok(Self {
			config,
			catalog,
			seed,
		})
	}
}
