//! Shared setup for catalog integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use pd_core::{
	config::AppConfig,
	infra::db::{Database, EntryStore, SqlEntryStore, StoreError},
	ops::{
		catalog::CatalogService,
		seed::{CatalogSource, NamedResource, PokeResponse, SourceError},
	},
	Core, CreateEntry, Entry, UpdateEntry,
};
use sea_orm::DbErr;
use std::{
	path::PathBuf,
	sync::{
		atomic::{AtomicU32, Ordering},
		Arc,
	},
};
use uuid::Uuid;

/// Remote catalog stand-in: either serves a fixed page or fails every fetch.
pub struct FakeSource {
	page: Option<PokeResponse>,
	requested_limit: AtomicU32,
}

impl FakeSource {
	pub fn serving(results: Vec<NamedResource>) -> Arc<Self> {
		Arc::new(Self {
			page: Some(PokeResponse {
				count: results.len() as u64,
				next: None,
				previous: None,
				results,
			}),
			requested_limit: AtomicU32::new(0),
		})
	}

	pub fn failing() -> Arc<Self> {
		Arc::new(Self {
			page: None,
			requested_limit: AtomicU32::new(0),
		})
	}

	pub fn requested_limit(&self) -> u32 {
		self.requested_limit.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl CatalogSource for FakeSource {
	async fn fetch_page(&self, limit: u32) -> Result<PokeResponse, SourceError> {
		self.requested_limit.store(limit, Ordering::SeqCst);
		self.page
			.clone()
			.ok_or_else(|| SourceError::Other("connection refused".to_string()))
	}
}

/// A PokéAPI-shaped record for catalog number `no`.
pub fn resource(name: &str, no: i64) -> NamedResource {
	NamedResource::new(name, format!("https://pokeapi.co/api/v2/pokemon/{no}/"))
}

/// Core over a fresh in-memory database.
pub async fn test_core(source: Arc<dyn CatalogSource>) -> Core {
	let config = AppConfig::default_with_dir(PathBuf::from("pokedex-test-data"));
	let db = Database::memory().await.unwrap();

	Core::with_parts(config, db, source).await.unwrap()
}

/// Core with nothing to seed from, for tests that only exercise CRUD.
pub async fn empty_core() -> Core {
	test_core(FakeSource::failing()).await
}

/// Creates each `(name, no)` through the catalog service.
pub async fn create_all(core: &Core, entries: &[(&str, i64)]) -> Vec<Entry> {
	let mut created = Vec::with_capacity(entries.len());
	for (name, no) in entries {
		created.push(
			core.catalog
				.create(CreateEntry::new(*name, *no))
				.await
				.unwrap(),
		);
	}
	created
}

/// How [`FaultyStore`] answers `update_one`.
#[derive(Debug, Clone, Copy)]
pub enum UpdateFault {
	/// The row disappeared after it was looked up.
	Vanished,
	/// The database itself failed.
	Broken,
}

/// Real SQLite store whose `update_one` misbehaves on purpose.
pub struct FaultyStore {
	inner: SqlEntryStore,
	fault: UpdateFault,
}

#[async_trait]
impl EntryStore for FaultyStore {
	async fn insert_one(&self, entry: CreateEntry) -> Result<Entry, StoreError> {
		self.inner.insert_one(entry).await
	}

	async fn insert_many(&self, entries: Vec<CreateEntry>) -> Result<u64, StoreError> {
		self.inner.insert_many(entries).await
	}

	async fn find_by_no(&self, no: i64) -> Result<Option<Entry>, StoreError> {
		self.inner.find_by_no(no).await
	}

	async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, StoreError> {
		self.inner.find_by_id(id).await
	}

	async fn find_by_name(&self, name: &str) -> Result<Option<Entry>, StoreError> {
		self.inner.find_by_name(name).await
	}

	async fn update_one(&self, _id: Uuid, _changes: &UpdateEntry) -> Result<u64, StoreError> {
		match self.fault {
			UpdateFault::Vanished => Ok(0),
			UpdateFault::Broken => Err(StoreError::Db(DbErr::Custom(
				"database disk image is malformed".to_string(),
			))),
		}
	}

	async fn delete_one(&self, id: Uuid) -> Result<u64, StoreError> {
		self.inner.delete_one(id).await
	}

	async fn delete_all(&self) -> Result<u64, StoreError> {
		self.inner.delete_all().await
	}

	async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Entry>, StoreError> {
		self.inner.list(limit, offset).await
	}
}

/// Catalog service over a fresh in-memory database whose updates fail with
/// `fault`, seeded with `entries`.
pub async fn faulty_catalog(fault: UpdateFault, entries: &[(&str, i64)]) -> CatalogService {
	let db = Database::memory().await.unwrap();
	db.migrate().await.unwrap();

	let store = FaultyStore {
		inner: SqlEntryStore::new(db.conn().clone()),
		fault,
	};
	let catalog = CatalogService::new(Arc::new(store));

	for (name, no) in entries {
		catalog.create(CreateEntry::new(*name, *no)).await.unwrap();
	}
	catalog
}
