//! Entry store: the persistence contract the catalog is written against, and
//! its SeaORM implementation.
//!
//! Names are normalized here, on every write path, so nothing that reaches the
//! `entries` table can carry uppercase characters regardless of which caller
//! produced it.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
	ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
	QueryOrder, QuerySelect, Set, SqlErr,
};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::entities::entry;
use crate::domain::{normalize_name, CreateEntry, Entry, UpdateEntry};

#[derive(Error, Debug)]
pub enum StoreError {
	#[error("unique constraint violated: {field} = {value}")]
	UniqueViolation { field: &'static str, value: String },

	#[error(transparent)]
	Db(#[from] DbErr),
}

/// Point lookups over the three key spaces plus the write and listing
/// operations the catalog needs.
#[async_trait]
pub trait EntryStore: Send + Sync {
	async fn insert_one(&self, entry: CreateEntry) -> Result<Entry, StoreError>;

	/// Inserts the whole batch in a single statement. Returns the row count.
	async fn insert_many(&self, entries: Vec<CreateEntry>) -> Result<u64, StoreError>;

	async fn find_by_no(&self, no: i64) -> Result<Option<Entry>, StoreError>;

	async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, StoreError>;

	async fn find_by_name(&self, name: &str) -> Result<Option<Entry>, StoreError>;

	/// Writes the present fields of `changes` onto the entry with `id`.
	/// Returns the number of rows touched.
	async fn update_one(&self, id: Uuid, changes: &UpdateEntry) -> Result<u64, StoreError>;

	/// Returns the number of rows deleted (0 or 1).
	async fn delete_one(&self, id: Uuid) -> Result<u64, StoreError>;

	async fn delete_all(&self) -> Result<u64, StoreError>;

	/// Entries ordered by ascending `no`, windowed after ordering.
	async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Entry>, StoreError>;
}

pub struct SqlEntryStore {
	conn: DatabaseConnection,
}

impl SqlEntryStore {
	pub fn new(conn: DatabaseConnection) -> Self {
		Self { conn }
	}
}

#[async_trait]
impl EntryStore for SqlEntryStore {
	async fn insert_one(&self, input: CreateEntry) -> Result<Entry, StoreError> {
		let now = Utc::now();
		let no = input.no;
		let name = normalize_name(&input.name);

		let model = entry::ActiveModel {
			id: Set(Uuid::new_v4()),
			no: Set(no),
			name: Set(name.clone()),
			created_at: Set(now),
			updated_at: Set(now),
		};

		model
			.insert(&self.conn)
			.await
			.map(Entry::from)
			.map_err(|e| {
				classify(e, |field| match field {
					"no" => Some(no.to_string()),
					"name" => Some(name),
					_ => None,
				})
			})
	}

	async fn insert_many(&self, inputs: Vec<CreateEntry>) -> Result<u64, StoreError> {
		if inputs.is_empty() {
			return Ok(0);
		}

		let now = Utc::now();
		let models = inputs.into_iter().map(|input| entry::ActiveModel {
			id: Set(Uuid::new_v4()),
			no: Set(input.no),
			name: Set(normalize_name(&input.name)),
			created_at: Set(now),
			updated_at: Set(now),
		});

		let inserted = entry::Entity::insert_many(models)
			.exec_without_returning(&self.conn)
			.await
			.map_err(|e| classify(e, |_| None))?;

		debug!(inserted, "Bulk inserted entries");

		Ok(inserted)
	}

	async fn find_by_no(&self, no: i64) -> Result<Option<Entry>, StoreError> {
		Ok(entry::Entity::find()
			.filter(entry::Column::No.eq(no))
			.one(&self.conn)
			.await?
			.map(Entry::from))
	}

	async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, StoreError> {
		Ok(entry::Entity::find_by_id(id)
			.one(&self.conn)
			.await?
			.map(Entry::from))
	}

	async fn find_by_name(&self, name: &str) -> Result<Option<Entry>, StoreError> {
		Ok(entry::Entity::find()
			.filter(entry::Column::Name.eq(name))
			.one(&self.conn)
			.await?
			.map(Entry::from))
	}

	async fn update_one(&self, id: Uuid, changes: &UpdateEntry) -> Result<u64, StoreError> {
		let name = changes.name.as_deref().map(normalize_name);

		let model = entry::ActiveModel {
			id: NotSet,
			no: changes.no.map_or(NotSet, Set),
			name: name.clone().map_or(NotSet, Set),
			created_at: NotSet,
			updated_at: Set(Utc::now()),
		};

		let result = entry::Entity::update_many()
			.set(model)
			.filter(entry::Column::Id.eq(id))
			.exec(&self.conn)
			.await
			.map_err(|e| {
				classify(e, |field| match field {
					"no" => changes.no.map(|no| no.to_string()),
					"name" => name,
					_ => None,
				})
			})?;

		Ok(result.rows_affected)
	}

	async fn delete_one(&self, id: Uuid) -> Result<u64, StoreError> {
		Ok(entry::Entity::delete_by_id(id)
			.exec(&self.conn)
			.await?
			.rows_affected)
	}

	async fn delete_all(&self) -> Result<u64, StoreError> {
		Ok(entry::Entity::delete_many()
			.exec(&self.conn)
			.await?
			.rows_affected)
	}

	async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Entry>, StoreError> {
		Ok(entry::Entity::find()
			.order_by_asc(entry::Column::No)
			.limit(limit)
			.offset(offset)
			.all(&self.conn)
			.await?
			.into_iter()
			.map(Entry::from)
			.collect())
	}
}

/// Turns a unique-constraint failure into `UniqueViolation` when the offending
/// column can be identified and `value_of` knows what was written to it.
fn classify(err: DbErr, value_of: impl FnOnce(&'static str) -> Option<String>) -> StoreError {
	let field = match err.sql_err() {
		Some(SqlErr::UniqueConstraintViolation(message)) => violated_column(&message),
		_ => None,
	};

	match field.and_then(|field| value_of(field).map(|value| (field, value))) {
		Some((field, value)) => StoreError::UniqueViolation { field, value },
		None => StoreError::Db(err),
	}
}

/// Pulls the column out of a driver message, e.g.
/// `UNIQUE constraint failed: entries.name` or
/// `duplicate key value violates unique constraint "idx_entries_no"`.
fn violated_column(message: &str) -> Option<&'static str> {
	let token = message
		.trim()
		.rsplit(|c: char| c == '.' || c == ' ' || c == '"')
		.find(|token| !token.is_empty())?;

	match token {
		"no" | "idx_entries_no" => Some("no"),
		"name" | "idx_entries_name" => Some("name"),
		_ => None,
	}
}
