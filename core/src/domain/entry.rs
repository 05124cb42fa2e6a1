//! Entry domain model - one numbered, named record in the catalog

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default page size for `find_all` when the caller does not provide one.
pub const DEFAULT_LIMIT: u64 = 10;

/// A catalog entry as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
	/// Store-assigned identifier, never reused after deletion
	pub id: Uuid,

	/// Catalog sequence number
	pub no: i64,

	/// Always lowercase once it has been written through the store
	pub name: String,
}

/// Input for creating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEntry {
	pub name: String,
	pub no: i64,
}

impl CreateEntry {
	pub fn new(name: impl Into<String>, no: i64) -> Self {
		Self {
			name: name.into(),
			no,
		}
	}
}

/// Partial input for updating an entry. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEntry {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub no: Option<i64>,
}

impl UpdateEntry {
	pub fn is_empty(&self) -> bool {
		self.name.is_none() && self.no.is_none()
	}

	/// Overlays these changes onto `entry`, returning the merged view.
	pub fn apply_to(&self, entry: Entry) -> Entry {
		Entry {
			id: entry.id,
			no: self.no.unwrap_or(entry.no),
			name: self.name.clone().unwrap_or(entry.name),
		}
	}
}

/// Paging window for listing entries, ordered by `no`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	pub limit: Option<u64>,
	pub offset: Option<u64>,
}

impl Pagination {
	pub fn new(limit: u64, offset: u64) -> Self {
		Self {
			limit: Some(limit),
			offset: Some(offset),
		}
	}

	pub fn limit(&self) -> u64 {
		self.limit.unwrap_or(DEFAULT_LIMIT)
	}

	pub fn offset(&self) -> u64 {
		self.offset.unwrap_or(0)
	}
}

/// Canonical form of an entry name. Every write into the store goes through this.
pub fn normalize_name(name: &str) -> String {
	name.to_lowercase()
}
