//! Catalog error taxonomy

use thiserror::Error;
use tracing::error;

use crate::infra::db::StoreError;

/// Errors surfaced to whoever drives the catalog (CLI, HTTP layer, tests).
///
/// `NotFound` and `Conflict` carry identifying detail for the caller. `Internal`
/// only ever carries a generic message; the underlying failure goes to the logs.
#[derive(Error, Debug)]
pub enum CatalogError {
	#[error("Pokemon with id, name or no \"{0}\" not found")]
	NotFound(String),

	#[error("Pokemon exists in db {{ {field}: {value} }}")]
	Conflict { field: &'static str, value: String },

	#[error("{0}")]
	InvalidArgument(String),

	#[error("{0}")]
	Internal(String),
}

impl CatalogError {
	/// Generic failure for `action`, logging `cause` in full for operators.
	pub fn internal(action: &str, cause: impl std::fmt::Display) -> Self {
		error!(%action, "{cause:#}");
		Self::Internal(format!("Cannot {action} pokemon - check server logs"))
	}
}

/// Maps a store failure onto the catalog taxonomy: unique violations become
/// `Conflict`, everything else is `Internal`.
pub fn handle_store_error(action: &str, err: StoreError) -> CatalogError {
	match err {
		StoreError::UniqueViolation { field, value } => CatalogError::Conflict { field, value },
		other => CatalogError::internal(action, other),
	}
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn conflict_names_field_and_value() {
		let err = handle_store_error(
			"create",
			StoreError::UniqueViolation {
				field: "name",
				value: "pikachu".to_string(),
			},
		);

		assert_eq!(err.to_string(), "Pokemon exists in db { name: pikachu }");
	}

	#[test]
	fn internal_hides_store_detail() {
		let err = handle_store_error(
			"update",
			StoreError::Db(sea_orm::DbErr::Custom("disk I/O error at page 42".into())),
		);

		assert!(matches!(err, CatalogError::Internal(_)));
		assert!(!err.to_string().contains("page 42"));
	}
}
