//! Remote catalog source
//!
//! The pipeline only needs one thing from the outside world: a page of
//! `{ name, url }` records. [`PokeApiSource`] gets it from PokéAPI.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
	#[error("request to {url} failed: {source}")]
	Request {
		url: String,
		#[source]
		source: reqwest::Error,
	},
	#[error("{0}")]
	Other(String),
}

/// One listing page as returned by the remote catalog.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PokeResponse {
	#[serde(default)]
	pub count: u64,
	#[serde(default)]
	pub next: Option<String>,
	#[serde(default)]
	pub previous: Option<String>,
	pub results: Vec<NamedResource>,
}

/// A record in a listing page: a display name and the resource's own URL.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NamedResource {
	pub name: String,
	pub url: String,
}

impl NamedResource {
	pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			url: url.into(),
		}
	}
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
	/// Fetches the first `limit` records in a single request.
	async fn fetch_page(&self, limit: u32) -> Result<PokeResponse, SourceError>;
}

pub struct PokeApiSource {
	client: reqwest::Client,
	base_url: String,
}

impl PokeApiSource {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			client: reqwest::Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_string(),
		}
	}
}

#[async_trait]
impl CatalogSource for PokeApiSource {
	async fn fetch_page(&self, limit: u32) -> Result<PokeResponse, SourceError> {
		let url = format!("{}/pokemon?limit={}", self.base_url, limit);
		debug!(%url, "Fetching remote catalog page");

		let request_error = |source| SourceError::Request {
			url: url.clone(),
			source,
		};

		self.client
			.get(&url)
			.send()
			.await
			.and_then(|r| r.error_for_status())
			.map_err(request_error)?
			.json()
			.await
			.map_err(request_error)
	}
}
