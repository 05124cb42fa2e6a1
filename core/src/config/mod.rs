//! Application configuration management

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::ops::seed::{source::DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};

pub mod app_config;
pub mod migration;

pub use app_config::AppConfig;
pub use migration::Migrate;

/// Platform-specific data directory resolution
pub fn default_data_dir() -> Result<PathBuf> {
	#[cfg(target_os = "linux")]
	let dir = dirs::data_local_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("pokedex");

	#[cfg(not(target_os = "linux"))]
	let dir = dirs::data_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("Pokedex");

	// Create directory if it doesn't exist
	fs::create_dir_all(&dir)?;

	Ok(dir)
}

/// Where and how much to pull when seeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
	/// Base URL of the remote catalog API
	pub base_url: String,

	/// Records requested in the single seed request
	pub page_size: u32,
}

impl Default for SeedConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			page_size: DEFAULT_PAGE_SIZE,
		}
	}
}
