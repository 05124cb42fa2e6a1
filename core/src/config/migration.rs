//! Versioned config upgrades

use anyhow::Result;

pub trait Migrate {
	fn current_version(&self) -> u32;

	fn target_version() -> u32;

	fn migrate(&mut self) -> Result<()>;
}
