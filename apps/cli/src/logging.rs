//! Console and rolling file logging for the CLI

use anyhow::{anyhow, Result};
use pd_core::config::AppConfig;
use tracing::Subscriber;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Stderr-only subscriber for events emitted before the config, and with it
/// the log directory and level, is known.
pub fn bootstrap() -> impl Subscriber + Send + Sync {
	tracing_subscriber::registry()
		.with(env_filter("pd_core=info,pokedex=info".to_string()))
		.with(fmt::layer().with_target(true).with_writer(std::io::stderr))
}

/// Sets up logging to stderr and `<data_dir>/logs/pokedex.log.<date>`.
///
/// `RUST_LOG` wins over the configured level. Keep the returned guard alive
/// until exit or buffered file output is lost.
pub fn init(config: &AppConfig) -> Result<WorkerGuard> {
	let logs_dir = config.logs_dir();
	std::fs::create_dir_all(&logs_dir)?;

	let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(logs_dir, "pokedex.log"));

	let default_filter = format!("pd_core={level},pokedex={level}", level = config.log_level);

	tracing_subscriber::registry()
		.with(env_filter(default_filter))
		.with(fmt::layer().with_target(true).with_writer(std::io::stderr))
		.with(
			fmt::layer()
				.with_target(true)
				.with_ansi(false) // No ANSI colors in log files
				.with_writer(file_writer),
		)
		.try_init()
		.map_err(|e| anyhow!("Failed to initialize tracing: {e}"))?;

	Ok(guard)
}

fn env_filter(default: String) -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
