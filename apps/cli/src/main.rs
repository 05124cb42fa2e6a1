use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pd_core::{
	config::{default_data_dir, AppConfig},
	Core, CreateEntry, Pagination, UpdateEntry,
};
use serde_json::json;
use tracing::debug;

mod logging;

#[derive(Parser, Debug)]
#[command(name = "pokedex", version, about = "Pokémon catalog backed by a local database")]
struct Cli {
	/// Directory holding the config, database and logs
	#[arg(long, global = true, env = "POKEDEX_DATA_DIR")]
	data_dir: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Replace the catalog with a snapshot of PokéAPI
	Seed,

	/// Look up one pokemon by number, id or name
	Get {
		term: String,
	},

	/// List pokemon ordered by number
	List {
		#[arg(short, long)]
		limit: Option<u64>,
		#[arg(short, long)]
		offset: Option<u64>,
	},

	/// Add a pokemon
	Create {
		#[arg(long)]
		name: String,
		#[arg(long)]
		no: i64,
	},

	/// Change the name and/or number of a pokemon
	Update {
		/// Number, id or name of the pokemon to change
		term: String,
		#[arg(long)]
		name: Option<String>,
		#[arg(long)]
		no: Option<i64>,
	},

	/// Delete a pokemon by id
	Remove {
		id: String,
	},

	/// Print the active configuration
	Config,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	let data_dir = match cli.data_dir {
		Some(dir) => dir,
		None => default_data_dir()?,
	};
	let config = tracing::subscriber::with_default(logging::bootstrap(), || {
		AppConfig::load_from(&data_dir)
	})?;
	let _guard = logging::init(&config)?;

	debug!(command = ?cli.command, "Running command");

	let core = Core::new(config).await?;

	match cli.command {
		Command::Seed => {
			let summary = core.seed.execute_seed().await?;
			println!("{summary}");
		}
		Command::Get { term } => print(&core.catalog.find_one(&term).await?)?,
		Command::List { limit, offset } => {
			print(&core.catalog.find_all(Pagination { limit, offset }).await?)?
		}
		Command::Create { name, no } => {
			print(&core.catalog.create(CreateEntry::new(name, no)).await?)?
		}
		Command::Update { term, name, no } => {
			print(&core.catalog.update(&term, UpdateEntry { name, no }).await?)?
		}
		Command::Remove { id } => {
			core.catalog.remove(&id).await?;
			print(&json!({ "removed": id }))?;
		}
		Command::Config => print(&core.config)?,
	}

	Ok(())
}

fn print(value: &impl serde::Serialize) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}
