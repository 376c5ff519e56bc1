use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use confseek::config::{CandidateStatus, Manager};
use confseek::{ConfigError, logging};

#[derive(Parser)]
#[command(name = "confseek")]
#[command(
	author,
	version,
	about = "Find, load and overlay TOML configuration files from a prioritized set of locations"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Name of the config file to look for
	#[arg(short, long, value_name = "FILE_NAME", default_value = "config.toml", global = true)]
	name: String,

	/// Directory searched before the standard locations
	#[arg(short = 'd', long, value_name = "DIR", global = true)]
	config_dir: Option<PathBuf>,

	/// TOML document with the default values
	#[arg(long, value_name = "FILE", global = true)]
	defaults: Option<PathBuf>,

	/// Log every candidate that is tried
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// List candidate config paths in priority order
	Paths,
	/// Print the effective configuration (defaults overlaid by the first valid file)
	Show {
		/// Generate a default config file and exit when none is found
		#[arg(long)]
		autoload: bool,
	},
	/// Check every candidate config file without loading anything
	Check,
	/// Write the default config into the current directory
	Init {
		/// Overwrite an existing config file
		#[arg(long)]
		force: bool,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	logging::init(if cli.verbose { "debug" } else { "info" });

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: Cli) -> Result<ExitCode> {
	let defaults = read_defaults(cli.defaults.as_deref())?;
	let config_dir = cli.config_dir.as_deref();

	match cli.command {
		Commands::Paths => handle_paths(defaults, config_dir, &cli.name),
		Commands::Show { autoload } => handle_show(defaults, config_dir, &cli.name, autoload),
		Commands::Check => handle_check(defaults, config_dir, &cli.name),
		Commands::Init { force } => handle_init(defaults, config_dir, &cli.name, force),
	}
}

fn read_defaults(path: Option<&Path>) -> Result<String> {
	match path {
		Some(path) => std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read defaults from {}", path.display())),
		None => Ok(String::new()),
	}
}

fn build_manager(
	defaults: String,
	config_dir: Option<&Path>,
	name: &str,
	autoload: bool,
) -> confseek::Result<Manager<toml::Table>> {
	Manager::new(defaults, config_dir, name, toml::Table::new(), autoload)
}

fn handle_paths(defaults: String, config_dir: Option<&Path>, name: &str) -> Result<ExitCode> {
	let manager =
		build_manager(defaults, config_dir, name, false).context("Failed to prepare config search")?;

	println!("Candidate config paths (in priority order):\n");
	for path in manager.search_paths().candidates() {
		let state = if path.exists() { "exists" } else { "not found" };
		println!("  {} ({})", path.display(), state);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_show(
	defaults: String,
	config_dir: Option<&Path>,
	name: &str,
	autoload: bool,
) -> Result<ExitCode> {
	let mut manager = match build_manager(defaults, config_dir, name, autoload) {
		Ok(manager) => manager,
		Err(err) => return exit_for(err),
	};

	if !autoload {
		match manager.load_config() {
			Ok(_) => {}
			Err(ConfigError::NoConfigFound) => {
				eprintln!("No configuration files found, showing defaults.");
			}
			Err(e) => return Err(e).context("Failed to load configuration"),
		}
	}

	if let Some(path) = manager.source_path() {
		println!("# Source: {}", path.display());
	} else {
		println!("# Source: defaults");
	}
	let rendered =
		toml::to_string(manager.config()).context("Failed to render configuration")?;
	print!("{}", rendered);

	Ok(ExitCode::SUCCESS)
}

/// Turn an autoload signal into the process exit status it asks for.
fn exit_for(err: ConfigError) -> Result<ExitCode> {
	match err.exit_code() {
		Some(0) => {
			if let ConfigError::DefaultWritten { path } = &err {
				println!("Created {}", path.display());
			}
			Ok(ExitCode::SUCCESS)
		}
		Some(code) => {
			eprintln!("{}", err);
			if let Some(remediation) = err.remediation() {
				println!("{}", remediation);
			}
			Ok(ExitCode::from(code))
		}
		None => Err(err).context("Failed to prepare configuration"),
	}
}

fn handle_check(defaults: String, config_dir: Option<&Path>, name: &str) -> Result<ExitCode> {
	let manager =
		build_manager(defaults, config_dir, name, false).context("Failed to prepare config search")?;

	let reports = manager.inspect();
	let mut found = false;
	let mut active_marked = false;
	let mut invalid = 0;

	for report in &reports {
		match &report.status {
			CandidateStatus::Missing(_) => {}
			CandidateStatus::Invalid(err) => {
				found = true;
				invalid += 1;
				println!("  [invalid] {}: {}", report.path.display(), error_chain(err));
			}
			CandidateStatus::Valid => {
				found = true;
				let marker = if active_marked { "" } else { " (active)" };
				active_marked = true;
				println!("  [valid] {}{}", report.path.display(), marker);
			}
		}
	}

	if !found {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	if invalid > 0 {
		eprintln!("Configuration error: {} invalid file(s)", invalid);
		return Ok(ExitCode::FAILURE);
	}

	Ok(ExitCode::SUCCESS)
}

fn error_chain(err: &ConfigError) -> String {
	match std::error::Error::source(err) {
		Some(source) => format!("{}: {}", err, source.to_string().trim_end()),
		None => err.to_string(),
	}
}

fn handle_init(
	defaults: String,
	config_dir: Option<&Path>,
	name: &str,
	force: bool,
) -> Result<ExitCode> {
	let manager = build_manager(defaults, config_dir, name, false)
		.context("Failed to decode default config")?;

	let path = manager.search_paths().default_target();
	if path.exists() && !force {
		anyhow::bail!("{} already exists. Use --force to overwrite.", path.display());
	}

	manager
		.write_default(force)
		.with_context(|| format!("Failed to write {}", path.display()))?;

	println!("Created {}", path.display());
	Ok(ExitCode::SUCCESS)
}
