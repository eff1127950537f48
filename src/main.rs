use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_yaml::Mapping;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use overcommit_cli::config::{ConfigurationLoader, HookEnabled, HookType, REPO_CONFIG_FILE};
use overcommit_cli::logger::StreamLogger;
use overcommit_cli::repo::find_repo_root;

const SAMPLE_CONFIG: &str = r#"# Overrides for the built-in hook configuration.
#
# Settings here are deep-merged over the defaults: only the keys you list
# change. Personal, untracked overrides belong in .local-overcommit.yml.

# Directory holding repository-specific hook implementations, relative to
# the repository root.
plugin_directory: '.git-hooks'

PreCommit:
  TrailingWhitespace:
    enabled: true

  # Rubocop:
  #   enabled: true
  #   command: ['bundle', 'exec', 'rubocop']

CommitMsg:
  TextWidth:
    enabled: true
    max_subject_width: 60
"#;

#[derive(Parser)]
#[command(name = "overcommit")]
#[command(
	author,
	version,
	about = "Layered configuration for git hooks with repository and local overrides"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Repository root to use instead of searching upward for `.git`
	#[arg(long, global = true, value_name = "DIR")]
	repo: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration inspection commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
	/// Create a template .overcommit.yml at the repository root
	Init {
		/// Overwrite an existing .overcommit.yml
		#[arg(long)]
		force: bool,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Print the merged effective configuration as YAML
	Show,
	/// Check the configuration files for errors
	Validate,
	/// Print the merged options of a single hook
	Hook {
		/// Hook type, e.g. PreCommit or CommitMsg
		hook_type: HookType,
		/// Hook name, e.g. Rubocop
		hook_name: String,
	},
}

#[derive(Serialize)]
struct HookReport<'a> {
	hook: String,
	status: HookEnabled,
	options: &'a Mapping,
}

fn main() -> ExitCode {
	init_tracing();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	let repo_root = resolve_repo_root(cli.repo.as_deref())?;

	match cli.command {
		Commands::Config { action } => match action {
			ConfigAction::Show => handle_config_show(&repo_root),
			ConfigAction::Validate => handle_config_validate(&repo_root),
			ConfigAction::Hook {
				hook_type,
				hook_name,
			} => handle_config_hook(&repo_root, hook_type, &hook_name),
		},
		Commands::Init { force } => handle_init(&repo_root, force),
	}
}

fn resolve_repo_root(explicit: Option<&Path>) -> Result<PathBuf> {
	if let Some(dir) = explicit {
		return std::path::absolute(dir)
			.with_context(|| format!("Failed to resolve {}", dir.display()));
	}

	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	find_repo_root(&cwd).context("Failed to locate repository root")
}

fn stderr_loader(repo_root: &Path) -> ConfigurationLoader<StreamLogger<std::io::Stderr>> {
	ConfigurationLoader::new(repo_root, StreamLogger::new(std::io::stderr()))
}

fn handle_config_show(repo_root: &Path) -> Result<ExitCode> {
	let config = stderr_loader(repo_root)
		.load_repo_config()
		.context("Failed to load configuration")?;

	print!("{}", config.to_yaml()?);
	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(repo_root: &Path) -> Result<ExitCode> {
	let loader = stderr_loader(repo_root);

	match loader.load_repo_config() {
		Ok(config) => {
			println!("Configuration is valid.");
			for path in [loader.repo_config_path(), loader.local_config_path()] {
				let state = if path.exists() { "loaded" } else { "not found" };
				println!("  {} ({})", path.display(), state);
			}
			for hook_type in config.hook_types() {
				println!(
					"  {}: {} enabled",
					hook_type,
					config.enabled_hooks(hook_type.as_str()).len()
				);
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {:#}", anyhow::Error::from(e));
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_config_hook(repo_root: &Path, hook_type: HookType, hook_name: &str) -> Result<ExitCode> {
	let config = stderr_loader(repo_root)
		.load_repo_config()
		.context("Failed to load configuration")?;

	let options = config.for_hook(hook_name, hook_type.as_str());
	let report = HookReport {
		hook: format!("{hook_type}::{hook_name}"),
		status: config.hook_enabled(hook_name, hook_type.as_str()),
		options: &options,
	};

	print!(
		"{}",
		serde_yaml::to_string(&report).context("Failed to render hook options")?
	);
	Ok(ExitCode::SUCCESS)
}

fn handle_init(repo_root: &Path, force: bool) -> Result<ExitCode> {
	let config_path = repo_root.join(REPO_CONFIG_FILE);

	if config_path.exists() && !force {
		anyhow::bail!("{REPO_CONFIG_FILE} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, SAMPLE_CONFIG)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {}", config_path.display());
	Ok(ExitCode::SUCCESS)
}
