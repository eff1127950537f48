use crate::config::parser::{parse_config_file, parse_config_str};
use crate::config::paths::expand_path;
use crate::config::types::Configuration;
use crate::error::Result;
use crate::logger::{Logger, TracingLogger};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Repository-level configuration file, usually committed.
pub const REPO_CONFIG_FILE: &str = ".overcommit.yml";

/// Personal override file, usually untracked.
pub const LOCAL_CONFIG_FILE: &str = ".local-overcommit.yml";

const DEFAULT_CONFIG: &str = include_str!("../../config/default.yml");

static DEFAULT_CONFIGURATION: LazyLock<Configuration> = LazyLock::new(|| {
	parse_config_str(DEFAULT_CONFIG, Path::new("config/default.yml"))
		.expect("built-in default configuration must be valid")
});

/// The built-in configuration every load starts from.
pub fn default_configuration() -> &'static Configuration {
	&DEFAULT_CONFIGURATION
}

/// Deep-merge overlays over a base configuration.
///
/// Overlays are applied in order, later ones taking precedence; `None`
/// entries are skipped. Returns the merged configuration together with a
/// warning for every hook entry left without an explicit `enabled` key.
pub fn merge<'a, I>(base: &Configuration, overlays: I) -> (Configuration, Vec<String>)
where
	I: IntoIterator<Item = Option<&'a Configuration>>,
{
	let mut hash = base.as_mapping().clone();
	for overlay in overlays.into_iter().flatten() {
		deep_merge(&mut hash, overlay.as_mapping());
	}

	let merged = Configuration::new(hash);
	let warnings = unset_hook_warnings(&merged);
	(merged, warnings)
}

/// Recursively merge `overlay` into `base`.
///
/// Keys present in both whose values are both mappings are merged per key;
/// any other overlay value replaces the base value outright.
fn deep_merge(base: &mut Mapping, overlay: &Mapping) {
	for (key, value) in overlay {
		if let (Some(Value::Mapping(existing)), Value::Mapping(incoming)) = (base.get_mut(key), value)
		{
			deep_merge(existing, incoming);
			continue;
		}
		base.insert(key.clone(), value.clone());
	}
}

fn unset_hook_warnings(config: &Configuration) -> Vec<String> {
	let mut warnings = Vec::new();
	for hook_type in config.hook_types() {
		for hook_name in config.hook_names(hook_type.as_str()) {
			if !config
				.for_hook(&hook_name, hook_type.as_str())
				.contains_key("enabled")
			{
				warnings.push(format!(
					"`{hook_type}::{hook_name}` hook is not explicitly enabled or disabled; \
					 it will not run unless marked `enabled: true`"
				));
			}
		}
	}
	warnings
}

/// Loads the effective configuration for a repository.
///
/// Precedence, lowest first:
/// 1. The built-in defaults
/// 2. `.overcommit.yml` at the repository root
/// 3. `.local-overcommit.yml` at the repository root
///
/// Either file may be absent.
#[derive(Debug)]
pub struct ConfigurationLoader<L: Logger = TracingLogger> {
	repo_root: PathBuf,
	logger: L,
}

impl ConfigurationLoader<TracingLogger> {
	/// Create a loader that reports warnings through `tracing`.
	pub fn with_tracing(repo_root: impl Into<PathBuf>) -> Self {
		Self::new(repo_root, TracingLogger)
	}
}

impl<L: Logger> ConfigurationLoader<L> {
	/// Relative paths in configuration files are resolved against `repo_root`.
	/// A relative `repo_root` is taken from the current directory.
	pub fn new(repo_root: impl Into<PathBuf>, logger: L) -> Self {
		Self {
			repo_root: repo_root.into(),
			logger,
		}
	}

	pub fn repo_config_path(&self) -> PathBuf {
		self.repo_root.join(REPO_CONFIG_FILE)
	}

	pub fn local_config_path(&self) -> PathBuf {
		self.repo_root.join(LOCAL_CONFIG_FILE)
	}

	/// Recover the logger, e.g. to inspect captured output.
	pub fn into_logger(self) -> L {
		self.logger
	}

	/// Load defaults, the repository file and the local file, in that order.
	pub fn load_repo_config(&self) -> Result<Configuration> {
		let repo_config = self.load_optional(&self.repo_config_path())?;
		let local_config = self.load_optional(&self.local_config_path())?;

		let (config, warnings) = merge(
			default_configuration(),
			[repo_config.as_ref(), local_config.as_ref()],
		);

		for warning in &warnings {
			self.logger.warning(warning);
		}

		Ok(config)
	}

	/// Parse a single configuration file, resolving its `plugin_directory`
	/// against the repository root.
	pub fn load_file(&self, path: &Path) -> Result<Configuration> {
		let config = parse_config_file(path)?;

		let Some(plugin_directory) = config.get("plugin_directory").and_then(Value::as_str) else {
			return Ok(config);
		};

		let resolved = expand_path(plugin_directory, &self.repo_root)?;
		let mut hash = config.as_mapping().clone();
		hash.insert(
			Value::from("plugin_directory"),
			Value::from(resolved.to_string_lossy().into_owned()),
		);
		Ok(Configuration::new(hash))
	}

	fn load_optional(&self, path: &Path) -> Result<Option<Configuration>> {
		if !path.exists() {
			tracing::debug!(path = %path.display(), "config file not present, skipping");
			return Ok(None);
		}

		tracing::debug!(path = %path.display(), "loading config file");
		self.load_file(path).map(Some)
	}
}

/// Convenience function to load the effective configuration of a repository,
/// reporting warnings through `tracing`.
pub fn load_repo_config(repo_root: &Path) -> Result<Configuration> {
	ConfigurationLoader::with_tracing(repo_root).load_repo_config()
}
