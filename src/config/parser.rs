use crate::config::types::{Configuration, HookType};
use crate::error::{ConfigError, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Configuration> {
	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
///
/// An empty document yields an empty configuration. Empty hook-type groups
/// and empty hook entries become empty mappings so that merging them
/// never erases defaults.
pub fn parse_config_str(content: &str, path: &Path) -> Result<Configuration> {
	let document: Value =
		serde_yaml::from_str(content).map_err(|source| ConfigError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	let mut hash = match document {
		Value::Null => Mapping::new(),
		Value::Mapping(hash) => hash,
		_ => {
			return Err(ConfigError::InvalidDocument {
				path: path.to_path_buf(),
			});
		}
	};

	normalize_groups(&mut hash);
	validate(&hash, path)?;

	Ok(Configuration::new(hash))
}

fn normalize_groups(hash: &mut Mapping) {
	for (key, group) in hash.iter_mut() {
		if HookType::from_key(key).is_none() {
			continue;
		}

		if group.is_null() {
			*group = Value::Mapping(Mapping::new());
		}

		if let Value::Mapping(entries) = group {
			for (_, entry) in entries.iter_mut() {
				if entry.is_null() {
					*entry = Value::Mapping(Mapping::new());
				}
			}
		}
	}
}

/// Check the shape of every hook entry: entries are mappings, `enabled` is a
/// boolean and `command` is a string or a list of strings.
fn validate(hash: &Mapping, path: &Path) -> Result<()> {
	if let Some(plugin_directory) = hash.get("plugin_directory")
		&& !plugin_directory.is_string()
	{
		return Err(invalid(path, "plugin_directory".to_string(), "a path string"));
	}

	for (key, group) in hash {
		let Some(hook_type) = HookType::from_key(key) else {
			continue;
		};
		let Value::Mapping(entries) = group else {
			return Err(invalid(
				path,
				hook_type.to_string(),
				"a mapping of hook entries",
			));
		};

		for (hook_name, entry) in entries {
			let Some(hook_name) = hook_name.as_str() else {
				return Err(invalid(
					path,
					format!("{hook_type}::{}", key_text(hook_name)),
					"a string hook name",
				));
			};
			let hook = format!("{hook_type}::{hook_name}");

			let Value::Mapping(options) = entry else {
				return Err(invalid(path, hook, "a mapping of hook options"));
			};

			if let Some(enabled) = options.get("enabled")
				&& !enabled.is_bool()
			{
				return Err(invalid(path, format!("{hook}.enabled"), "true or false"));
			}

			if let Some(command) = options.get("command")
				&& !is_command(command)
			{
				return Err(invalid(
					path,
					format!("{hook}.command"),
					"a string or a list of strings",
				));
			}
		}
	}

	Ok(())
}

fn is_command(value: &Value) -> bool {
	match value {
		Value::String(_) => true,
		Value::Sequence(parts) => parts.iter().all(Value::is_string),
		_ => false,
	}
}

fn key_text(key: &Value) -> String {
	serde_yaml::to_string(key)
		.map(|text| text.trim_end().to_string())
		.unwrap_or_else(|_| "<unprintable key>".to_string())
}

fn invalid(path: &Path, key: String, expected: &'static str) -> ConfigError {
	ConfigError::InvalidOption {
		path: path.to_path_buf(),
		key,
		expected,
	}
}
