use crate::error::{ConfigError, Result};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Plugin directory used when no configuration document names one.
pub const DEFAULT_PLUGIN_DIRECTORY: &str = ".git-hooks";

/// Git lifecycle points that group hook entries in a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookType {
	CommitMsg,
	PreCommit,
	PostCheckout,
	PostCommit,
	PostMerge,
	PostRewrite,
	PrePush,
	PreRebase,
}

impl HookType {
	/// All known hook types.
	pub const ALL: [HookType; 8] = [
		HookType::PreCommit,
		HookType::CommitMsg,
		HookType::PostCommit,
		HookType::PostCheckout,
		HookType::PostMerge,
		HookType::PostRewrite,
		HookType::PrePush,
		HookType::PreRebase,
	];

	/// Recognize a top-level document key as a hook-type group.
	pub fn from_key(key: &Value) -> Option<HookType> {
		key.as_str().and_then(|name| name.parse().ok())
	}

	/// Get the group key used for this hook type in configuration documents.
	pub fn as_str(&self) -> &'static str {
		match self {
			HookType::CommitMsg => "CommitMsg",
			HookType::PreCommit => "PreCommit",
			HookType::PostCheckout => "PostCheckout",
			HookType::PostCommit => "PostCommit",
			HookType::PostMerge => "PostMerge",
			HookType::PostRewrite => "PostRewrite",
			HookType::PrePush => "PrePush",
			HookType::PreRebase => "PreRebase",
		}
	}
}

impl fmt::Display for HookType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for HookType {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		HookType::ALL
			.into_iter()
			.find(|hook_type| hook_type.as_str() == s)
			.ok_or_else(|| format!("unknown hook type: {s}"))
	}
}

/// Whether a hook entry is switched on.
///
/// An entry without an `enabled` key is `Unset`, which is kept apart from
/// `Disabled` so callers can decide how to treat incomplete entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookEnabled {
	Enabled,
	Disabled,
	Unset,
}

impl HookEnabled {
	pub fn is_enabled(&self) -> bool {
		matches!(self, HookEnabled::Enabled)
	}
}

/// An effective configuration: a YAML document tree of hook-type groups,
/// hook entries and top-level settings such as `plugin_directory`.
///
/// Values are never mutated once built; merging produces a new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
	hash: Mapping,
}

impl Configuration {
	pub fn new(hash: Mapping) -> Self {
		Self { hash }
	}

	/// The underlying document tree.
	pub fn as_mapping(&self) -> &Mapping {
		&self.hash
	}

	/// Look up a top-level key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.hash.get(key)
	}

	/// Fully merged options for a hook, or an empty mapping if the hook
	/// has no entry.
	pub fn for_hook(&self, hook_name: &str, hook_type: &str) -> Mapping {
		self.hook_entry(hook_name, hook_type)
			.cloned()
			.unwrap_or_default()
	}

	fn hook_entry(&self, hook_name: &str, hook_type: &str) -> Option<&Mapping> {
		self.hash
			.get(hook_type)
			.and_then(Value::as_mapping)
			.and_then(|group| group.get(hook_name))
			.and_then(Value::as_mapping)
	}

	/// The tri-state `enabled` flag of a hook.
	pub fn hook_enabled(&self, hook_name: &str, hook_type: &str) -> HookEnabled {
		match self
			.hook_entry(hook_name, hook_type)
			.and_then(|entry| entry.get("enabled"))
			.and_then(Value::as_bool)
		{
			Some(true) => HookEnabled::Enabled,
			Some(false) => HookEnabled::Disabled,
			None => HookEnabled::Unset,
		}
	}

	/// The `command` option of a hook as an argument vector.
	///
	/// A single string is treated as a one-element command.
	pub fn hook_command(&self, hook_name: &str, hook_type: &str) -> Option<Vec<String>> {
		let command = self.hook_entry(hook_name, hook_type)?.get("command")?;
		match command {
			Value::String(program) => Some(vec![program.clone()]),
			Value::Sequence(parts) => parts
				.iter()
				.map(|part| part.as_str().map(str::to_string))
				.collect(),
			_ => None,
		}
	}

	/// Hook-type groups present in the document, in document order.
	pub fn hook_types(&self) -> Vec<HookType> {
		self.hash
			.iter()
			.filter(|(_, value)| value.is_mapping())
			.filter_map(|(key, _)| HookType::from_key(key))
			.collect()
	}

	/// Names of all hooks configured under a hook type, in document order.
	pub fn hook_names(&self, hook_type: &str) -> Vec<String> {
		self.hash
			.get(hook_type)
			.and_then(Value::as_mapping)
			.map(|group| {
				group
					.keys()
					.filter_map(|key| key.as_str().map(str::to_string))
					.collect()
			})
			.unwrap_or_default()
	}

	/// Names of hooks under a hook type that are explicitly enabled.
	pub fn enabled_hooks(&self, hook_type: &str) -> Vec<String> {
		self.hook_names(hook_type)
			.into_iter()
			.filter(|name| self.hook_enabled(name, hook_type).is_enabled())
			.collect()
	}

	/// Directory searched for additional hook implementations.
	pub fn plugin_directory(&self) -> PathBuf {
		self.hash
			.get("plugin_directory")
			.and_then(Value::as_str)
			.map(PathBuf::from)
			.unwrap_or_else(|| PathBuf::from(DEFAULT_PLUGIN_DIRECTORY))
	}

	/// Serialize the document tree back to YAML.
	pub fn to_yaml(&self) -> Result<String> {
		serde_yaml::to_string(&self.hash).map_err(|source| ConfigError::SerializeError { source })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config(yaml: &str) -> Configuration {
		let value: Value = serde_yaml::from_str(yaml).unwrap();
		Configuration::new(value.as_mapping().unwrap().clone())
	}

	#[test]
	fn test_hook_type_round_trips_through_str() {
		for hook_type in HookType::ALL {
			assert_eq!(hook_type.as_str().parse::<HookType>(), Ok(hook_type));
		}
		assert!("pre-commit".parse::<HookType>().is_err());
	}

	#[test]
	fn test_for_hook_missing_entry_is_empty() {
		let config = config("PreCommit:\n  Rubocop:\n    enabled: true\n");

		assert!(config.for_hook("ScssLint", "PreCommit").is_empty());
		assert!(config.for_hook("Rubocop", "CommitMsg").is_empty());
		assert!(config.for_hook("Rubocop", "NoSuchType").is_empty());
	}

	#[test]
	fn test_hook_enabled_is_tri_state() {
		let config = config(
			r#"
PreCommit:
  Rubocop:
    enabled: true
  ScssLint:
    enabled: false
  JsHint:
    command: ['jshint']
"#,
		);

		assert_eq!(
			config.hook_enabled("Rubocop", "PreCommit"),
			HookEnabled::Enabled
		);
		assert_eq!(
			config.hook_enabled("ScssLint", "PreCommit"),
			HookEnabled::Disabled
		);
		assert_eq!(config.hook_enabled("JsHint", "PreCommit"), HookEnabled::Unset);
		assert_eq!(config.hook_enabled("Missing", "PreCommit"), HookEnabled::Unset);
		assert_eq!(config.enabled_hooks("PreCommit"), vec!["Rubocop"]);
	}

	#[test]
	fn test_hook_command_accepts_string_or_list() {
		let config = config(
			r#"
PreCommit:
  ScssLint:
    command: ['bundle', 'exec', 'scss-lint']
  Rubocop:
    command: rubocop
"#,
		);

		assert_eq!(
			config.hook_command("ScssLint", "PreCommit"),
			Some(vec![
				"bundle".to_string(),
				"exec".to_string(),
				"scss-lint".to_string()
			])
		);
		assert_eq!(
			config.hook_command("Rubocop", "PreCommit"),
			Some(vec!["rubocop".to_string()])
		);
		assert_eq!(config.hook_command("Missing", "PreCommit"), None);
	}

	#[test]
	fn test_hook_types_skip_scalars_and_unknown_groups() {
		let config =
			config("plugin_directory: hooks\nPreCommit: {}\nverify_signatures: {}\nCommitMsg: {}\n");

		assert_eq!(
			config.hook_types(),
			vec![HookType::PreCommit, HookType::CommitMsg]
		);
	}

	#[test]
	fn test_plugin_directory_falls_back_to_default() {
		assert_eq!(
			Configuration::default().plugin_directory(),
			PathBuf::from(DEFAULT_PLUGIN_DIRECTORY)
		);
		assert_eq!(
			config("plugin_directory: /opt/hooks\n").plugin_directory(),
			PathBuf::from("/opt/hooks")
		);
	}
}
