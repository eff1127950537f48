use std::path::PathBuf;

/// Library-level structured errors for configuration loading.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("No git repository found at or above: {start}")]
	RepoRootNotFound { start: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Config file must contain a mapping at the top level: {path}")]
	InvalidDocument { path: PathBuf },

	#[error("Invalid value for `{key}` in {path}: expected {expected}")]
	InvalidOption {
		path: PathBuf,
		key: String,
		expected: &'static str,
	},

	#[error("Failed to serialize configuration")]
	SerializeError {
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Failed to resolve absolute path: {path}")]
	PathResolveError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;
