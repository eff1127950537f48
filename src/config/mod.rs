//! Configuration loading and parsing.
//!
//! This module handles:
//! - YAML config file parsing and shape validation
//! - Deep-merging the built-in defaults with repository and local overrides
//! - Lexical resolution of paths named in config files

pub mod cascade;
pub mod parser;
pub mod paths;
pub mod types;

pub use cascade::{
	ConfigurationLoader, LOCAL_CONFIG_FILE, REPO_CONFIG_FILE, default_configuration,
	load_repo_config, merge,
};
pub use parser::{parse_config_file, parse_config_str};
pub use paths::expand_path;
pub use types::{Configuration, DEFAULT_PLUGIN_DIRECTORY, HookEnabled, HookType};
