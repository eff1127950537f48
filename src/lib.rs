//! Overcommit - layered configuration for git hooks.
//!
//! This library provides the configuration core of a git hook manager:
//! - A built-in default configuration
//! - Deep-merging of `.overcommit.yml` and `.local-overcommit.yml` overrides
//! - Per-hook lookup of merged options and the tri-state `enabled` flag
//! - Repository root discovery and pluggable warning sinks
//!
//! # Example
//!
//! ```no_run
//! use overcommit_cli::config::ConfigurationLoader;
//! use overcommit_cli::logger::StreamLogger;
//! use overcommit_cli::repo::find_repo_root;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let root = find_repo_root(&cwd).unwrap();
//! let loader = ConfigurationLoader::new(root, StreamLogger::new(std::io::stderr()));
//! let config = loader.load_repo_config().unwrap();
//!
//! if config.hook_enabled("Rubocop", "PreCommit").is_enabled() {
//!     println!("Rubocop options: {:?}", config.for_hook("Rubocop", "PreCommit"));
//! }
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod repo;

pub use error::{ConfigError, Result};
