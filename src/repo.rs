//! Repository root discovery.

use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};

/// Find the root of the git repository containing `start_dir`.
///
/// Walks up the directory tree until a directory holding a `.git` entry is
/// found. `.git` may be a file (worktrees, submodules) or a directory.
pub fn find_repo_root(start_dir: &Path) -> Result<PathBuf> {
	let mut current_dir = start_dir.to_path_buf();

	loop {
		if current_dir.join(".git").exists() {
			tracing::debug!(root = %current_dir.display(), "found repository root");
			return Ok(current_dir);
		}

		match current_dir.parent() {
			Some(parent) => current_dir = parent.to_path_buf(),
			None => {
				return Err(ConfigError::RepoRootNotFound {
					start: start_dir.to_path_buf(),
				});
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn test_finds_root_from_nested_directory() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		fs::create_dir(root.join(".git")).unwrap();
		let nested = root.join("app").join("models");
		fs::create_dir_all(&nested).unwrap();

		assert_eq!(find_repo_root(&nested).unwrap(), root);
		assert_eq!(find_repo_root(root).unwrap(), root);
	}

	#[test]
	fn test_git_file_marks_root() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		fs::write(root.join(".git"), "gitdir: ../.git/worktrees/feature\n").unwrap();

		assert_eq!(find_repo_root(root).unwrap(), root);
	}

	#[test]
	fn test_no_repository_above_start() {
		let start = Path::new("/");
		if start.join(".git").exists() {
			return;
		}

		match find_repo_root(start).unwrap_err() {
			ConfigError::RepoRootNotFound { start: error_start } => {
				assert_eq!(error_start, start);
			}
			other => panic!("Expected RepoRootNotFound, got {other:?}"),
		}
	}

	#[test]
	fn test_nearest_root_wins() {
		let temp_dir = tempfile::tempdir().unwrap();
		let outer = temp_dir.path();
		fs::create_dir(outer.join(".git")).unwrap();
		let inner = outer.join("vendor").join("lib");
		fs::create_dir_all(inner.join(".git")).unwrap();

		assert_eq!(find_repo_root(&inner).unwrap(), inner);
	}
}
