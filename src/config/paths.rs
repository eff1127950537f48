use crate::error::{ConfigError, Result};
use std::path::{Component, Path, PathBuf};

/// Expand a path from a configuration document to an absolute path.
///
/// Resolution is purely lexical: `~` expands to the home directory, relative
/// paths are joined onto `base` (itself made absolute against the current
/// directory), and `.`/`..` components are folded away. Nothing is checked
/// against the filesystem.
pub fn expand_path(path: &str, base: &Path) -> Result<PathBuf> {
	let expanded = if path == "~" {
		home_dir()?
	} else if let Some(rest) = path.strip_prefix("~/") {
		home_dir()?.join(rest)
	} else {
		PathBuf::from(path)
	};

	let joined = if expanded.is_absolute() {
		expanded
	} else {
		absolute(base)?.join(expanded)
	};

	Ok(normalize(&joined))
}

fn absolute(path: &Path) -> Result<PathBuf> {
	std::path::absolute(path).map_err(|source| ConfigError::PathResolveError {
		path: path.to_path_buf(),
		source,
	})
}

fn home_dir() -> Result<PathBuf> {
	dirs::home_dir().ok_or(ConfigError::HomeDirectoryNotFound)
}

fn normalize(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				normalized.pop();
			}
			other => normalized.push(other.as_os_str()),
		}
	}
	normalized
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_relative_path_joins_base() {
		let base = Path::new("/repo");
		assert_eq!(
			expand_path("some-directory", base).unwrap(),
			PathBuf::from("/repo/some-directory")
		);
	}

	#[test]
	fn test_absolute_path_is_kept() {
		let base = Path::new("/repo");
		assert_eq!(
			expand_path("/opt/hooks", base).unwrap(),
			PathBuf::from("/opt/hooks")
		);
	}

	#[test]
	fn test_dot_components_are_folded() {
		let base = Path::new("/repo/sub");
		assert_eq!(
			expand_path("./a/../../hooks/.", base).unwrap(),
			PathBuf::from("/repo/hooks")
		);
	}

	#[test]
	fn test_relative_base_is_made_absolute() {
		let cwd = std::env::current_dir().unwrap();
		let resolved = expand_path("some-directory", Path::new(".")).unwrap();

		assert!(resolved.is_absolute());
		assert_eq!(resolved, normalize(&cwd.join("some-directory")));
	}

	#[test]
	fn test_leading_parent_dirs_climb_from_relative_base() {
		let repo = std::path::absolute("repo").unwrap();
		let expected = repo.parent().unwrap().parent().unwrap().join("x");

		assert_eq!(
			expand_path("../../x", Path::new("repo")).unwrap(),
			normalize(&expected)
		);
	}

	#[test]
	fn test_parent_of_root_stays_at_root() {
		assert_eq!(
			expand_path("../../hooks", Path::new("/")).unwrap(),
			PathBuf::from("/hooks")
		);
	}

	#[test]
	fn test_tilde_expands_to_home() {
		let Some(home) = dirs::home_dir() else {
			return;
		};
		let base = Path::new("/repo");

		assert_eq!(expand_path("~", base).unwrap(), normalize(&home));
		assert_eq!(
			expand_path("~/hooks", base).unwrap(),
			normalize(&home.join("hooks"))
		);
	}

	#[test]
	fn test_tilde_user_form_is_not_expanded() {
		let base = Path::new("/repo");
		assert_eq!(
			expand_path("~other/hooks", base).unwrap(),
			PathBuf::from("/repo/~other/hooks")
		);
	}
}
