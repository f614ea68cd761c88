// src/config/lists.rs

//! Cached release files under apt's `lists` state directory

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Subdirectory of the apt state dir holding downloaded index files
pub const LISTS_DIR_NAME: &str = "lists";

const INRELEASE_PATTERN: &str = "*_InRelease";

/// Map every `*_InRelease` file in `<state_dir>/lists` from name to full path
///
/// An empty or absent lists directory yields an empty map.
pub fn cached_release_signatures(state_dir: &Path) -> Result<HashMap<String, PathBuf>> {
    let lists_dir = state_dir.join(LISTS_DIR_NAME);
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&lists_dir.to_string_lossy()),
        INRELEASE_PATTERN
    );

    let paths = glob::glob(&pattern)
        .map_err(|e| Error::ParseError(format!("Invalid glob pattern {}: {}", pattern, e)))?;

    let mut found = HashMap::new();
    for entry in paths {
        let path = entry.map_err(|e| Error::Io(e.into()))?;
        if let Some(name) = path.file_name() {
            found.insert(name.to_string_lossy().into_owned(), path);
        }
    }

    debug!(
        "Found {} InRelease files in {}",
        found.len(),
        lists_dir.display()
    );
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_empty_lists_dir() {
        let state = tempfile::tempdir().unwrap();
        fs::create_dir(state.path().join(LISTS_DIR_NAME)).unwrap();

        let found = cached_release_signatures(state.path()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_only_inrelease_files_listed() {
        let state = tempfile::tempdir().unwrap();
        let lists = state.path().join(LISTS_DIR_NAME);
        fs::create_dir(&lists).unwrap();
        for name in [
            "deb.debian.org_debian_dists_bookworm_InRelease",
            "deb.debian.org_debian_dists_bookworm_main_binary-amd64_Packages",
            "security.debian.org_dists_bookworm-security_InRelease",
            "lock",
        ] {
            fs::write(lists.join(name), b"").unwrap();
        }

        let found = cached_release_signatures(state.path()).unwrap();
        assert_eq!(found.len(), 2);
        let name = "deb.debian.org_debian_dists_bookworm_InRelease";
        assert_eq!(found[name], lists.join(name));
        assert!(found.contains_key("security.debian.org_dists_bookworm-security_InRelease"));
    }

    #[test]
    fn test_glob_characters_in_state_dir() {
        let root = tempfile::tempdir().unwrap();
        let state = root.path().join("state[1]");
        let lists = state.join(LISTS_DIR_NAME);
        fs::create_dir_all(&lists).unwrap();
        fs::write(lists.join("mirror_InRelease"), b"").unwrap();

        let found = cached_release_signatures(&state).unwrap();
        assert_eq!(found.len(), 1);
    }
}
