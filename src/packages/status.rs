// src/packages/status.rs

//! dpkg status database reader
//!
//! The status file is a sequence of RFC 822-like stanzas, one per package
//! dpkg knows about (installed, half-installed, or only config files left).

use crate::error::{Error, PathKind, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One stanza of `/var/lib/dpkg/status`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstalledPackage {
    pub package: String,
    /// Three words: desired action, error flag, package state
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(rename = "Installed-Size", default)]
    pub installed_size: Option<String>,
    #[serde(default)]
    pub maintainer: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub depends: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl InstalledPackage {
    /// Whether dpkg considers the package fully installed
    pub fn is_installed(&self) -> bool {
        self.status
            .as_deref()
            .and_then(|s| s.split_whitespace().nth(2))
            == Some("installed")
    }

    /// Installed size in KiB, if present and numeric
    pub fn installed_size_kib(&self) -> Option<u64> {
        self.installed_size.as_deref()?.trim().parse().ok()
    }

    /// First line of the description
    pub fn summary(&self) -> Option<&str> {
        self.description.as_deref()?.lines().next()
    }

    /// Paths recorded in the package's `.list` file under `info_dir`
    ///
    /// Multi-arch packages use `<name>:<arch>.list`, so that name is tried
    /// when the plain one is missing.
    pub fn file_list(&self, info_dir: &Path) -> Result<Vec<PathBuf>> {
        let plain = info_dir.join(format!("{}.list", self.package));
        let mut candidates = vec![plain.clone()];
        if let Some(arch) = &self.architecture {
            candidates.push(info_dir.join(format!("{}:{}.list", self.package, arch)));
        }

        let Some(list) = candidates.iter().find(|p| p.is_file()) else {
            return Err(Error::NotFound {
                what: "dpkg file list",
                path: plain,
                kind: PathKind::File,
            });
        };

        debug!("Reading file list {}", list.display());
        let content = std::fs::read_to_string(list)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }
}

/// Parse the contents of a dpkg status file
pub fn parse_status(content: &str) -> Result<Vec<InstalledPackage>> {
    let packages: Vec<InstalledPackage> = rfc822_like::from_str(content)
        .map_err(|e| Error::ParseError(format!("Failed to parse dpkg status: {}", e)))?;

    debug!("Parsed {} status stanzas", packages.len());
    Ok(packages)
}

/// Read and parse the dpkg status file at `path`
pub fn read_status_file(path: &Path) -> Result<Vec<InstalledPackage>> {
    debug!("Reading dpkg status file: {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_status(&content)
}
