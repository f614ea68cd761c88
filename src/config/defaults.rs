// src/config/defaults.rs

//! apt configuration key names and the values used when apt-config is silent

use std::path::PathBuf;

pub const KEY_STATUS_FILE: &str = "Dir::State::status";
pub const KEY_ARCHITECTURE: &str = "APT::Architecture";
pub const KEY_ETC_DIR: &str = "Dir::Etc";
pub const KEY_SOURCES_LIST: &str = "Dir::Etc::sourcelist";
pub const KEY_SOURCES_PARTS: &str = "Dir::Etc::sourceparts";
pub const KEY_GPGV_TRUSTED_KEYRING: &str = "Apt::GPGV::TrustedKeyring";
pub const KEY_TRUSTED_KEYRING: &str = "Dir::Etc::Trusted";
pub const KEY_TRUSTED_PARTS: &str = "Dir::Etc::trustedparts";
pub const KEY_LOG_DIR: &str = "Dir::Log";
pub const KEY_STATE_DIR: &str = "Dir::State";
pub const KEY_CACHE_DIR: &str = "Dir::Cache";
pub const KEY_BINARY_CACHE: &str = "Dir::Cache::pkgcache";
pub const KEY_SOURCE_CACHE: &str = "Dir::Cache::srcpkgcache";

/// Every key requested from `apt-config dump`
pub const DUMPED_KEYS: [&str; 13] = [
    KEY_STATUS_FILE,
    KEY_ARCHITECTURE,
    KEY_ETC_DIR,
    KEY_SOURCES_LIST,
    KEY_SOURCES_PARTS,
    KEY_GPGV_TRUSTED_KEYRING,
    KEY_TRUSTED_KEYRING,
    KEY_TRUSTED_PARTS,
    KEY_LOG_DIR,
    KEY_STATE_DIR,
    KEY_CACHE_DIR,
    KEY_BINARY_CACHE,
    KEY_SOURCE_CACHE,
];

/// Hardcoded locations used when a key is absent from the dump
///
/// Directory fields are absolute; name fields are joined onto the
/// directory they belong to during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallbacks {
    pub status_file: PathBuf,
    pub etc_dir: PathBuf,
    pub sources_list_name: String,
    pub sources_parts_name: String,
    pub trusted_keyring_name: String,
    pub trusted_parts_name: String,
    pub log_dir: PathBuf,
    pub state_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub binary_cache_name: String,
    pub source_cache_name: String,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            status_file: PathBuf::from("/var/lib/dpkg/status"),
            etc_dir: PathBuf::from("/etc/apt"),
            sources_list_name: "sources.list".to_string(),
            sources_parts_name: "sources.list.d".to_string(),
            trusted_keyring_name: "trusted.gpg".to_string(),
            trusted_parts_name: "trusted.gpg.d".to_string(),
            log_dir: PathBuf::from("/var/log/apt"),
            state_dir: PathBuf::from("/var/lib/apt"),
            cache_dir: PathBuf::from("/var/cache/apt"),
            binary_cache_name: "pkgcache.bin".to_string(),
            source_cache_name: "srcpkgcache.bin".to_string(),
        }
    }
}

/// Locations of the external tools aptshim drives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub apt_config: PathBuf,
    pub apt_get: PathBuf,
    pub dpkg: PathBuf,
    /// Shell script scraped for its TRUSTEDPARTS assignment
    pub apt_key_script: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            apt_config: PathBuf::from("apt-config"),
            apt_get: PathBuf::from("apt-get"),
            dpkg: PathBuf::from("dpkg"),
            apt_key_script: PathBuf::from("/usr/bin/apt-key"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_names_follow_file_names() {
        let fallbacks = Fallbacks::default();
        assert_eq!(
            fallbacks.sources_parts_name,
            format!("{}.d", fallbacks.sources_list_name)
        );
        assert_eq!(
            fallbacks.trusted_parts_name,
            format!("{}.d", fallbacks.trusted_keyring_name)
        );
    }

    #[test]
    fn test_dumped_keys_are_unique() {
        let mut keys = DUMPED_KEYS.to_vec();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), DUMPED_KEYS.len());
    }
}
