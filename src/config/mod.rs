// src/config/mod.rs

//! Discovery of the local apt/dpkg configuration
//!
//! apt-config is asked for every path aptshim needs. Anything it does not
//! report, or everything if it cannot be run, comes from [`Fallbacks`].
//! The result is an [`AptConfig`] whose checked paths all exist.
//!
//! # Resolution order
//!
//! - Status file and architecture come straight from the dump, else from
//!   the fallback status path and the [`Platform`] table
//! - Base directories (`Dir::Etc`, `Dir::Log`, `Dir::State`, `Dir::Cache`)
//!   are reported without a leading slash and are re-rooted at `/`
//! - File and subdirectory names are joined onto their base directory
//! - The trusted parts directory may also come from the apt-key script,
//!   in which case its parent becomes the base for the trusted keyring

pub mod arch;
pub mod defaults;
pub mod dump;
pub mod lists;
pub mod trusted;

pub use arch::{Platform, lookup_architecture};
pub use defaults::{DUMPED_KEYS, Fallbacks, ToolPaths};
pub use dump::{AptConfigCommand, RawVariables, VariableSource, parse_dump, parse_dump_line};

use crate::error::{Error, PathKind, Result};
use crate::packages::{InstalledPackage, read_status_file};
use defaults::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Resolved apt/dpkg locations for this system
///
/// Built once by [`AptConfig::resolve`] (or a configured [`Resolver`]) and
/// shared by reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AptConfig {
    status_file: PathBuf,
    info_dir: PathBuf,
    architecture: String,
    etc_dir: PathBuf,
    sources_list: PathBuf,
    sources_parts_dir: PathBuf,
    trusted_keyring: PathBuf,
    trusted_parts_dir: PathBuf,
    log_dir: PathBuf,
    state_dir: PathBuf,
    cache_dir: PathBuf,
    binary_cache: PathBuf,
    source_cache: PathBuf,
}

impl AptConfig {
    /// Resolve using the system `apt-config` and the default fallbacks
    pub fn resolve() -> Result<Self> {
        Resolver::new().resolve()
    }

    /// dpkg status database
    pub fn status_file(&self) -> &Path {
        &self.status_file
    }

    /// dpkg per-package metadata directory (`<status dir>/info`)
    pub fn info_dir(&self) -> &Path {
        &self.info_dir
    }

    /// Native dpkg architecture, e.g. `amd64`
    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    pub fn etc_dir(&self) -> &Path {
        &self.etc_dir
    }

    pub fn sources_list(&self) -> &Path {
        &self.sources_list
    }

    pub fn sources_parts_dir(&self) -> &Path {
        &self.sources_parts_dir
    }

    pub fn trusted_keyring(&self) -> &Path {
        &self.trusted_keyring
    }

    pub fn trusted_parts_dir(&self) -> &Path {
        &self.trusted_parts_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Base directory of apt's package caches
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Binary package cache; may not exist yet
    pub fn binary_cache(&self) -> &Path {
        &self.binary_cache
    }

    /// Source package cache; may not exist yet
    pub fn source_cache(&self) -> &Path {
        &self.source_cache
    }

    /// Cached `*_InRelease` files, keyed by file name
    pub fn cached_release_signatures(&self) -> Result<HashMap<String, PathBuf>> {
        lists::cached_release_signatures(&self.state_dir)
    }

    /// Every stanza of the dpkg status database
    pub fn installed_packages(&self) -> Result<Vec<InstalledPackage>> {
        read_status_file(&self.status_file)
    }
}

/// Configurable resolution of an [`AptConfig`]
///
/// ```no_run
/// use aptshim::config::{Fallbacks, Resolver};
///
/// let config = Resolver::new()
///     .apt_key_script("/usr/bin/apt-key")
///     .fallbacks(Fallbacks::default())
///     .resolve()?;
/// println!("{}", config.architecture());
/// # Ok::<(), aptshim::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Resolver<S = AptConfigCommand> {
    source: S,
    apt_key_script: PathBuf,
    fallbacks: Fallbacks,
    platform: Option<Platform>,
}

impl Resolver<AptConfigCommand> {
    pub fn new() -> Self {
        Self::from_tools(&ToolPaths::default())
    }

    /// Use the apt-config binary and apt-key script from `tools`
    pub fn from_tools(tools: &ToolPaths) -> Self {
        Self::with_source(AptConfigCommand::new(&tools.apt_config))
            .apt_key_script(&tools.apt_key_script)
    }
}

impl Default for Resolver<AptConfigCommand> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: VariableSource> Resolver<S> {
    /// Resolve against an arbitrary variable source
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            apt_key_script: ToolPaths::default().apt_key_script,
            fallbacks: Fallbacks::default(),
            platform: None,
        }
    }

    pub fn apt_key_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.apt_key_script = path.into();
        self
    }

    pub fn fallbacks(mut self, fallbacks: Fallbacks) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    /// Pin the platform used for the architecture fallback instead of uname(2)
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Query the variable source, falling back to a minimal map
    fn variables(&self) -> Result<RawVariables> {
        match self.source.dump(&DUMPED_KEYS) {
            Ok(vars) => Ok(vars),
            Err(e) => {
                warn!("apt-config unavailable ({}), using built-in defaults", e);
                let mut vars = RawVariables::new();
                vars.insert(
                    KEY_STATUS_FILE,
                    self.fallbacks.status_file.to_string_lossy(),
                );
                vars.insert(KEY_ARCHITECTURE, self.fallback_architecture()?);
                Ok(vars)
            }
        }
    }

    fn fallback_architecture(&self) -> Result<&'static str> {
        let platform = match &self.platform {
            Some(platform) => platform.clone(),
            None => Platform::current()?,
        };
        platform.dpkg_architecture()
    }

    /// Resolve every location, failing on the first missing one
    pub fn resolve(&self) -> Result<AptConfig> {
        let vars = self.variables()?;
        let fb = &self.fallbacks;

        let status_file = match vars.get(KEY_STATUS_FILE) {
            Some(status) => PathBuf::from(status),
            None => fb.status_file.clone(),
        };
        require(&status_file, "dpkg status file", PathKind::File)?;
        let info_dir = status_file
            .parent()
            .map(|dir| dir.join("info"))
            .unwrap_or_else(|| PathBuf::from("info"));

        let architecture = match vars.get(KEY_ARCHITECTURE) {
            Some(arch) => arch.to_string(),
            None => self.fallback_architecture()?.to_string(),
        };

        let etc_dir = rooted_dir(vars.get(KEY_ETC_DIR), &fb.etc_dir);
        require(&etc_dir, "apt etc directory", PathKind::Directory)?;
        let log_dir = rooted_dir(vars.get(KEY_LOG_DIR), &fb.log_dir);
        require(&log_dir, "apt log directory", PathKind::Directory)?;
        let state_dir = rooted_dir(vars.get(KEY_STATE_DIR), &fb.state_dir);
        require(&state_dir, "apt state directory", PathKind::Directory)?;
        let cache_dir = rooted_dir(vars.get(KEY_CACHE_DIR), &fb.cache_dir);
        require(&cache_dir, "apt cache directory", PathKind::Directory)?;

        let sources_list =
            etc_dir.join(vars.get(KEY_SOURCES_LIST).unwrap_or(fb.sources_list_name.as_str()));
        require(&sources_list, "sources list", PathKind::File)?;
        let sources_parts_dir =
            etc_dir.join(vars.get(KEY_SOURCES_PARTS).unwrap_or(fb.sources_parts_name.as_str()));
        require(&sources_parts_dir, "sources parts directory", PathKind::Directory)?;

        let binary_cache =
            cache_dir.join(vars.get(KEY_BINARY_CACHE).unwrap_or(fb.binary_cache_name.as_str()));
        let source_cache =
            cache_dir.join(vars.get(KEY_SOURCE_CACHE).unwrap_or(fb.source_cache_name.as_str()));

        let (trusted_parts_dir, trusted_base) = self.trusted_parts(&vars, &etc_dir);
        require(&trusted_parts_dir, "trusted keyring parts directory", PathKind::Directory)?;

        let keyring_name = vars
            .get(KEY_GPGV_TRUSTED_KEYRING)
            .or_else(|| vars.get(KEY_TRUSTED_KEYRING))
            .unwrap_or(fb.trusted_keyring_name.as_str());
        let trusted_keyring = trusted_base.join(keyring_name);
        require(&trusted_keyring, "trusted keyring", PathKind::File)?;

        info!(
            "Resolved apt configuration: arch={}, status={}",
            architecture,
            status_file.display()
        );

        Ok(AptConfig {
            status_file,
            info_dir,
            architecture,
            etc_dir,
            sources_list,
            sources_parts_dir,
            trusted_keyring,
            trusted_parts_dir,
            log_dir,
            state_dir,
            cache_dir,
            binary_cache,
            source_cache,
        })
    }

    /// Trusted parts directory and the base directory for the trusted keyring
    fn trusted_parts(&self, vars: &RawVariables, etc_dir: &Path) -> (PathBuf, PathBuf) {
        if let Some(parts) = vars.get(KEY_TRUSTED_PARTS) {
            debug!("Trusted parts from apt-config: {}", parts);
            return (etc_dir.join(parts), etc_dir.to_path_buf());
        }

        let scraped = trusted::scrape_trusted_parts(&self.apt_key_script).and_then(|parts| {
            let base = parts.parent()?.to_path_buf();
            Some((parts, base))
        });
        if let Some(found) = scraped {
            return found;
        }

        debug!("Trusted parts from built-in default");
        (
            etc_dir.join(&self.fallbacks.trusted_parts_name),
            etc_dir.to_path_buf(),
        )
    }
}

/// Directory rule: a reported value is re-rooted at `/`, otherwise `fallback`
///
/// apt-config reports base directories relative to `Dir`, without a leading
/// slash, so the value is prefixed as-is.
pub fn rooted_dir(value: Option<&str>, fallback: &Path) -> PathBuf {
    match value {
        Some(value) => PathBuf::from(format!("/{}", value)),
        None => fallback.to_path_buf(),
    }
}

fn require(path: &Path, what: &'static str, kind: PathKind) -> Result<()> {
    let ok = match kind {
        PathKind::File => path.is_file(),
        PathKind::Directory => path.is_dir(),
    };

    if ok {
        Ok(())
    } else {
        Err(Error::NotFound {
            what,
            path: path.to_path_buf(),
            kind,
        })
    }
}
