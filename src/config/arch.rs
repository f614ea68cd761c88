// src/config/arch.rs

//! Mapping from the running kernel to a dpkg architecture name
//!
//! Only consulted when apt-config cannot be asked for `APT::Architecture`.

use crate::error::{Error, Result};
use tracing::debug;

/// (system name, machine) -> dpkg architecture
const ARCHITECTURE_TABLE: &[(&str, &str, &str)] = &[
    ("Linux", "x86_64", "amd64"),
    ("Linux", "x86", "i386"),
    ("Linux", "riscv64", "riscv64"),
    ("GNU/Linux", "x86_64", "amd64"),
    ("GNU/Linux", "x86", "i386"),
    ("GNU/Linux", "riscv64", "riscv64"),
    ("GNU/kFreeBSD", "x86_64", "kfreebsd-amd64"),
    ("GNU/kFreeBSD", "x86", "kfreebsd-i386"),
];

/// Operating system name and machine hardware name, as `uname` reports them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub system: String,
    pub machine: String,
}

impl Platform {
    pub fn new(system: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            machine: machine.into(),
        }
    }

    /// Query the running kernel via uname(2)
    pub fn current() -> Result<Self> {
        let uts = nix::sys::utsname::uname()
            .map_err(|e| Error::Io(std::io::Error::from(e)))?;

        let platform = Self::new(
            uts.sysname().to_string_lossy(),
            uts.machine().to_string_lossy(),
        );
        debug!("Local platform: {} {}", platform.system, platform.machine);
        Ok(platform)
    }

    /// The dpkg architecture for this platform
    pub fn dpkg_architecture(&self) -> Result<&'static str> {
        lookup_architecture(&self.system, &self.machine)
    }
}

/// Look up the dpkg architecture for a (system, machine) pair
pub fn lookup_architecture(system: &str, machine: &str) -> Result<&'static str> {
    ARCHITECTURE_TABLE
        .iter()
        .find(|(s, m, _)| *s == system && *m == machine)
        .map(|(_, _, arch)| *arch)
        .ok_or_else(|| Error::UnknownArchitecture {
            system: system.to_string(),
            machine: machine.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linux_x86_64_is_amd64() {
        assert_eq!(lookup_architecture("Linux", "x86_64").unwrap(), "amd64");
    }

    #[test]
    fn test_kfreebsd_prefix() {
        assert_eq!(
            lookup_architecture("GNU/kFreeBSD", "x86").unwrap(),
            "kfreebsd-i386"
        );
    }

    #[test]
    fn test_unknown_pair_fails() {
        let err = lookup_architecture("Windows", "x86_64").unwrap_err();
        match err {
            Error::UnknownArchitecture { system, machine } => {
                assert_eq!(system, "Windows");
                assert_eq!(machine, "x86_64");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup_architecture("linux", "x86_64").is_err());
    }

    #[test]
    fn test_every_table_entry_resolves() {
        for (system, machine, arch) in ARCHITECTURE_TABLE {
            let platform = Platform::new(*system, *machine);
            assert_eq!(platform.dpkg_architecture().unwrap(), *arch);
            // Repeated lookups give the same answer
            assert_eq!(platform.dpkg_architecture().unwrap(), *arch);
        }
    }
}
