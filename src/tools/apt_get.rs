// src/tools/apt_get.rs

//! `apt-get` install / remove / autoremove

use super::run;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Handle on the `apt-get` binary
#[derive(Debug, Clone)]
pub struct AptGet {
    program: PathBuf,
}

impl AptGet {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// `apt-get install -y <packages>`
    pub fn install<S: AsRef<str>>(&self, packages: &[S]) -> Result<()> {
        run(&self.program, &Self::package_args("install", packages)?)
    }

    /// `apt-get remove -y <packages>`
    pub fn remove<S: AsRef<str>>(&self, packages: &[S]) -> Result<()> {
        run(&self.program, &Self::package_args("remove", packages)?)
    }

    /// `apt-get autoremove --purge`
    pub fn purge(&self) -> Result<()> {
        run(&self.program, &["autoremove", "--purge"])
    }

    fn package_args<S: AsRef<str>>(action: &str, packages: &[S]) -> Result<Vec<String>> {
        if packages.is_empty() {
            return Err(Error::InvalidRequest(format!(
                "apt-get {} needs at least one package",
                action
            )));
        }

        let mut args = vec![action.to_string(), "-y".to_string()];
        args.extend(packages.iter().map(|p| p.as_ref().to_string()));
        Ok(args)
    }
}

impl Default for AptGet {
    fn default() -> Self {
        Self::new("apt-get")
    }
}
