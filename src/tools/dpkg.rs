// src/tools/dpkg.rs

//! `dpkg -i` for local .deb archives

use super::run;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Handle on the `dpkg` binary
#[derive(Debug, Clone)]
pub struct Dpkg {
    program: PathBuf,
}

impl Dpkg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// `dpkg -i <archives>`
    pub fn install<P: AsRef<Path>>(&self, archives: &[P]) -> Result<()> {
        if archives.is_empty() {
            return Err(Error::InvalidRequest(
                "dpkg -i needs at least one package archive".to_string(),
            ));
        }

        let mut args: Vec<OsString> = vec!["-i".into()];
        args.extend(archives.iter().map(|p| p.as_ref().as_os_str().to_owned()));
        run(&self.program, &args)
    }
}

impl Default for Dpkg {
    fn default() -> Self {
        Self::new("dpkg")
    }
}
