// src/tools/mod.rs

//! Wrappers around the apt and dpkg command-line tools
//!
//! Nothing here parses tool output except `apt-config dump`; the package
//! operations only care about the exit status.

pub mod apt_get;
pub mod dpkg;

pub use apt_get::AptGet;
pub use dpkg::Dpkg;

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

/// Render a command line for logs and error messages
fn command_line<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}

fn check_status(command: String, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::CommandFailed {
            command,
            status: status.to_string(),
        })
    }
}

/// Run a tool with inherited stdio, failing on a non-zero exit
pub(crate) fn run<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> Result<()> {
    let line = command_line(program, args);
    info!("Running: {}", line);

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|source| Error::CommandUnavailable {
            program: program.display().to_string(),
            source,
        })?;

    check_status(line, status)
}

/// Run a tool and return its standard output, failing on a non-zero exit
pub(crate) fn run_captured<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> Result<String> {
    let line = command_line(program, args);
    debug!("Running: {}", line);

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| Error::CommandUnavailable {
            program: program.display().to_string(),
            source,
        })?;

    check_status(line.clone(), output.status)?;

    String::from_utf8(output.stdout)
        .map_err(|e| Error::ParseError(format!("Non UTF-8 output from `{}`: {}", line, e)))
}
