// src/packages/mod.rs

//! Installed-package data owned by dpkg
//!
//! aptshim never writes to the dpkg database; this module only reads the
//! status file and the per-package file lists next to it.

pub mod status;

pub use status::{InstalledPackage, read_status_file};
