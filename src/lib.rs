// src/lib.rs

//! aptshim
//!
//! Convenience layer over the Debian packaging tools. It drives `apt-get`
//! and `dpkg` for package operations and discovers where apt and dpkg keep
//! their files by asking `apt-config`.
//!
//! # Architecture
//!
//! - `config`: one-shot resolution of apt/dpkg locations into an `AptConfig`
//! - `packages`: read-only access to the dpkg status database
//! - `tools`: `apt-get` and `dpkg` invocations, exit status only

pub mod config;
mod error;
pub mod packages;
pub mod tools;

pub use config::{AptConfig, Resolver};
pub use error::{Error, PathKind, Result};
