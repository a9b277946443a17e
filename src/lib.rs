// file: src/lib.rs
// version: 1.0.0
// guid: 7c14d9e2-5a38-4b6f-9d02-e8a157c64f90

//! # MAAS Reimage
//!
//! Automation tool for MAAS (Metal as a Service) machine lifecycle
//! operations: listing machines and boot resources, querying machine
//! details, deploying, and redeploying (release, wait, deploy) one or
//! all machines. The MAAS API key is stored encrypted on disk and
//! decrypted at startup.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod fleet;
pub mod logging;
pub mod maas;
pub mod reporter;

pub use error::{ReimageError, Result};

/// Version information for the tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
