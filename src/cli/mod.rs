// file: src/cli/mod.rs
// version: 1.0.0
// guid: a3d58f20-7b96-4c41-b0e5-12f84d6c90a7

//! Command line interface for the MAAS reimage tool

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::*;
