// file: src/logging/mod.rs
// version: 1.0.0
// guid: b2e84f17-6c90-4a3d-b5e8-04f2a9c817d5

//! Logging system for the MAAS reimage tool

pub mod logger;

pub use logger::init_logger;
