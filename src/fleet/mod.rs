// file: src/fleet/mod.rs
// version: 1.0.0
// guid: f71a25c8-3d09-4e64-b5f2-68c0d19a73e4

//! Machine lifecycle operations
//!
//! Listing, querying, deploying and redeploying machines through a
//! connected [`MaasClient`](crate::maas::MaasClient), with all user-facing
//! output routed through the [`Reporter`](crate::reporter::Reporter).

pub mod manager;

pub use manager::{deploy_check, most_recent_deployed, DeployCheck, FleetManager};
