// file: src/maas/mod.rs
// version: 1.1.0
// guid: 5a27e8d3-0c64-4f19-b8a2-74d95c3e01f8

//! MAAS API 2.0 client and data models

pub mod client;
pub mod models;

pub use client::MaasClient;
pub use models::{BootResource, Machine, MachineStatus, Owner};

use crate::Result;
use async_trait::async_trait;

/// Machine operations the fleet layer drives
///
/// Implemented by [`MaasClient`] over the live API; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait MachineApi {
    /// List all machines
    async fn list_machines(&self) -> Result<Vec<Machine>>;

    /// Fetch one machine by system id
    async fn get_machine(&self, system_id: &str) -> Result<Machine>;

    /// Trigger deployment of a machine
    async fn deploy(&self, system_id: &str, distro_series: Option<&str>) -> Result<Machine>;

    /// Release a machine back to the Ready pool
    async fn release(&self, system_id: &str) -> Result<Machine>;

    /// List available boot resources (installable OS images)
    async fn list_boot_resources(&self) -> Result<Vec<BootResource>>;
}
