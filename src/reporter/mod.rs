// file: src/reporter/mod.rs
// version: 1.0.0
// guid: 86d13e5a-7f40-4b92-8c61-0a5e92d7b348

//! User-facing output with optional file logging
//!
//! Every reported line goes to stdout and, when a log file is configured,
//! is appended there with an ISO timestamp prefix. Table and detail
//! formatting for machines and boot resources lives here too.

use crate::maas::{BootResource, Machine};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Writes report lines to stdout and an optional log file
pub struct Reporter {
    log_file: Option<PathBuf>,
}

impl Reporter {
    /// Create a reporter, appending to `log_file` when given
    pub fn new(log_file: Option<PathBuf>) -> Self {
        Self { log_file }
    }

    /// Report a line to stdout and the log file
    pub fn line(&self, msg: &str) {
        println!("{}", msg);
        if let Some(path) = &self.log_file {
            if let Err(e) = append_line(path, msg) {
                warn!("Failed to write to log file {}: {}", path.display(), e);
            }
        }
    }
}

fn append_line(path: &Path, msg: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{} - {}", chrono::Local::now().to_rfc3339(), msg)
}

/// Header row for the machine listing
pub fn machine_table_header() -> String {
    format!(
        "{:20} | {:10} | {:10} | {:10}",
        "Hostname", "System ID", "Status", "OS"
    )
}

/// Separator under the machine listing header
pub fn machine_table_separator() -> String {
    "-".repeat(65)
}

/// One row of the machine listing
pub fn machine_row(machine: &Machine) -> String {
    format!(
        "{:20} | {:10} | {:10} | {:10}",
        machine.hostname,
        machine.system_id,
        machine.status_name,
        machine.distro_display()
    )
}

/// Detail block for a single machine
pub fn machine_details(machine: &Machine) -> String {
    format!(
        "Name: {}\n\
         System ID: {}\n\
         Status: {}\n\
         OS Distro: {}\n\
         OS Type: {}\n\
         Owner: {}\n\
         Power Type: {}\n\
         Power Status: {}",
        machine.hostname,
        machine.system_id,
        machine.status_name,
        machine.distro_display(),
        machine.osystem_display(),
        machine.owner_display(),
        machine.power_type_display(),
        machine.power_state_display()
    )
}

/// Header row for the boot resource listing
pub fn distro_table_header() -> String {
    format!(
        "{:<5} | {:<20} | {:<20} | {:<15}",
        "ID", "OS Type", "Release", "Architecture"
    )
}

/// Separator under the boot resource listing header
pub fn distro_table_separator() -> String {
    "-".repeat(70)
}

/// One row of the boot resource listing
pub fn distro_row(resource: &BootResource) -> String {
    let (os_type, release) = resource.os_release();
    format!(
        "{:<5} | {:<20} | {:<20} | {:<15}",
        resource.id,
        os_type,
        release,
        resource.arch_display()
    )
}
