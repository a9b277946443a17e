// file: src/fleet/manager.rs
// version: 1.0.0
// guid: 2e90b4d7-1f63-4a58-8d27-c45a03e8f916

//! Fleet manager implementing the machine lifecycle operations

use crate::config::MaasSection;
use crate::maas::{MaasClient, Machine, MachineApi, MachineStatus};
use crate::reporter::{self, Reporter};
use crate::Result;
use std::time::Duration;
use tracing::debug;

/// Distro series used when a machine reports none
const DEFAULT_DISTRO: &str = "focal";

/// Outcome of the pre-deployment state check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployCheck {
    AlreadyDeployed,
    Blocked(MachineStatus),
    Proceed,
}

/// Decide whether a machine may be deployed in its current state
pub fn deploy_check(machine: &Machine) -> DeployCheck {
    let status = machine.status();
    if status == MachineStatus::Deployed {
        DeployCheck::AlreadyDeployed
    } else if status.blocks_deploy() {
        DeployCheck::Blocked(status)
    } else {
        DeployCheck::Proceed
    }
}

/// Pick the most recently deployed machine
///
/// Machines with a parseable timestamp win by recency; if none parse, the
/// first Deployed machine is returned.
pub fn most_recent_deployed(machines: &[Machine]) -> Option<&Machine> {
    let deployed: Vec<&Machine> = machines
        .iter()
        .filter(|m| m.status() == MachineStatus::Deployed)
        .collect();

    deployed
        .iter()
        .filter(|m| m.last_update().is_some())
        .max_by_key(|m| m.last_update())
        .copied()
        .or_else(|| deployed.first().copied())
}

/// High-level machine lifecycle operations over a connected client
pub struct FleetManager<C: MachineApi = MaasClient> {
    client: C,
    reporter: Reporter,
    poll_interval: Duration,
    wait_timeout: Duration,
}

impl<C: MachineApi> FleetManager<C> {
    /// Create a manager using the configured poll interval and timeout
    pub fn new(client: C, reporter: Reporter, config: &MaasSection) -> Self {
        Self {
            client,
            reporter,
            poll_interval: config.poll_interval(),
            wait_timeout: config.wait_timeout(),
        }
    }

    /// List all machines as a table
    pub async fn list_machines(&self) -> Result<Vec<Machine>> {
        let machines = self.client.list_machines().await?;

        self.reporter.line(&reporter::machine_table_header());
        self.reporter.line(&reporter::machine_table_separator());
        for machine in &machines {
            self.reporter.line(&reporter::machine_row(machine));
        }

        Ok(machines)
    }

    /// List available OS distributions as a table
    pub async fn list_distros(&self) -> Result<()> {
        let resources = self.client.list_boot_resources().await?;

        self.reporter.line(&reporter::distro_table_header());
        self.reporter.line(&reporter::distro_table_separator());
        for resource in &resources {
            self.reporter.line(&reporter::distro_row(resource));
        }

        Ok(())
    }

    /// Find a machine by hostname and report its details
    ///
    /// The machine is re-fetched by system id so power information is
    /// current. Returns `None` (after reporting) when the hostname is
    /// unknown.
    pub async fn query_machine(&self, hostname: &str, quiet: bool) -> Result<Option<Machine>> {
        let machines = self.client.list_machines().await?;

        for m in machines {
            if m.hostname == hostname {
                let machine = self.client.get_machine(&m.system_id).await?;

                if !quiet {
                    self.reporter.line("\nMachine Details");
                    self.reporter.line(&"-".repeat(60));
                    self.reporter.line(&reporter::machine_details(&machine));
                }
                return Ok(Some(machine));
            }
        }

        self.reporter
            .line(&format!("Machine '{}' not found.", hostname));
        Ok(None)
    }

    /// Report the current status of a machine
    pub async fn get_status(&self, hostname: &str) -> Result<Option<String>> {
        let machine = self.query_machine(hostname, true).await?;
        Ok(match machine {
            Some(m) => {
                self.reporter.line(&format!(
                    "{} \u{2192} Current Status: {}",
                    hostname, m.status_name
                ));
                Some(m.status_name)
            }
            None => None,
        })
    }

    /// Deploy a machine unless its state forbids it
    ///
    /// Per-machine problems are reported, not fatal: an unknown hostname,
    /// an already-deployed machine, or a deploy rejection all produce a
    /// report line and a clean return.
    pub async fn deploy_machine(&self, hostname: &str, os: Option<&str>) -> Result<()> {
        let machines = self.client.list_machines().await?;
        let Some(machine) = machines.into_iter().find(|m| m.hostname == hostname) else {
            self.reporter
                .line(&format!("[ERROR] Machine '{}' not found.", hostname));
            return Ok(());
        };

        match deploy_check(&machine) {
            DeployCheck::AlreadyDeployed => {
                self.reporter.line(&format!(
                    "[INFO] Machine '{}' is already deployed.\n\
                     System ID: {}\n\
                     Status: {}\n\
                     Owner: {}\n\
                     Power Type: {}",
                    hostname,
                    machine.system_id,
                    machine.status_name,
                    machine.owner_display(),
                    machine.power_type_display()
                ));
            }
            DeployCheck::Blocked(_) => {
                self.reporter.line(&format!(
                    "[ERROR] Machine '{}' is in non-deployable state: {}",
                    hostname, machine.status_name
                ));
            }
            DeployCheck::Proceed => {
                self.trigger_deploy(&machine, os).await;
            }
        }

        Ok(())
    }

    /// Redeploy a single machine: release if deployed, wait for Ready,
    /// deploy, wait for Deployed
    pub async fn redeploy_machine(&self, hostname: &str, os: Option<&str>) -> Result<()> {
        let Some(machine) = self.query_machine(hostname, false).await? else {
            return Ok(());
        };

        // Same state guard as deploy: a broken machine is not redeployed
        if let DeployCheck::Blocked(_) = deploy_check(&machine) {
            self.reporter.line(&format!(
                "[ERROR] Machine '{}' is in non-deployable state: {}",
                hostname, machine.status_name
            ));
            return Ok(());
        }

        let os_to_use = os
            .map(str::to_string)
            .or_else(|| machine.distro_series.clone().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| DEFAULT_DISTRO.to_string());

        if machine.status() == MachineStatus::Deployed {
            self.release_machine(&machine).await?;
            if !self.wait_for_status(&machine.system_id, "Ready").await? {
                return Ok(());
            }
        }

        self.reporter.line(&format!(
            "[ACTION] Deploying '{}' with OS: {} (System ID: {})...",
            hostname, os_to_use, machine.system_id
        ));

        match self.client.deploy(&machine.system_id, Some(&os_to_use)).await {
            Ok(_) => {
                if self.wait_for_status(&machine.system_id, "Deployed").await? {
                    self.reporter.line(&format!(
                        "Machine {} successfully redeployed with {}",
                        hostname, os_to_use
                    ));
                }
            }
            Err(e) => {
                self.reporter
                    .line(&format!("[ERROR] Deploy failed for '{}': {}", hostname, e));
            }
        }

        Ok(())
    }

    /// Redeploy every machine in the fleet, one at a time
    pub async fn redeploy_all(&self, os: Option<&str>) -> Result<()> {
        let machines = self.client.list_machines().await?;
        for machine in machines {
            self.redeploy_machine(&machine.hostname, os).await?;
        }
        Ok(())
    }

    /// Report the most recently deployed machine
    pub async fn last_deployed(&self) -> Result<Option<Machine>> {
        let machines = self.client.list_machines().await?;

        match most_recent_deployed(&machines) {
            Some(m) => {
                self.reporter.line(&format!(
                    "Last deployed machine: {} ({})",
                    m.hostname, m.system_id
                ));
                Ok(Some(m.clone()))
            }
            None => {
                self.reporter.line("No deployed machines found.");
                Ok(None)
            }
        }
    }

    /// Release a machine if it is currently deployed
    async fn release_machine(&self, machine: &Machine) -> Result<()> {
        if machine.status() == MachineStatus::Deployed {
            self.reporter
                .line(&format!("Releasing machine {}...", machine.hostname));
            self.client.release(&machine.system_id).await?;
        }
        Ok(())
    }

    /// Poll until the machine reaches `expected` or the timeout elapses
    async fn wait_for_status(&self, system_id: &str, expected: &str) -> Result<bool> {
        let start = tokio::time::Instant::now();

        while start.elapsed() < self.wait_timeout {
            let machine = self.client.get_machine(system_id).await?;
            if machine.status_name.eq_ignore_ascii_case(expected) {
                self.reporter.line(&format!(
                    "{} reached status '{}'",
                    machine.hostname, expected
                ));
                return Ok(true);
            }
            debug!(
                "{} is '{}', waiting for '{}'",
                system_id, machine.status_name, expected
            );
            tokio::time::sleep(self.poll_interval).await;
        }

        self.reporter.line(&format!(
            "Timeout waiting for {} to reach {}",
            system_id, expected
        ));
        Ok(false)
    }

    async fn trigger_deploy(&self, machine: &Machine, os: Option<&str>) {
        self.reporter.line(&format!(
            "[ACTION] Deploying '{}' with OS: {} (System ID: {})...",
            machine.hostname,
            os.unwrap_or("(MAAS default)"),
            machine.system_id
        ));

        match self.client.deploy(&machine.system_id, os).await {
            Ok(_) => {
                self.reporter.line(&format!(
                    "[SUCCESS] Deployment triggered for '{}' with OS {}",
                    machine.hostname,
                    os.unwrap_or("(MAAS default)")
                ));
            }
            Err(e) => {
                self.reporter.line(&format!(
                    "[ERROR] Deploy failed for '{}': {}",
                    machine.hostname, e
                ));
            }
        }
    }
}
