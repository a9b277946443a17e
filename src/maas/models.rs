// file: src/maas/models.rs
// version: 1.0.0
// guid: 1b6f40a9-8d25-4c7e-93b0-e62a81f5d704

//! Data models for MAAS API responses

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// A machine managed by MAAS
#[derive(Debug, Clone, Deserialize)]
pub struct Machine {
    pub system_id: String,
    pub hostname: String,
    #[serde(default)]
    pub status_name: String,
    #[serde(default)]
    pub osystem: Option<String>,
    #[serde(default)]
    pub distro_series: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub power_state: Option<String>,
    #[serde(default)]
    pub power_type: Option<String>,
    #[serde(default)]
    pub cpu_count: Option<u32>,
    #[serde(default)]
    pub memory: Option<u64>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

/// Machine owner, which MAAS reports either as a bare username string or
/// as a user record object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Owner {
    Record { username: String },
    Name(String),
}

impl Machine {
    /// Parsed lifecycle status
    pub fn status(&self) -> MachineStatus {
        self.status_name.parse().unwrap_or(MachineStatus::Unknown)
    }

    /// Distro series for display, `-` when absent
    pub fn distro_display(&self) -> &str {
        non_empty(&self.distro_series).unwrap_or("-")
    }

    /// OS type for display, `-` when absent
    pub fn osystem_display(&self) -> &str {
        non_empty(&self.osystem).unwrap_or("-")
    }

    /// Owner name for display, `-` when unowned
    pub fn owner_display(&self) -> &str {
        match &self.owner {
            Some(Owner::Record { username }) => username,
            Some(Owner::Name(name)) if !name.is_empty() => name,
            _ => "-",
        }
    }

    /// Power state for display
    pub fn power_state_display(&self) -> &str {
        non_empty(&self.power_state).unwrap_or("Unknown")
    }

    /// Power type for display
    pub fn power_type_display(&self) -> &str {
        non_empty(&self.power_type).unwrap_or("Unknown")
    }

    /// Most recent timestamp MAAS reported for this machine, if one parses
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        [&self.updated, &self.created]
            .into_iter()
            .flatten()
            .find_map(|s| parse_timestamp(s))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Parse the timestamp formats MAAS has used across versions
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // ISO without zone, e.g. "2024-03-01T12:00:00.000000"
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    // Legacy human format, e.g. "Thu, 02 Nov. 2017 21:10:16"
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%a, %d %b. %Y %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

/// Machine lifecycle status, parsed case-insensitively from `status_name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineStatus {
    Deployed,
    Deploying,
    Ready,
    Releasing,
    Allocated,
    Failed,
    Broken,
    Error,
    Unknown,
    Other(String),
}

impl MachineStatus {
    /// States in which a machine must not be deployed
    pub fn blocks_deploy(&self) -> bool {
        matches!(
            self,
            MachineStatus::Failed
                | MachineStatus::Broken
                | MachineStatus::Error
                | MachineStatus::Unknown
        )
    }
}

impl std::str::FromStr for MachineStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Ok(match lower.as_str() {
            "deployed" => MachineStatus::Deployed,
            "deploying" => MachineStatus::Deploying,
            "ready" => MachineStatus::Ready,
            "releasing" => MachineStatus::Releasing,
            "allocated" => MachineStatus::Allocated,
            "broken" => MachineStatus::Broken,
            "error" => MachineStatus::Error,
            "unknown" => MachineStatus::Unknown,
            // MAAS reports e.g. "Failed deployment", "Failed commissioning"
            _ if lower.starts_with("failed") => MachineStatus::Failed,
            _ => MachineStatus::Other(s.trim().to_string()),
        })
    }
}

impl std::fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineStatus::Deployed => write!(f, "Deployed"),
            MachineStatus::Deploying => write!(f, "Deploying"),
            MachineStatus::Ready => write!(f, "Ready"),
            MachineStatus::Releasing => write!(f, "Releasing"),
            MachineStatus::Allocated => write!(f, "Allocated"),
            MachineStatus::Failed => write!(f, "Failed"),
            MachineStatus::Broken => write!(f, "Broken"),
            MachineStatus::Error => write!(f, "Error"),
            MachineStatus::Unknown => write!(f, "Unknown"),
            MachineStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A boot resource (installable OS image) known to MAAS
#[derive(Debug, Clone, Deserialize)]
pub struct BootResource {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(rename = "type", default)]
    pub rtype: Option<String>,
}

impl BootResource {
    /// Split `name` into OS type and release, e.g. `ubuntu/focal`
    pub fn os_release(&self) -> (&str, &str) {
        match self.name.split_once('/') {
            Some((os, release)) => (os, release),
            None if !self.name.is_empty() => (self.name.as_str(), "-"),
            None => ("-", "-"),
        }
    }

    /// Architecture for display
    pub fn arch_display(&self) -> &str {
        self.architecture
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_json() -> &'static str {
        r#"{
            "system_id": "abc123",
            "hostname": "node-01",
            "status_name": "Deployed",
            "osystem": "ubuntu",
            "distro_series": "focal",
            "owner": "admin",
            "power_state": "on",
            "power_type": "ipmi",
            "cpu_count": 16,
            "memory": 65536,
            "updated": "2024-03-01T12:00:00.000000",
            "extra_field_we_ignore": true
        }"#
    }

    #[test]
    fn test_machine_deserialization() {
        let m: Machine = serde_json::from_str(machine_json()).unwrap();
        assert_eq!(m.system_id, "abc123");
        assert_eq!(m.hostname, "node-01");
        assert_eq!(m.status(), MachineStatus::Deployed);
        assert_eq!(m.distro_display(), "focal");
        assert_eq!(m.owner_display(), "admin");
        assert_eq!(m.power_state_display(), "on");
    }

    #[test]
    fn test_owner_as_object() {
        let m: Machine = serde_json::from_str(
            r#"{"system_id": "x", "hostname": "h", "owner": {"username": "ops", "is_superuser": false}}"#,
        )
        .unwrap();
        assert_eq!(m.owner_display(), "ops");
    }

    #[test]
    fn test_owner_null_and_missing() {
        let m: Machine =
            serde_json::from_str(r#"{"system_id": "x", "hostname": "h", "owner": null}"#).unwrap();
        assert_eq!(m.owner_display(), "-");

        let m: Machine = serde_json::from_str(r#"{"system_id": "x", "hostname": "h"}"#).unwrap();
        assert_eq!(m.owner_display(), "-");
        assert_eq!(m.distro_display(), "-");
    }

    #[test]
    fn test_empty_distro_displays_dash() {
        let m: Machine = serde_json::from_str(
            r#"{"system_id": "x", "hostname": "h", "distro_series": ""}"#,
        )
        .unwrap();
        assert_eq!(m.distro_display(), "-");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Deployed".parse::<MachineStatus>().unwrap(), MachineStatus::Deployed);
        assert_eq!("ready".parse::<MachineStatus>().unwrap(), MachineStatus::Ready);
        assert_eq!(
            "Failed deployment".parse::<MachineStatus>().unwrap(),
            MachineStatus::Failed
        );
        assert_eq!("Broken".parse::<MachineStatus>().unwrap(), MachineStatus::Broken);
        assert_eq!(
            "Commissioning".parse::<MachineStatus>().unwrap(),
            MachineStatus::Other("Commissioning".to_string())
        );
    }

    #[test]
    fn test_blocks_deploy() {
        assert!(MachineStatus::Failed.blocks_deploy());
        assert!(MachineStatus::Broken.blocks_deploy());
        assert!(MachineStatus::Unknown.blocks_deploy());
        assert!(!MachineStatus::Ready.blocks_deploy());
        assert!(!MachineStatus::Deployed.blocks_deploy());
    }

    #[test]
    fn test_timestamp_formats() {
        let m: Machine = serde_json::from_str(
            r#"{"system_id": "x", "hostname": "h", "updated": "2024-03-01T12:00:00.000000"}"#,
        )
        .unwrap();
        assert!(m.last_update().is_some());

        let m: Machine = serde_json::from_str(
            r#"{"system_id": "x", "hostname": "h", "updated": "2024-03-01T12:00:00+00:00"}"#,
        )
        .unwrap();
        assert!(m.last_update().is_some());

        let m: Machine = serde_json::from_str(
            r#"{"system_id": "x", "hostname": "h", "updated": "Thu, 02 Nov. 2017 21:10:16"}"#,
        )
        .unwrap();
        assert!(m.last_update().is_some());

        let m: Machine = serde_json::from_str(
            r#"{"system_id": "x", "hostname": "h", "updated": "not a time"}"#,
        )
        .unwrap();
        assert!(m.last_update().is_none());
    }

    #[test]
    fn test_boot_resource_split() {
        let r: BootResource = serde_json::from_str(
            r#"{"id": 7, "name": "ubuntu/focal", "architecture": "amd64/generic", "type": "Synced"}"#,
        )
        .unwrap();
        assert_eq!(r.os_release(), ("ubuntu", "focal"));
        assert_eq!(r.arch_display(), "amd64/generic");

        let r: BootResource = serde_json::from_str(r#"{"id": 8, "name": "esxi"}"#).unwrap();
        assert_eq!(r.os_release(), ("esxi", "-"));
    }
}
