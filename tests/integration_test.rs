// file: tests/integration_test.rs
// version: 1.0.0
// guid: 5d3a90f6-8c21-4e7b-9a04-67e2f51b8d39

//! Integration tests for the MAAS reimage tool

use assert_cmd::Command;
use maas_reimage::{
    auth::{ApiKey, CredentialStore},
    config::ConfigLoader,
    maas::{Machine, MachineStatus},
    Result,
};
use predicates::prelude::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_config_loading_integration() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();

    let config_content = r#"
[maas]
maas_url = "http://maas.example.com:5240/MAAS"
key_file = "keys/maas_api.key"
credentials_file = "keys/maas_api_key.encrypted"
log_file = "redeploy.log"
connect_retries = 5
status_poll_interval = 2
status_timeout = 60
"#;

    let config_path = temp_dir.path().join("maas.toml");
    tokio::fs::write(&config_path, config_content).await?;

    let loader = ConfigLoader::new();
    let config = loader.load(&config_path)?;

    assert_eq!(config.maas.maas_url, "http://maas.example.com:5240/MAAS");
    assert_eq!(config.maas.connect_retries, 5);
    assert_eq!(config.maas.status_poll_interval, 2);
    assert_eq!(
        config.maas.key_file,
        std::path::PathBuf::from("keys/maas_api.key")
    );

    Ok(())
}

#[tokio::test]
async fn test_credential_store_integration() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();

    let store = CredentialStore::new(
        temp_dir.path().join("maas_api.key"),
        temp_dir.path().join("maas_api_key.encrypted"),
    );

    store.init("AbCdEf:GhIjKl:MnOpQr")?;

    // The encrypted file never contains the plaintext key parts
    let token =
        tokio::fs::read_to_string(temp_dir.path().join("maas_api_key.encrypted")).await?;
    assert!(!token.contains("AbCdEf"));
    assert!(!token.contains("MnOpQr"));

    let key: ApiKey = store.load()?;
    assert_eq!(key.consumer_key, "AbCdEf");
    assert_eq!(key.token_key, "GhIjKl");
    assert_eq!(key.token_secret, "MnOpQr");

    Ok(())
}

#[test]
fn test_machine_model_from_api_listing() {
    // A trimmed-down machines/ listing as MAAS returns it
    let listing = r#"[
        {
            "system_id": "4y3h8a",
            "hostname": "rack-01",
            "status_name": "Deployed",
            "osystem": "ubuntu",
            "distro_series": "jammy",
            "owner": null,
            "power_state": "on",
            "power_type": "ipmi",
            "updated": "2024-05-20T09:30:00.000000"
        },
        {
            "system_id": "7k2p1c",
            "hostname": "rack-02",
            "status_name": "Failed deployment",
            "distro_series": ""
        }
    ]"#;

    let machines: Vec<Machine> = serde_json::from_str(listing).unwrap();
    assert_eq!(machines.len(), 2);
    assert_eq!(machines[0].status(), MachineStatus::Deployed);
    assert!(machines[0].last_update().is_some());
    assert_eq!(machines[1].status(), MachineStatus::Failed);
    assert_eq!(machines[1].distro_display(), "-");
}

#[test]
fn test_cli_help_lists_actions() {
    Command::cargo_bin("maas-reimage")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("list-distros"))
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("redeploy"))
        .stdout(predicate::str::contains("redeploy-all"))
        .stdout(predicate::str::contains("last-deployed"));
}

#[test]
fn test_cli_query_requires_hostname() {
    Command::cargo_bin("maas-reimage")
        .unwrap()
        .arg("query")
        .assert()
        .failure();
}

#[test]
fn test_cli_fails_cleanly_without_config() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("maas-reimage")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maas.toml"));
}

#[test]
fn test_cli_init_credentials_end_to_end() {
    let temp_dir = TempDir::new().unwrap();

    let config_content = "[maas]\nmaas_url = \"http://maas.example.com:5240/MAAS\"\n";
    std::fs::write(temp_dir.path().join("maas.toml"), config_content).unwrap();

    Command::cargo_bin("maas-reimage")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["init-credentials", "consumer:token:secret"])
        .assert()
        .success();

    // Default file names from the config apply
    let store = CredentialStore::new(
        temp_dir.path().join("maas_api.key"),
        temp_dir.path().join("maas_api_key.encrypted"),
    );
    let key = store.load().unwrap();
    assert_eq!(key.consumer_key, "consumer");
    assert_eq!(key.token_secret, "secret");
}

#[test]
fn test_cli_init_credentials_rejects_malformed_key() {
    let temp_dir = TempDir::new().unwrap();

    let config_content = "[maas]\nmaas_url = \"http://maas.example.com:5240/MAAS\"\n";
    std::fs::write(temp_dir.path().join("maas.toml"), config_content).unwrap();

    Command::cargo_bin("maas-reimage")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["init-credentials", "not-a-key"])
        .assert()
        .failure();

    assert!(!temp_dir.path().join("maas_api.key").exists());
}
