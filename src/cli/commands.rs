// file: src/cli/commands.rs
// version: 1.0.0
// guid: 91c5e2a7-0d84-4b36-af59-3e671d08c4b2

//! Command implementations for the CLI

use crate::{
    auth::CredentialStore,
    config::MaasConfig,
    fleet::FleetManager,
    maas::MaasClient,
    reporter::Reporter,
    Result,
};
use std::path::PathBuf;
use tracing::info;

/// Decrypt the stored credentials, connect to MAAS and build the fleet
/// manager all commands run against
async fn connect_fleet(config: &MaasConfig, log_file: Option<PathBuf>) -> Result<FleetManager> {
    let store = CredentialStore::new(&config.maas.key_file, &config.maas.credentials_file);
    let api_key = store.load()?;

    let client = MaasClient::connect(
        &config.maas.maas_url,
        api_key,
        config.maas.connect_retries,
    )
    .await?;

    let log_file = log_file.unwrap_or_else(|| config.maas.log_file.clone());
    let reporter = Reporter::new(Some(log_file));

    Ok(FleetManager::new(client, reporter, &config.maas))
}

/// List all machines
pub async fn list_command(config: &MaasConfig, log_file: Option<PathBuf>) -> Result<()> {
    let fleet = connect_fleet(config, log_file).await?;
    fleet.list_machines().await?;
    Ok(())
}

/// List available OS distributions
pub async fn list_distros_command(config: &MaasConfig, log_file: Option<PathBuf>) -> Result<()> {
    let fleet = connect_fleet(config, log_file).await?;
    fleet.list_distros().await
}

/// Show detailed information for one machine
pub async fn query_command(
    config: &MaasConfig,
    log_file: Option<PathBuf>,
    hostname: &str,
) -> Result<()> {
    let fleet = connect_fleet(config, log_file).await?;
    fleet.query_machine(hostname, false).await?;
    Ok(())
}

/// Show the current status of one machine
pub async fn status_command(
    config: &MaasConfig,
    log_file: Option<PathBuf>,
    hostname: &str,
) -> Result<()> {
    let fleet = connect_fleet(config, log_file).await?;
    fleet.get_status(hostname).await?;
    Ok(())
}

/// Deploy a machine unless its state forbids it
pub async fn deploy_command(
    config: &MaasConfig,
    log_file: Option<PathBuf>,
    hostname: &str,
    os: Option<&str>,
) -> Result<()> {
    let fleet = connect_fleet(config, log_file).await?;
    fleet.deploy_machine(hostname, os).await
}

/// Release and redeploy a machine
pub async fn redeploy_command(
    config: &MaasConfig,
    log_file: Option<PathBuf>,
    hostname: &str,
    os: Option<&str>,
) -> Result<()> {
    let fleet = connect_fleet(config, log_file).await?;
    fleet.redeploy_machine(hostname, os).await
}

/// Release and redeploy every machine
pub async fn redeploy_all_command(
    config: &MaasConfig,
    log_file: Option<PathBuf>,
    os: Option<&str>,
) -> Result<()> {
    let fleet = connect_fleet(config, log_file).await?;
    fleet.redeploy_all(os).await
}

/// Show the most recently deployed machine
pub async fn last_deployed_command(config: &MaasConfig, log_file: Option<PathBuf>) -> Result<()> {
    let fleet = connect_fleet(config, log_file).await?;
    fleet.last_deployed().await?;
    Ok(())
}

/// Encrypt an API key into the configured credential files
pub async fn init_credentials_command(config: &MaasConfig, api_key: &str) -> Result<()> {
    let store = CredentialStore::new(&config.maas.key_file, &config.maas.credentials_file);
    store.init(api_key)?;

    info!(
        "Encrypted credentials written to {} (key in {})",
        config.maas.credentials_file.display(),
        config.maas.key_file.display()
    );
    Ok(())
}
