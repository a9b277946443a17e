// file: src/main.rs
// version: 1.0.0
// guid: 0f82d6b1-4e97-4c20-85da-b39c61e07f54

//! MAAS Reimage - Main entry point

use clap::Parser;
use maas_reimage::{
    cli::{args::Cli, args::Commands, commands::*},
    config::ConfigLoader,
    logging::logger,
    Result,
};
use std::path::PathBuf;
use tokio::signal;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    logger::init_logger(cli.verbose, cli.quiet)?;

    let config = ConfigLoader::new().load(&cli.config)?;
    let log_file = cli.log_file.map(PathBuf::from);

    // Set up signal handling for graceful shutdown
    let shutdown_signal = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        warn!("Received Ctrl+C, shutting down...");
    };

    let command_future = async {
        match cli.command {
            Commands::List => list_command(&config, log_file).await,
            Commands::ListDistros => list_distros_command(&config, log_file).await,
            Commands::Query { hostname } => query_command(&config, log_file, &hostname).await,
            Commands::Status { hostname } => status_command(&config, log_file, &hostname).await,
            Commands::Deploy { hostname, os } => {
                deploy_command(&config, log_file, &hostname, os.as_deref()).await
            }
            Commands::Redeploy { hostname, os } => {
                redeploy_command(&config, log_file, &hostname, os.as_deref()).await
            }
            Commands::RedeployAll { os } => {
                redeploy_all_command(&config, log_file, os.as_deref()).await
            }
            Commands::LastDeployed => last_deployed_command(&config, log_file).await,
            Commands::InitCredentials { api_key } => {
                init_credentials_command(&config, &api_key).await
            }
        }
    };

    // Run command with signal handling
    tokio::select! {
        result = command_future => result,
        _ = shutdown_signal => {
            warn!("Interrupted by user");
            std::process::exit(130); // Standard exit code for Ctrl+C
        }
    }
}
