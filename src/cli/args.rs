// file: src/cli/args.rs
// version: 1.0.0
// guid: 64b09e7d-2a53-4f18-9c6b-d805f13a27e9

//! Command line argument definitions

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "maas-reimage")]
#[command(about = "MAAS machine lifecycle automation: list, query, deploy and redeploy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Override the log file from the configuration
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all machines
    List,

    /// List available OS distributions and releases
    ListDistros,

    /// Show detailed information for one machine
    Query {
        /// Target machine hostname
        hostname: String,
    },

    /// Show the current status of one machine
    Status {
        /// Target machine hostname
        hostname: String,
    },

    /// Deploy a machine (refused when already deployed)
    Deploy {
        /// Target machine hostname
        hostname: String,

        /// OS release to deploy (e.g. focal, jammy, centos-9-stream)
        #[arg(long)]
        os: Option<String>,
    },

    /// Release and redeploy a machine
    Redeploy {
        /// Target machine hostname
        hostname: String,

        /// OS release to deploy; defaults to the machine's current series
        #[arg(long)]
        os: Option<String>,
    },

    /// Release and redeploy every machine, one at a time
    RedeployAll {
        /// OS release to deploy; defaults to each machine's current series
        #[arg(long)]
        os: Option<String>,
    },

    /// Show the most recently deployed machine
    LastDeployed,

    /// Encrypt a MAAS API key into the configured credential files
    InitCredentials {
        /// API key in '<consumer>:<token>:<secret>' form
        api_key: String,
    },
}
