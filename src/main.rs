// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cicd_update_kubeconfig::config::{Args, Config};
use cicd_update_kubeconfig::error::exit_code;
use cicd_update_kubeconfig::operations::{self, Outcome};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG wins over --debug
    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(exit_code::CONFIG_ERROR);
        }
    };

    match operations::run(&config).await {
        Ok(Outcome::Updated) => {
            info!("Vault kubeconfig updated for cluster {}", config.cluster_name);
            ExitCode::from(exit_code::SUCCESS)
        }
        Ok(Outcome::Unchanged) => {
            info!("Vault kubeconfig already up to date");
            ExitCode::from(exit_code::SUCCESS)
        }
        Ok(Outcome::DryRun { .. }) => ExitCode::from(exit_code::SUCCESS),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
