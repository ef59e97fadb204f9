// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{defaults, env as env_vars, retry};
use crate::retry::RetryPolicy;
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Manage Talos cluster kubeconfigs in Vault
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cicd-update-kubeconfig",
    version,
    about = "Manage Talos cluster kubeconfigs in Vault",
    long_about = "Extracts Talos cluster kubeconfigs from Cluster API and merges them into a single kubeconfig stored in HashiCorp Vault."
)]
pub struct Args {
    /// Cluster name
    #[arg(long)]
    pub cluster_name: String,

    /// Namespace where the cluster is deployed
    #[arg(long, default_value = defaults::NAMESPACE)]
    pub namespace: String,

    /// Vault secret path in format mount/path
    #[arg(long)]
    pub vault_path: String,

    /// Vault server address
    #[arg(long)]
    pub vault_addr: String,

    /// Key name in the Vault secret
    #[arg(long, default_value = defaults::VAULT_KEY)]
    pub vault_key: String,

    /// Kubectl context of the management cluster
    #[arg(long)]
    pub management_context: String,

    /// Local kubeconfig file (defaults to $KUBECONFIG or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Skip the cluster readiness check
    #[arg(long)]
    pub skip_readiness_check: bool,

    /// Simulate without updating Vault
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Operation: upsert (aliases: create, update) or delete
    #[arg(long, default_value = defaults::OPERATION)]
    pub operation: String,

    /// Kubeconfig extraction attempts
    #[arg(long, default_value_t = retry::ATTEMPTS)]
    pub retry_attempts: u32,

    /// Seconds to wait between extraction attempts
    #[arg(long, default_value_t = retry::DELAY_SECS)]
    pub retry_delay_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Upsert,
    Delete,
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "upsert" | "create" | "update" => Ok(Operation::Upsert),
            "delete" => Ok(Operation::Delete),
            other => bail!("invalid operation: {} (must be upsert or delete)", other),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Upsert => f.write_str("upsert"),
            Operation::Delete => f.write_str("delete"),
        }
    }
}

/// Runtime configuration resolved from flags and environment variables
#[derive(Clone)]
pub struct Config {
    pub cluster_name: String,
    pub namespace: String,
    pub vault_path: String,
    pub vault_addr: String,
    pub vault_key: String,
    pub vault_token: String,
    pub management_context: String,
    pub kubeconfig: Option<PathBuf>,
    pub skip_readiness_check: bool,
    pub dry_run: bool,
    pub operation: Operation,
    pub retry: RetryPolicy,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("cluster_name", &self.cluster_name)
            .field("namespace", &self.namespace)
            .field("vault_path", &self.vault_path)
            .field("vault_addr", &self.vault_addr)
            .field("vault_key", &self.vault_key)
            .field("vault_token", &"<redacted>")
            .field("management_context", &self.management_context)
            .field("kubeconfig", &self.kubeconfig)
            .field("skip_readiness_check", &self.skip_readiness_check)
            .field("dry_run", &self.dry_run)
            .field("operation", &self.operation)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Config {
    /// Combine parsed flags with the Vault token and operation override from the environment
    pub fn from_args(args: Args) -> Result<Self> {
        let vault_token = env::var(env_vars::VAULT_TOKEN)
            .ok()
            .filter(|t| !t.is_empty())
            .with_context(|| format!("{} environment variable is required", env_vars::VAULT_TOKEN))?;
        let operation_override = env::var(env_vars::OPERATION).ok();

        Self::resolve(args, vault_token, operation_override)
    }

    /// Build the configuration from explicit values
    pub fn resolve(
        args: Args,
        vault_token: String,
        operation_override: Option<String>,
    ) -> Result<Self> {
        let operation = operation_override
            .filter(|op| !op.is_empty())
            .unwrap_or(args.operation)
            .parse()?;

        if args.retry_attempts == 0 {
            bail!("--retry-attempts must be at least 1");
        }

        Ok(Config {
            cluster_name: args.cluster_name,
            namespace: args.namespace,
            vault_path: args.vault_path,
            vault_addr: args.vault_addr,
            vault_key: args.vault_key,
            vault_token,
            management_context: args.management_context,
            kubeconfig: args.kubeconfig,
            skip_readiness_check: args.skip_readiness_check,
            dry_run: args.dry_run,
            operation,
            retry: RetryPolicy {
                attempts: args.retry_attempts,
                delay: Duration::from_secs(args.retry_delay_secs),
            },
        })
    }
}
