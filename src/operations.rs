// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Upsert and delete workflows around the kubeconfig engine.

use crate::config::{Config, Operation};
use crate::constants::{DRY_RUN_PREVIEW_CHARS, PHASE_PROVISIONED};
use crate::error::{Result, UpdaterError};
use crate::kubeconfig;
use crate::kubernetes::{load_kubeconfig, management_client, KubeconfigSource, ManagementCluster};
use crate::retry::retry;
use crate::vault::{SecretStore, VaultClient};
use tracing::{debug, error, info, instrument, warn};

/// What a workflow did to the stored kubeconfig
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The secret was written
    Updated,
    /// Nothing to change, the secret was left alone
    Unchanged,
    /// The secret would have been written with the previewed content
    DryRun { preview: String },
}

/// Connect the real collaborators and run the configured operation
pub async fn run(config: &Config) -> Result<Outcome> {
    info!(
        "Starting kubeconfig management for cluster: {}",
        config.cluster_name
    );
    debug!(
        "Options: namespace={}, vault-path={}, operation={}",
        config.namespace, config.vault_path, config.operation
    );

    let store = VaultClient::new(&config.vault_addr, &config.vault_token, &config.vault_path)
        .map_err(|e| {
            error!("Failed to initialize Vault client: {}", e);
            UpdaterError::VaultAuth(e.to_string())
        })?;

    match config.operation {
        Operation::Upsert => {
            info!("Switching to management context: {}", config.management_context);
            let local = load_kubeconfig(config.kubeconfig.as_deref())?;
            let client = management_client(local, &config.management_context).await?;
            let source = ManagementCluster::new(client);
            upsert_cluster(config, &source, &store).await
        }
        Operation::Delete => delete_cluster(config, &store).await,
    }
}

/// Extract the cluster's kubeconfig and merge it into the stored one
#[instrument(skip_all, fields(cluster = %config.cluster_name))]
pub async fn upsert_cluster(
    config: &Config,
    source: &dyn KubeconfigSource,
    store: &dyn SecretStore,
) -> Result<Outcome> {
    let cluster = config.cluster_name.as_str();
    let namespace = config.namespace.as_str();

    if !config.skip_readiness_check {
        match source.cluster_phase(cluster, namespace).await {
            Ok(phase) => {
                let phase = phase.unwrap_or_default();
                info!("Cluster {} phase: {}", cluster, phase);
                if phase != PHASE_PROVISIONED {
                    warn!(
                        "Cluster is not in {} state (phase={}), continuing anyway",
                        PHASE_PROVISIONED, phase
                    );
                }
            }
            Err(e) => warn!("Could not check cluster status: {}", e),
        }
    }

    info!("Extracting kubeconfig from secret {}-kubeconfig", cluster);
    let policy = config.retry;
    let new_kubeconfig = retry(
        policy,
        || source.extract(cluster, namespace),
        |attempt, e| {
            warn!(
                "Attempt {}/{} failed: {}. Retrying in {:?}...",
                attempt, policy.attempts, e, policy.delay
            );
        },
    )
    .await
    .map_err(|e| {
        error!("Failed to extract kubeconfig: {}", e);
        e
    })?;
    info!("Successfully extracted kubeconfig");

    let existing = match store.get(&config.vault_key).await? {
        Some(existing) => {
            info!("Found existing kubeconfig in Vault");
            existing
        }
        None => {
            info!("No existing kubeconfig found in Vault - will create new one");
            String::new()
        }
    };

    info!("Merging kubeconfig for cluster: {}", cluster);
    let merged = kubeconfig::merge(&existing, &new_kubeconfig, cluster)?;

    if config.dry_run {
        let preview = preview(&merged);
        info!("[DRY RUN] Would update Vault at: {}", config.vault_path);
        info!("[DRY RUN] Kubeconfig preview:\n{}", preview);
        return Ok(Outcome::DryRun { preview });
    }

    info!("Updating kubeconfig in Vault");
    store.put(&config.vault_key, &merged).await?;
    info!("Successfully updated kubeconfig for cluster: {}", cluster);
    Ok(Outcome::Updated)
}

/// Remove the cluster from the stored kubeconfig
#[instrument(skip_all, fields(cluster = %config.cluster_name))]
pub async fn delete_cluster(config: &Config, store: &dyn SecretStore) -> Result<Outcome> {
    let cluster = config.cluster_name.as_str();

    info!("Reading existing kubeconfig from Vault");
    let Some(existing) = store.get(&config.vault_key).await? else {
        info!("No kubeconfig found in Vault - nothing to delete");
        return Ok(Outcome::Unchanged);
    };

    info!("Deleting cluster {} from kubeconfig", cluster);
    let updated = kubeconfig::delete(&existing, cluster)?;

    if updated == existing {
        info!("Cluster {} not found in kubeconfig - nothing to delete", cluster);
        return Ok(Outcome::Unchanged);
    }

    if config.dry_run {
        let preview = preview(&updated);
        info!("[DRY RUN] Would delete cluster: {}", cluster);
        info!("[DRY RUN] Updated kubeconfig preview:\n{}", preview);
        return Ok(Outcome::DryRun { preview });
    }

    info!("Updating Vault with modified kubeconfig");
    store.put(&config.vault_key, &updated).await?;
    info!("Successfully deleted cluster: {}", cluster);
    Ok(Outcome::Updated)
}

/// First characters of a kubeconfig, for dry-run output
fn preview(kubeconfig: &str) -> String {
    match kubeconfig.char_indices().nth(DRY_RUN_PREVIEW_CHARS) {
        Some((end, _)) => format!("{}...", &kubeconfig[..end]),
        None => kubeconfig.to_string(),
    }
}
