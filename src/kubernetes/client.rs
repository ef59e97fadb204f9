// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Management cluster client creation from the local kubeconfig

use crate::error::{Result, UpdaterError};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Read the local kubeconfig from `path`, or from `$KUBECONFIG` / `~/.kube/config`
pub fn load_kubeconfig(path: Option<&Path>) -> Result<Kubeconfig> {
    let kubeconfig = match path {
        Some(p) => Kubeconfig::read_from(p),
        None => Kubeconfig::read(),
    };
    kubeconfig.map_err(|e| UpdaterError::LocalKubeconfig(e.to_string()))
}

/// Names of all contexts in a kubeconfig, in file order
pub fn context_names(kubeconfig: &Kubeconfig) -> Vec<String> {
    kubeconfig.contexts.iter().map(|c| c.name.clone()).collect()
}

/// Fail with `ContextNotFound` unless `context` exists in the kubeconfig
pub fn ensure_context(kubeconfig: &Kubeconfig, context: &str) -> Result<()> {
    let available = context_names(kubeconfig);
    if available.iter().any(|c| c == context) {
        return Ok(());
    }
    debug!("Available contexts: {:?}", available);
    Err(UpdaterError::ContextNotFound {
        context: context.to_string(),
        available,
    })
}

/// Create a Kubernetes client for the management cluster bound to `context`
#[instrument(skip(kubeconfig))]
pub async fn management_client(kubeconfig: Kubeconfig, context: &str) -> Result<Client> {
    ensure_context(&kubeconfig, context)?;

    let options = KubeConfigOptions {
        context: Some(context.to_string()),
        ..Default::default()
    };
    let client_config = KConfig::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| UpdaterError::LocalKubeconfig(format!("Failed to create config: {}", e)))?;

    info!("Using management context {}", context);
    Client::try_from(client_config)
        .map_err(|e| UpdaterError::LocalKubeconfig(format!("Failed to create client: {}", e)))
}
