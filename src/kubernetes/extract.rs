// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubeconfig extraction from Cluster API secrets on the management cluster

use crate::constants::KUBECONFIG_SECRET_KEY;
use crate::error::{Result, UpdaterError};
use crate::types::cluster::{kubeconfig_secret_name, Cluster};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use tracing::{debug, info, instrument};

/// Where freshly provisioned clusters publish their admin kubeconfig
#[async_trait]
pub trait KubeconfigSource: Send + Sync {
    /// Cluster API phase of the cluster, `None` if it reports none yet
    async fn cluster_phase(&self, cluster_name: &str, namespace: &str) -> Result<Option<String>>;

    /// Raw single-cluster kubeconfig YAML
    async fn extract(&self, cluster_name: &str, namespace: &str) -> Result<String>;
}

/// Reads Cluster API resources through the management cluster's API server
pub struct ManagementCluster {
    client: Client,
}

impl ManagementCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KubeconfigSource for ManagementCluster {
    #[instrument(skip(self))]
    async fn cluster_phase(&self, cluster_name: &str, namespace: &str) -> Result<Option<String>> {
        let clusters: Api<Cluster> = Api::namespaced(self.client.clone(), namespace);
        let cluster = clusters.get(cluster_name).await.map_err(classify_error)?;
        Ok(cluster.phase().map(str::to_string))
    }

    #[instrument(skip(self))]
    async fn extract(&self, cluster_name: &str, namespace: &str) -> Result<String> {
        let secret_name = kubeconfig_secret_name(cluster_name);
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);

        info!("Reading kubeconfig secret '{}/{}'", namespace, secret_name);

        let secret = secrets.get(&secret_name).await.map_err(|e| match e {
            kube::Error::Api(err) if err.code == 404 => UpdaterError::ClusterNotReady {
                cluster: cluster_name.to_string(),
                reason: "secret not found - cluster may not be ready yet".to_string(),
            },
            other => classify_error(other),
        })?;

        decode_kubeconfig(&secret, &secret_name)
    }
}

/// Pull the kubeconfig out of the secret's `value` key
fn decode_kubeconfig(secret: &Secret, secret_name: &str) -> Result<String> {
    let Some(data) = secret
        .data
        .as_ref()
        .and_then(|d| d.get(KUBECONFIG_SECRET_KEY))
        .filter(|v| !v.0.is_empty())
    else {
        return Err(UpdaterError::Extraction(format!(
            "secret {} exists but has no data",
            secret_name
        )));
    };

    debug!("Decoded {} bytes of kubeconfig", data.0.len());
    String::from_utf8(data.0.clone()).map_err(|e| {
        UpdaterError::Extraction(format!(
            "kubeconfig in secret {} is not valid UTF-8: {}",
            secret_name, e
        ))
    })
}

/// Transport failures mean the management cluster is unreachable
fn classify_error(e: kube::Error) -> UpdaterError {
    match e {
        kube::Error::HyperError(err) => UpdaterError::Connection(err.to_string()),
        kube::Error::Service(err) => UpdaterError::Connection(err.to_string()),
        other => UpdaterError::KubeError(other),
    }
}
