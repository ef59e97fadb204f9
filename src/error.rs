// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::fmt;
use thiserror::Error;

/// Which input of an engine call a parse failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    /// The merged kubeconfig read from the secret store
    Existing,
    /// The freshly extracted single-cluster kubeconfig
    New,
    /// A document handed directly to `parse`
    Input,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Existing => f.write_str("existing"),
            DocumentRole::New => f.write_str("new"),
            DocumentRole::Input => f.write_str("input"),
        }
    }
}

/// Errors raised by the kubeconfig engine
#[derive(Error, Debug)]
pub enum KubeconfigError {
    #[error("parse {document} kubeconfig: {source}")]
    Parse {
        document: DocumentRole,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("encode kubeconfig: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl KubeconfigError {
    /// True for malformed input, false for emitter failures
    pub fn is_parse_error(&self) -> bool {
        matches!(self, KubeconfigError::Parse { .. })
    }
}

/// Process exit codes
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const CONFIG_ERROR: u8 = 2;
    pub const CLUSTER_NOT_READY: u8 = 3;
    pub const VAULT_AUTH_FAILED: u8 = 4;
    pub const CONTEXT_NOT_FOUND: u8 = 5;
}

#[derive(Error, Debug)]
pub enum UpdaterError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error(transparent)]
    Kubeconfig(#[from] KubeconfigError),

    #[error("Failed to load local kubeconfig: {0}")]
    LocalKubeconfig(String),

    #[error("Cluster {cluster} not ready: {reason}")]
    ClusterNotReady { cluster: String, reason: String },

    #[error("Cannot connect to management cluster: {0}")]
    Connection(String),

    #[error("Kubeconfig extraction failed: {0}")]
    Extraction(String),

    #[error("Context {context} not found in kubeconfig")]
    ContextNotFound {
        context: String,
        available: Vec<String>,
    },

    #[error("Vault auth failed: {0}")]
    VaultAuth(String),

    #[error("Vault request failed: {0}")]
    Vault(String),

    #[error("Invalid vault path format: {0} (expected: mount/path)")]
    InvalidVaultPath(String),
}

impl UpdaterError {
    /// Whether a failed extraction attempt is worth repeating.
    /// An unreachable management cluster is not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            UpdaterError::ClusterNotReady { .. }
                | UpdaterError::Extraction(_)
                | UpdaterError::KubeError(_)
        )
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            UpdaterError::ClusterNotReady { .. } => exit_code::CLUSTER_NOT_READY,
            UpdaterError::VaultAuth(_) => exit_code::VAULT_AUTH_FAILED,
            UpdaterError::ContextNotFound { .. } => exit_code::CONTEXT_NOT_FOUND,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, UpdaterError>;
