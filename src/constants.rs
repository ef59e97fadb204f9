// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read besides the command-line flags
pub mod env {
    /// Vault token, required
    pub const VAULT_TOKEN: &str = "TF_VAR_VAULT_TOKEN";
    /// When set, overrides `--operation`
    pub const OPERATION: &str = "OPERATION";
}

/// Command-line defaults
pub mod defaults {
    /// Namespace holding Cluster API clusters
    pub const NAMESPACE: &str = "clusters";
    /// Key of the merged kubeconfig inside the Vault secret
    pub const VAULT_KEY: &str = "KUBECONFIG";
    pub const OPERATION: &str = "upsert";
}

/// Extraction retry configuration
pub mod retry {
    pub const ATTEMPTS: u32 = 3;
    pub const DELAY_SECS: u64 = 30;
}

/// Data key of the Cluster API kubeconfig secret
pub const KUBECONFIG_SECRET_KEY: &str = "value";

/// Cluster API phase of a fully provisioned cluster
pub const PHASE_PROVISIONED: &str = "Provisioned";

/// Vault request timeout in seconds
pub const VAULT_TIMEOUT_SECS: u64 = 30;

/// Characters of the resulting kubeconfig shown in dry-run mode
pub const DRY_RUN_PREVIEW_CHARS: usize = 200;
