// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for reaching the management cluster and extracting kubeconfigs.

pub mod client;
pub mod extract;

pub use client::{context_names, ensure_context, load_kubeconfig, management_client};
pub use extract::{KubeconfigSource, ManagementCluster};
