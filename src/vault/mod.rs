// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Storage for the merged kubeconfig.

pub mod client;

pub use client::{parse_vault_path, VaultClient};

use crate::error::Result;
use async_trait::async_trait;

/// Key/value secret holding the merged kubeconfig.
///
/// A missing secret or key is `Ok(None)`, not an error. Writers must keep
/// every other key of the secret intact. Nothing here serializes concurrent
/// writers; the last `put` wins.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn put(&self, key: &str, value: &str) -> Result<()>;
}
