// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HashiCorp Vault KV v2 client

use super::SecretStore;
use crate::constants::VAULT_TIMEOUT_SECS;
use crate::error::{Result, UpdaterError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const TOKEN_HEADER: &str = "X-Vault-Token";

type SecretData = Map<String, Value>;

#[derive(Deserialize)]
struct KvReadResponse {
    data: Option<KvVersion>,
}

#[derive(Deserialize)]
struct KvVersion {
    /// Null when the latest version is soft-deleted
    data: Option<SecretData>,
}

/// Reads and writes one KV v2 secret
pub struct VaultClient {
    http: reqwest::Client,
    data_url: Url,
    token: String,
}

/// Split `mount/path` at the first slash
pub fn parse_vault_path(full_path: &str) -> Result<(&str, &str)> {
    match full_path.split_once('/') {
        Some((mount, path)) if !mount.is_empty() && !path.trim_matches('/').is_empty() => {
            Ok((mount, path.trim_matches('/')))
        }
        _ => Err(UpdaterError::InvalidVaultPath(full_path.to_string())),
    }
}

/// `{addr}/v1/{mount}/data/{path}`, keeping any path prefix of `addr`
fn data_url(addr: &str, mount: &str, path: &str) -> Result<Url> {
    let mut base = Url::parse(addr)
        .map_err(|e| UpdaterError::Vault(format!("invalid vault address {}: {}", addr, e)))?;
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(&format!("v1/{}/data/{}", mount, path))
        .map_err(|e| UpdaterError::Vault(format!("invalid vault path {}/{}: {}", mount, path, e)))
}

impl VaultClient {
    /// `vault_path` is `mount/path`, e.g. `kv/cluster-secret-store/secrets`
    pub fn new(addr: &str, token: &str, vault_path: &str) -> Result<Self> {
        let (mount, path) = parse_vault_path(vault_path)?;
        let data_url = data_url(addr, mount, path)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(VAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| UpdaterError::Vault(format!("create vault client: {}", e)))?;

        Ok(Self {
            http,
            data_url,
            token: token.to_string(),
        })
    }

    /// Current data of the secret, `None` if it does not exist
    #[instrument(skip(self), fields(url = %self.data_url))]
    async fn read(&self) -> Result<Option<SecretData>> {
        let response = self
            .http
            .get(self.data_url.clone())
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(|e| UpdaterError::Vault(format!("vault read failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Secret does not exist");
            return Ok(None);
        }
        let response = check_status(response, "read").await?;

        let body: KvReadResponse = response
            .json()
            .await
            .map_err(|e| UpdaterError::Vault(format!("decode vault response: {}", e)))?;
        Ok(body.data.and_then(|v| v.data))
    }
}

/// Map an unsuccessful status to `VaultAuth` or `Vault`
async fn check_status(response: reqwest::Response, op: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(UpdaterError::VaultAuth(format!(
            "vault {} returned {}: {}",
            op,
            status,
            body.trim()
        ))),
        _ => Err(UpdaterError::Vault(format!(
            "vault {} returned {}: {}",
            op,
            status,
            body.trim()
        ))),
    }
}

fn lookup_key(data: &SecretData, key: &str) -> Result<Option<String>> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(UpdaterError::Vault(format!("key {} in secret is not a string", key))),
    }
}

#[async_trait]
impl SecretStore for VaultClient {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.read().await? {
            Some(data) => lookup_key(&data, key),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, value), fields(url = %self.data_url))]
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.read().await?.unwrap_or_default();
        data.insert(key.to_string(), Value::String(value.to_string()));

        let response = self
            .http
            .post(self.data_url.clone())
            .header(TOKEN_HEADER, &self.token)
            .json(&json!({ "data": data }))
            .send()
            .await
            .map_err(|e| UpdaterError::Vault(format!("vault write failed: {}", e)))?;

        check_status(response, "write").await?;
        debug!("Wrote {} keys to secret", data.len());
        Ok(())
    }
}
