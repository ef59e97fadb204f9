// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed model of a multi-context kubeconfig document.

use serde::{Deserialize, Deserializer, Serialize};

/// `apiVersion` written on every document this crate produces
pub const API_VERSION: &str = "v1";
/// `kind` written on every document this crate produces
pub const KIND: &str = "Config";

/// A kubeconfig file: clusters, contexts, users and the active context.
///
/// Field order is the serialization order.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KubeconfigDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clusters: Vec<NamedCluster>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: Vec<NamedContext>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<NamedUser>,
    #[serde(default, rename = "current-context", deserialize_with = "null_as_default")]
    pub current_context: String,
}

/// kubectl writes `clusters: null`, `user: null` and bare `current-context:` for empty values
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl KubeconfigDocument {
    /// Force the header fields to the canonical constants
    pub fn set_canonical_header(&mut self) {
        self.api_version = API_VERSION.to_string();
        self.kind = KIND.to_string();
    }
}

#[cfg(test)]
impl KubeconfigDocument {
    /// Every context references an existing cluster and user, and the
    /// current context (if set) names an existing context
    pub(crate) fn is_consistent(&self) -> bool {
        let refs_ok = self.contexts.iter().all(|c| {
            self.clusters.iter().any(|cl| cl.name == c.context.cluster)
                && self.users.iter().any(|u| u.name == c.context.user)
        });
        let current_ok = self.current_context.is_empty()
            || self.contexts.iter().any(|c| c.name == self.current_context);
        refs_ok && current_ok
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedCluster {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster: ClusterEndpoint,
}

/// Connection details for an API server
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterEndpoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub server: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_authority_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_authority: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedContext {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: Context,
}

/// Binds a cluster entry to a user entry, optionally with a default namespace
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Context {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedUser {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: AuthInfo,
}

/// Raw credential keys of a user entry. Use [`AuthInfo::credential`] for the typed view.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct AuthInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_certificate_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_key_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// How a user authenticates against the API server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential<'a> {
    ClientCertData { cert: &'a str, key: &'a str },
    ClientCertFile { cert: &'a str, key: &'a str },
    Token(&'a str),
    Basic { username: &'a str, password: &'a str },
    None,
}

impl AuthInfo {
    /// Resolve the credential in kubeconfig precedence order: inline
    /// certificates, certificate files, bearer token, basic auth.
    pub fn credential(&self) -> Credential<'_> {
        if let (Some(cert), Some(key)) = (&self.client_certificate_data, &self.client_key_data) {
            return Credential::ClientCertData { cert, key };
        }
        if let (Some(cert), Some(key)) = (&self.client_certificate, &self.client_key) {
            return Credential::ClientCertFile { cert, key };
        }
        if let Some(token) = &self.token {
            return Credential::Token(token);
        }
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            return Credential::Basic { username, password };
        }
        Credential::None
    }
}
