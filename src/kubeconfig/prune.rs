// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Removal of cluster, context and user entries by name.

use super::types::{KubeconfigDocument, NamedCluster, NamedContext, NamedUser};

/// Entries that carry a kubeconfig name
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for NamedCluster {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for NamedContext {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for NamedUser {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Drop every entry named `name`, keeping the order of the rest.
/// Returns true if anything was removed.
pub fn prune<T: Named>(entries: &mut Vec<T>, name: &str) -> bool {
    let before = entries.len();
    entries.retain(|e| e.name() != name);
    entries.len() < before
}

pub fn prune_clusters(clusters: &mut Vec<NamedCluster>, name: &str) -> bool {
    prune(clusters, name)
}

pub fn prune_contexts(contexts: &mut Vec<NamedContext>, name: &str) -> bool {
    prune(contexts, name)
}

pub fn prune_users(users: &mut Vec<NamedUser>, name: &str) -> bool {
    prune(users, name)
}

/// Prune clusters, contexts and users named `name` from a document.
/// Returns true if any of the three lists shrank.
pub fn prune_all(doc: &mut KubeconfigDocument, name: &str) -> bool {
    let clusters = prune_clusters(&mut doc.clusters, name);
    let contexts = prune_contexts(&mut doc.contexts, name);
    let users = prune_users(&mut doc.users, name);
    clusters || contexts || users
}
