// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use super::types::KubeconfigDocument;

/// Rename every entry of a freshly extracted single-cluster document to `cluster_name`.
///
/// Cluster, user and context names as well as the context references all
/// become `cluster_name`, and so does the current context. If the document
/// unexpectedly carries several cluster or user entries they would all end
/// up sharing one name, so only the first of each is kept. Contexts are
/// never deduplicated.
pub fn normalize_names(doc: &mut KubeconfigDocument, cluster_name: &str) {
    doc.clusters.truncate(1);
    for cluster in &mut doc.clusters {
        cluster.name = cluster_name.to_string();
    }

    doc.users.truncate(1);
    for user in &mut doc.users {
        user.name = cluster_name.to_string();
    }

    for context in &mut doc.contexts {
        context.name = cluster_name.to_string();
        context.context.cluster = cluster_name.to_string();
        context.context.user = cluster_name.to_string();
    }

    doc.current_context = cluster_name.to_string();
}
