// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use super::codec::{parse_as, serialize};
use super::normalize::normalize_names;
use super::prune::prune_all;
use crate::error::{DocumentRole, KubeconfigError};

/// Merge a freshly extracted single-cluster kubeconfig into the merged one.
///
/// Entries of `new` are renamed to `cluster_name`, any previous entries with
/// that name are dropped from `existing`, and the new ones are appended after
/// the surviving entries. The merged cluster becomes the current context.
/// A blank `existing` bootstraps the merged document from `new` alone.
/// Blank or comment-only input on either side reads as an empty document.
pub fn merge(existing: &str, new: &str, cluster_name: &str) -> Result<String, KubeconfigError> {
    let mut incoming = parse_as(new, DocumentRole::New)?;
    normalize_names(&mut incoming, cluster_name);

    let mut merged = parse_as(existing, DocumentRole::Existing)?;

    prune_all(&mut merged, cluster_name);
    merged.clusters.append(&mut incoming.clusters);
    merged.contexts.append(&mut incoming.contexts);
    merged.users.append(&mut incoming.users);

    merged.set_canonical_header();
    merged.current_context = cluster_name.to_string();

    serialize(&merged)
}
