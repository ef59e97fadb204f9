// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use super::codec::{parse_as, serialize};
use super::prune::prune_all;
use crate::error::{DocumentRole, KubeconfigError};

/// Remove every entry named `cluster_name` from the merged kubeconfig.
///
/// When nothing matches, `existing` is returned verbatim rather than
/// re-serialized, so callers can detect a no-op by string equality.
/// If the current context pointed at the removed cluster it moves to the
/// first remaining cluster, or is cleared when none remain.
pub fn delete(existing: &str, cluster_name: &str) -> Result<String, KubeconfigError> {
    let mut doc = parse_as(existing, DocumentRole::Existing)?;

    if !prune_all(&mut doc, cluster_name) {
        return Ok(existing.to_string());
    }

    if doc.current_context == cluster_name {
        doc.current_context = doc
            .clusters
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_default();
    }

    serialize(&doc)
}
