// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! YAML boundary of the kubeconfig engine.

use super::types::KubeconfigDocument;
use crate::error::{DocumentRole, KubeconfigError};
use serde::Deserialize;

/// Parse kubeconfig YAML
pub fn parse(data: &str) -> Result<KubeconfigDocument, KubeconfigError> {
    parse_as(data, DocumentRole::Input)
}

/// Parse kubeconfig YAML, attributing failures to `role`.
///
/// Only the first document of a stream is read. Blank or comment-only text
/// yields an empty document.
pub(crate) fn parse_as(
    data: &str,
    role: DocumentRole,
) -> Result<KubeconfigDocument, KubeconfigError> {
    let Some(document) = serde_yaml::Deserializer::from_str(data).next() else {
        return Ok(KubeconfigDocument::default());
    };
    KubeconfigDocument::deserialize(document).map_err(|source| KubeconfigError::Parse {
        document: role,
        source,
    })
}

/// Serialize a document as YAML with keys in model order and two-space indentation
pub fn serialize(doc: &KubeconfigDocument) -> Result<String, KubeconfigError> {
    serde_yaml::to_string(doc).map_err(KubeconfigError::Serialize)
}
