// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Merging, deleting and normalizing clusters in a multi-context kubeconfig.
//!
//! Everything here is pure: text in, text out. Callers own storage,
//! retries and logging.

pub mod codec;
pub mod delete;
pub mod merge;
pub mod normalize;
pub mod prune;
pub mod types;

pub use codec::{parse, serialize};
pub use delete::delete;
pub use merge::merge;
pub use normalize::normalize_names;
pub use prune::{prune_all, prune_clusters, prune_contexts, prune_users};
pub use types::{
    AuthInfo, ClusterEndpoint, Context, Credential, KubeconfigDocument, NamedCluster,
    NamedContext, NamedUser, API_VERSION, KIND,
};
