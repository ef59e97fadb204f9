// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod kubeconfig;
pub mod kubernetes;
pub mod operations;
pub mod retry;
pub mod types;
pub mod vault;

#[cfg(test)]
mod test_utils;
