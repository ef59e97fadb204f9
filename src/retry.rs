// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fixed-delay retry for collaborator calls.

use crate::constants::retry::{ATTEMPTS, DELAY_SECS};
use crate::error::{Result, UpdaterError};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: ATTEMPTS,
            delay: Duration::from_secs(DELAY_SECS),
        }
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// attempts are used up. `on_retry` sees the 1-based attempt number that
/// just failed before the policy delay. The last error is returned.
pub async fn retry<T, F, Fut, R>(policy: RetryPolicy, mut op: F, mut on_retry: R) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    R: FnMut(u32, &UpdaterError),
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= policy.attempts || !e.is_retryable() => return Err(e),
            Err(e) => {
                on_retry(attempt, &e);
                sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
