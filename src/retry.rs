//! One-shot compensating retry.
//!
//! The importer's only resilience mechanism: a failed write transaction is
//! retried exactly once, on a fresh session, and only when the failure is a
//! coordination fault. There is no backoff and no retry budget beyond the
//! single extra attempt.

use std::future::Future;

use crate::errors::{ImportError, Result};

/// Run `first`; if it fails with an error for which `classify` returns true,
/// run `second` exactly once and return its outcome as-is. Any other error
/// propagates immediately, and a failing second attempt is never retried.
pub async fn retry_once_if<T, F1, Fut1, C, F2, Fut2>(
    first: F1,
    classify: C,
    second: F2,
) -> Result<T>
where
    F1: FnOnce() -> Fut1,
    Fut1: Future<Output = Result<T>>,
    C: FnOnce(&ImportError) -> bool,
    F2: FnOnce() -> Fut2,
    Fut2: Future<Output = Result<T>>,
{
    match first().await {
        Ok(value) => Ok(value),
        Err(err) if classify(&err) => second().await,
        Err(err) => Err(err),
    }
}
