use std::future::Future;
use std::time::Duration;

use anyhow::Result;

use crate::sheets::SheetError;

/// Status markers that identify a transient remote failure when only the
/// error's text representation is available.
const RETRYABLE_MARKERS: [&str; 6] = [
    "[503]",
    "[429]",
    "[500]",
    "[502]",
    "[504]",
    "Service currently unavailable",
];

/// Bounded-retry policy with exponential backoff.
///
/// Two presets cover the two call depths: opening a spreadsheet is rare and
/// expensive, so it gets the larger budget; per-row and per-column fetches
/// happen once per tab in a scan, so they get the tighter one to bound total
/// latency for a single user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_wait: Duration,
}

impl RetryPolicy {
    /// Spreadsheet/worksheet open: 4 attempts, 1.5 s base wait.
    pub const OPEN: RetryPolicy = RetryPolicy {
        max_attempts: 4,
        base_wait: Duration::from_millis(1500),
    };

    /// Row/column value fetch: 3 attempts, 1.2 s base wait.
    pub const FETCH: RetryPolicy = RetryPolicy {
        max_attempts: 3,
        base_wait: Duration::from_millis(1200),
    };

    pub const fn new(max_attempts: u32, base_wait: Duration) -> Self {
        Self {
            max_attempts,
            base_wait,
        }
    }

    /// Wait before the retry following `attempt` (zero-based):
    /// `base_wait * 2^attempt`.
    pub fn compute_wait(&self, attempt: u32) -> Duration {
        self.base_wait.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget is exhausted. The error of the final attempt is
    /// propagated as-is.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt + 1 >= self.max_attempts || !is_retryable(&err) {
                        return Err(err);
                    }
                    let wait = self.compute_wait(attempt);
                    log::warn!(
                        "{what} failed (attempt {}/{}), retrying in {:.1}s: {err:#}",
                        attempt + 1,
                        self.max_attempts,
                        wait.as_secs_f64()
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Classify an error as transient (retry) or permanent (propagate).
///
/// A typed `SheetError` anywhere in the chain decides directly; not-found and
/// auth failures are deterministic and never retried. Anything else falls
/// back to matching known status markers in the rendered error text, and an
/// unrecognized error is treated as permanent.
pub fn is_retryable(err: &anyhow::Error) -> bool {
    if let Some(sheet_err) = err.downcast_ref::<SheetError>() {
        return sheet_err.is_retryable();
    }
    let text = format!("{err:#}");
    RETRYABLE_MARKERS.iter().any(|marker| text.contains(marker))
}
