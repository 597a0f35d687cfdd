//! Minimum inter-request spacing for provider calls.
//!
//! The provider tier this adapter targets enforces a hard gap between
//! requests, so instead of a token bucket this is a simple spacer: each
//! dispatch must be at least `MIN_REQUEST_INTERVAL` after the previous one.
//! The very first request after construction is never delayed.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Fixed minimum spacing between provider requests.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(30);

/// Enforces a minimum interval between request dispatches.
///
/// State is scoped to one adapter instance, single-writer through the
/// internal async mutex. Waiting holds the lock, so concurrent callers
/// serialize: two overlapping calls cannot both observe an elapsed
/// interval and skip the wait.
#[derive(Debug)]
pub struct RequestSpacer {
    min_interval: Duration,
    /// `None` until the first dispatch — the sentinel for "no prior
    /// request", which must not be mistaken for a zero baseline.
    last_request: Mutex<Option<Instant>>,
}

impl Default for RequestSpacer {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSpacer {
    /// Create a spacer with the fixed 30-second minimum interval.
    pub const fn new() -> Self {
        Self::with_interval(MIN_REQUEST_INTERVAL)
    }

    /// Create a spacer with a custom interval.
    pub const fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::const_new(None),
        }
    }

    /// Suspend until the minimum interval since the previous dispatch has
    /// elapsed, then record this dispatch.
    ///
    /// The timestamp is recorded after any wait completes, so spacing is
    /// measured between actual dispatches rather than between call entries.
    pub async fn wait_turn(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "spacing provider request");
                sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }
}
