// ABOUTME: Single-writer timestamp cell marking the last successful account check.
// ABOUTME: Advanced only by the poller after a successful initial fetch.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

/// The exclusive lower bound for the next monitored-account query.
///
/// Only the poller writes this, and poll activations are serialized, so the
/// cell never sees concurrent writers. Values are monotonically
/// non-decreasing; attempts to move the watermark backwards are ignored.
/// The value is not persisted across restarts.
#[derive(Debug)]
pub struct WatermarkStore {
    inner: Mutex<DateTime<Utc>>,
}

impl WatermarkStore {
    /// Create a store marking "now": posts published before process start
    /// are never announced.
    pub fn starting_now() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            inner: Mutex::new(instant),
        }
    }

    pub async fn snapshot(&self) -> DateTime<Utc> {
        *self.inner.lock().await
    }

    /// Advance to `instant`, unless that would move the watermark backwards.
    pub async fn advance(&self, instant: DateTime<Utc>) {
        let mut guard = self.inner.lock().await;
        if instant > *guard {
            *guard = instant;
        }
    }
}
