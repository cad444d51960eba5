// ABOUTME: Background timer supervision: hourly time announcement and the account poll.
// ABOUTME: Poll activations are serialized; a tick that would overlap is skipped.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::{dispatch, metrics, poller::Poller, traits::ChatSender};

/// Spawn the two recurring background tasks.
///
/// Announcements and polls run on independent tasks so a slow fetch never
/// delays the time message. Each loop awaits its own work inline, which
/// keeps poll activations single-flight; `MissedTickBehavior::Skip` drops
/// the ticks that pile up behind a long fetch instead of bursting them.
/// Both timers fire one full period after start, not immediately.
pub fn start_scheduler(
    sender: Arc<dyn ChatSender>,
    announce_channel: String,
    announce_interval: Duration,
    poll_interval: Duration,
    poller: Arc<Poller>,
) {
    tracing::info!(
        announce_secs = announce_interval.as_secs(),
        poll_secs = poll_interval.as_secs(),
        "Starting background schedule tasks"
    );

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + announce_interval, announce_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let text = dispatch::time_message();
            if let Err(e) = sender.send(&announce_channel, &text).await {
                tracing::error!(
                    channel = %announce_channel,
                    error = %e,
                    "Failed to send time announcement"
                );
                metrics::record_error("announce_send");
            }
        }
    });

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + poll_interval, poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            poller.check_for_new_posts().await;
        }
    });
}
