// ABOUTME: Converts fetched post pages into outbound chat messages.
// ABOUTME: Reverses each page to chronological order; page order is preserved.

use crate::metrics;
use crate::traits::{ChatSender, SearchPage};

/// Relay one page of posts to `channel_id`, oldest first.
///
/// The search API delivers posts newest-first within a page, so the page is
/// reversed before sending. Ordering across pages is left to the caller's
/// fetch order; nothing is re-sorted globally. Send failures are logged and
/// the remaining posts still go out.
pub async fn relay_page<S: ChatSender + ?Sized>(
    sender: &S,
    channel_id: &str,
    handle: &str,
    page: &SearchPage,
) {
    for post in page.data.iter().rev() {
        let text = format!("@{}: {}", handle, post.text);
        match sender.send(channel_id, &text).await {
            Ok(()) => metrics::record_post_relayed(),
            Err(e) => {
                tracing::error!(
                    channel = %channel_id,
                    error = %e,
                    "Failed to send relay message"
                );
                metrics::record_error("relay_send");
            }
        }
    }

    if !page.data.is_empty() {
        tracing::info!(
            handle = %handle,
            count = page.data.len(),
            "Relayed post page"
        );
    }
}
