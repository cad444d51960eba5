// ABOUTME: Inbound command dispatch and the three command handlers.
// ABOUTME: Spawns one task per command so the event path never blocks.

use std::sync::Arc;

use chrono::{Duration, Local, Utc};

use crate::{
    commands::{parse_command, Command},
    config::Config,
    metrics,
    paginator::Paginator,
    relay,
    sources::SourceLookup,
    traits::{ChatSender, SearchClient, SearchQuery},
};

/// Shared handles every command handler needs.
pub struct DispatchContext {
    pub sender: Arc<dyn ChatSender>,
    pub search: Arc<dyn SearchClient>,
    pub config: Arc<Config>,
}

/// Classify `text` and run the matching handler on its own task.
///
/// Returns as soon as the task is spawned; the inbound acknowledgment path
/// must never wait on a search or post round-trip.
pub fn spawn(ctx: Arc<DispatchContext>, text: String, channel_id: String) {
    tokio::spawn(async move {
        handle_command(&ctx, &text, &channel_id).await;
    });
}

/// Run one command to completion. All failures are logged here; nothing
/// propagates to the caller.
pub async fn handle_command(ctx: &DispatchContext, text: &str, channel_id: &str) {
    match parse_command(text, &ctx.config.default_language) {
        Command::TimeQuery => {
            metrics::record_command("now");
            send_or_log(ctx, channel_id, &time_message()).await;
        }
        Command::NewContent { language } => {
            metrics::record_command("new-content");
            handle_new_content(ctx, &language, channel_id).await;
        }
        Command::NewContentUsage => {
            metrics::record_command("new-content");
            let msg = format!(
                "Usage: new-content language\nDefaults to {}.",
                ctx.config.default_language
            );
            send_or_log(ctx, channel_id, &msg).await;
        }
        Command::PostTweet { body } => {
            metrics::record_command("tweet");
            handle_post(ctx, &body).await;
        }
        Command::PostTweetUsage => {
            metrics::record_command("tweet");
            send_or_log(ctx, channel_id, "Usage: tweet text").await;
        }
        Command::Unrecognized => {
            tracing::debug!(text = %text, "Ignoring unrecognized message");
        }
    }
}

/// Current wall-clock time, formatted for chat.
pub fn time_message() -> String {
    format!("The time is {}", Local::now().format("%H:%M:%S"))
}

/// Search every source configured for `language` and relay what turns up.
///
/// Each handle gets its own continuation chain. The first fetch failure
/// aborts the whole sweep; whatever was already relayed stands.
async fn handle_new_content(ctx: &DispatchContext, language: &str, channel_id: &str) {
    let handles = match ctx.config.sources.lookup(language) {
        SourceLookup::Handles(handles) => handles,
        SourceLookup::NoSources => {
            send_or_log(
                ctx,
                channel_id,
                "No sources found for this language. Try adding some in the config!\n\
                 Usage: new-content language",
            )
            .await;
            return;
        }
        SourceLookup::UnknownLanguage => {
            send_or_log(
                ctx,
                channel_id,
                "Language was not found in the sources list. Try adding it to the config!\n\
                 Usage: new-content language",
            )
            .await;
            return;
        }
    };

    let hours = ctx.config.watch.hours_to_fetch;
    let start_time = Utc::now() - Duration::hours(hours as i64);
    let mut found_posts = false;

    for handle in handles {
        let query = SearchQuery::new(handle.clone(), start_time);
        let mut pages = Paginator::new(ctx.search.as_ref(), query);
        loop {
            match pages.next_page().await {
                Ok(Some(page)) => {
                    if !page.is_empty() {
                        found_posts = true;
                    }
                    relay::relay_page(ctx.sender.as_ref(), channel_id, handle, &page).await;
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(
                        handle = %handle,
                        error = %e,
                        "There was an issue while getting tweets"
                    );
                    metrics::record_error("content_search_fetch");
                    return;
                }
            }
        }
    }

    if !found_posts {
        let msg = format!(
            "No new tweets were found from the last {} hour(s).",
            hours
        );
        send_or_log(ctx, channel_id, &msg).await;
    }
}

async fn handle_post(ctx: &DispatchContext, body: &str) {
    match ctx.search.post_update(body).await {
        Ok(()) => tracing::info!("Tweet posted successfully"),
        Err(e) => {
            tracing::error!(error = %e, "There was an issue with posting the tweet");
            metrics::record_error("post_update");
        }
    }
}

async fn send_or_log(ctx: &DispatchContext, channel_id: &str, text: &str) {
    if let Err(e) = ctx.sender.send(channel_id, text).await {
        tracing::error!(
            channel = %channel_id,
            error = %e,
            "Failed to send chat message"
        );
        metrics::record_error("chat_send");
    }
}
