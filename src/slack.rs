// ABOUTME: Outbound Slack sender backed by slack-morphism chat.postMessage.
// ABOUTME: Implements the core ChatSender seam.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use slack_morphism::prelude::*;

use chirpbridge_core::traits::ChatSender;

/// Slack Web API sender shared by every task that posts to chat.
pub struct SlackSender {
    client: Arc<SlackHyperClient>,
    bot_token: SlackApiToken,
}

impl SlackSender {
    pub fn new(bot_token: &str) -> Result<Self> {
        let client = Arc::new(SlackClient::new(
            SlackClientHyperConnector::new().context("Failed to create Slack HTTP connector")?,
        ));
        let bot_token = SlackApiToken::new(SlackApiTokenValue(bot_token.to_string()));
        Ok(Self { client, bot_token })
    }
}

#[async_trait]
impl ChatSender for SlackSender {
    async fn send(&self, channel_id: &str, text: &str) -> Result<()> {
        let session = self.client.open_session(&self.bot_token);

        let req = SlackApiChatPostMessageRequest::new(
            channel_id.into(),
            SlackMessageContent::new().with_text(text.to_string()),
        );

        session
            .chat_post_message(&req)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send Slack message to {}: {}", channel_id, e))?;

        Ok(())
    }
}
