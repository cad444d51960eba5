// ABOUTME: Tests for the relay step converting post pages to chat messages.
// ABOUTME: Validates per-page reversal, formatting, and send-failure tolerance.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chirpbridge_core::relay::relay_page;
use chirpbridge_core::traits::{ChatSender, Post, SearchPage};

/// Records every send; optionally fails sends whose text contains a marker.
#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
    fail_contains: Option<String>,
}

impl RecordingSender {
    fn failing_on(marker: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_contains: Some(marker.to_string()),
        }
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }
}

#[async_trait]
impl ChatSender for RecordingSender {
    async fn send(&self, channel_id: &str, text: &str) -> Result<()> {
        if let Some(marker) = &self.fail_contains {
            if text.contains(marker.as_str()) {
                anyhow::bail!("send rejected");
            }
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(())
    }
}

fn page(texts: &[&str], next_token: Option<&str>) -> SearchPage {
    SearchPage {
        data: texts
            .iter()
            .enumerate()
            .map(|(i, text)| Post {
                id: (i + 1).to_string(),
                text: text.to_string(),
                created_at: None,
            })
            .collect(),
        next_token: next_token.map(str::to_string),
    }
}

#[tokio::test]
async fn test_page_is_reversed_to_chronological_order() {
    let sender = RecordingSender::default();
    // API delivery order: newest first
    let page = page(&["third", "second", "first"], None);

    relay_page(&sender, "C123", "rustlang", &page).await;

    assert_eq!(
        sender.texts(),
        vec![
            "@rustlang: first",
            "@rustlang: second",
            "@rustlang: third"
        ]
    );
    assert!(sender.sent().iter().all(|(channel, _)| channel == "C123"));
}

#[tokio::test]
async fn test_pages_are_reversed_individually_not_globally() {
    let sender = RecordingSender::default();
    let p1 = page(&["b", "a"], Some("t1"));
    let p2 = page(&["d", "c"], Some("t2"));
    let p3 = page(&["f", "e"], None);

    relay_page(&sender, "C123", "rustlang", &p1).await;
    relay_page(&sender, "C123", "rustlang", &p2).await;
    relay_page(&sender, "C123", "rustlang", &p3).await;

    // Three per-page reversals, page order untouched
    assert_eq!(
        sender.texts(),
        vec![
            "@rustlang: a",
            "@rustlang: b",
            "@rustlang: c",
            "@rustlang: d",
            "@rustlang: e",
            "@rustlang: f"
        ]
    );
}

#[tokio::test]
async fn test_empty_page_sends_nothing() {
    let sender = RecordingSender::default();
    relay_page(&sender, "C123", "rustlang", &page(&[], None)).await;
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_send_failure_does_not_drop_remaining_posts() {
    let sender = RecordingSender::failing_on("second");
    let page = page(&["third", "second", "first"], None);

    relay_page(&sender, "C123", "rustlang", &page).await;

    assert_eq!(
        sender.texts(),
        vec!["@rustlang: first", "@rustlang: third"]
    );
}

#[tokio::test]
async fn test_post_text_is_relayed_verbatim() {
    let sender = RecordingSender::default();
    let page = page(&["multi\nline body with  spaces"], None);

    relay_page(&sender, "C123", "ThePSF", &page).await;

    assert_eq!(
        sender.texts(),
        vec!["@ThePSF: multi\nline body with  spaces"]
    );
}
