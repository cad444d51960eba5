// ABOUTME: Tests for the background schedule tasks under paused time.
// ABOUTME: Timers fire one full period after start, on independent cadences.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chirpbridge_core::config::Config;
use chirpbridge_core::poller::Poller;
use chirpbridge_core::scheduler::start_scheduler;
use chirpbridge_core::traits::{ChatSender, SearchClient, SearchPage, SearchQuery};
use chirpbridge_core::watermark::WatermarkStore;
use chrono::Utc;

/// Always answers with an empty page; counts how many fetches happened.
#[derive(Default)]
struct CountingSearch {
    fetches: AtomicUsize,
}

#[async_trait]
impl SearchClient for CountingSearch {
    async fn search(&self, _query: &SearchQuery, _next_token: Option<&str>) -> Result<SearchPage> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(SearchPage::default())
    }

    async fn post_update(&self, _status: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSender {
    fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl ChatSender for RecordingSender {
    async fn send(&self, channel_id: &str, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(())
    }
}

fn watch_config() -> Config {
    let mut config = Config::default();
    config.watch.user = "rustlang".to_string();
    config.watch.channel = "C024BE91L".to_string();
    config
}

#[tokio::test(start_paused = true)]
async fn test_poll_fires_one_period_after_start() {
    let search = Arc::new(CountingSearch::default());
    let sender = Arc::new(RecordingSender::default());
    let watermark = Arc::new(WatermarkStore::at(Utc::now()));
    let poller = Arc::new(Poller::new(
        Arc::clone(&search) as Arc<dyn SearchClient>,
        Arc::clone(&sender) as Arc<dyn ChatSender>,
        watermark,
        &watch_config(),
    ));

    start_scheduler(
        Arc::clone(&sender) as Arc<dyn ChatSender>,
        "C024BE91L".to_string(),
        Duration::from_secs(3600),
        Duration::from_secs(30),
        poller,
    );

    tokio::time::sleep(Duration::from_secs(29)).await;
    assert_eq!(search.fetches.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(search.fetches.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(search.fetches.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_announcement_fires_hourly_with_time_message() {
    let search = Arc::new(CountingSearch::default());
    let sender = Arc::new(RecordingSender::default());
    let watermark = Arc::new(WatermarkStore::at(Utc::now()));
    let poller = Arc::new(Poller::new(
        Arc::clone(&search) as Arc<dyn SearchClient>,
        Arc::new(RecordingSender::default()) as Arc<dyn ChatSender>,
        watermark,
        &watch_config(),
    ));

    start_scheduler(
        Arc::clone(&sender) as Arc<dyn ChatSender>,
        "C024BE91L".to_string(),
        Duration::from_secs(3600),
        Duration::from_secs(30),
        poller,
    );

    tokio::time::sleep(Duration::from_secs(3599)).await;
    assert!(sender.texts().is_empty());

    tokio::time::sleep(Duration::from_secs(2)).await;
    let texts = sender.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("The time is "));
}
