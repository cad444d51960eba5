// ABOUTME: Trait seams between core logic and the platform transports.
// ABOUTME: Defines ChatSender/SearchClient plus the search wire types they exchange.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Per-page result cap accepted by the search endpoint.
pub const DEFAULT_MAX_RESULTS: u32 = 20;

// =============================================================================
// Search Wire Types
// =============================================================================

/// A single post returned by the search API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    /// Present when the fetch requested `tweet.fields=created_at`.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One batch of search results plus the continuation token, if any.
///
/// A missing `data` field means zero matches, which is a normal outcome,
/// not a failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub data: Vec<Post>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl SearchPage {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Parameters shared by every fetch in one continuation chain.
///
/// Immutable once built; continuation fetches reuse the same query with a
/// token merged in by the paginator.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Account handle, queried as `from:<author>`.
    pub author: String,
    /// Exclusive lower bound on post creation time.
    pub start_time: Option<DateTime<Utc>>,
    /// Result cap per page.
    pub max_results: u32,
}

impl SearchQuery {
    pub fn new(author: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            author: author.into(),
            start_time: Some(start_time),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

// =============================================================================
// Transport Seams
// =============================================================================

/// Search-and-post capability of the social platform.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Execute one search fetch. `next_token` selects a continuation page
    /// of an earlier fetch with the same query.
    async fn search(&self, query: &SearchQuery, next_token: Option<&str>) -> Result<SearchPage>;

    /// Publish a new post.
    async fn post_update(&self, status: &str) -> Result<()>;
}

/// Outbound chat-send capability. Safe to call concurrently from any task.
#[async_trait]
pub trait ChatSender: Send + Sync {
    async fn send(&self, channel_id: &str, text: &str) -> Result<()>;
}
