// ABOUTME: Twitter API client: recent search with continuation tokens and status posting.
// ABOUTME: Implements the core SearchClient seam over reqwest.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::SecondsFormat;

use chirpbridge_core::config::TwitterConfig;
use chirpbridge_core::traits::{SearchClient, SearchPage, SearchQuery};

/// HTTP client for the search and post endpoints.
///
/// Requests carry a bearer token; request signing is handled upstream of
/// this process.
pub struct TwitterApi {
    http: reqwest::Client,
    bearer_token: String,
    search_url: String,
    post_url: String,
}

impl TwitterApi {
    pub fn new(config: &TwitterConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            bearer_token: config.bearer_token.clone(),
            search_url: config.search_url.clone(),
            post_url: config.post_url.clone(),
        }
    }
}

#[async_trait]
impl SearchClient for TwitterApi {
    async fn search(&self, query: &SearchQuery, next_token: Option<&str>) -> Result<SearchPage> {
        let mut params: Vec<(&str, String)> = vec![
            ("query", format!("from:{}", query.author)),
            ("max_results", query.max_results.to_string()),
            ("tweet.fields", "created_at".to_string()),
        ];
        if let Some(start) = query.start_time {
            params.push((
                "start_time",
                start.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(token) = next_token {
            params.push(("next_token", token.to_string()));
        }

        let response = self
            .http
            .get(&self.search_url)
            .bearer_auth(&self.bearer_token)
            .query(&params)
            .send()
            .await
            .context("Search request did not complete")?;

        if !response.status().is_success() {
            anyhow::bail!("Search request failed with status {}", response.status());
        }

        let page: SearchPage = response
            .json()
            .await
            .context("Failed to decode search response body")?;
        Ok(page)
    }

    async fn post_update(&self, status: &str) -> Result<()> {
        let response = self
            .http
            .post(&self.post_url)
            .bearer_auth(&self.bearer_token)
            .query(&[("status", status)])
            .send()
            .await
            .context("Post request did not complete")?;

        if !response.status().is_success() {
            anyhow::bail!("Post request failed with status {}", response.status());
        }

        Ok(())
    }
}
