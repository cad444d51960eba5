// ABOUTME: Configuration parsing from TOML file with environment variable overrides
// ABOUTME: Validates required fields and provides sensible defaults for optional ones

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sources::SourceRegistry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub slack: SlackConfig,
    #[serde(default)]
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    /// Language assumed when `new-content` is given no argument.
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Language → source handles, read-only after load.
    #[serde(default)]
    pub sources: SourceRegistry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Bot OAuth token (xoxb-...) for chat.postMessage calls.
    #[serde(default)]
    pub bot_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterConfig {
    /// Bearer token for the search and post endpoints.
    #[serde(default)]
    pub bearer_token: String,
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_post_url")]
    pub post_url: String,
}

/// Settings for the monitored account and the recurring timers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Handle whose new posts get announced.
    #[serde(default)]
    pub user: String,
    /// Channel receiving announcements and the hourly time message.
    #[serde(default)]
    pub channel: String,
    /// How far back `new-content` searches.
    #[serde(default = "default_hours_to_fetch")]
    pub hours_to_fetch: u32,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_announce_interval_secs")]
    pub announce_interval_secs: u64,
}

fn default_port() -> u16 {
    3000
}

fn default_language() -> String {
    "python".to_string()
}

fn default_search_url() -> String {
    "https://api.twitter.com/2/tweets/search/recent".to_string()
}

fn default_post_url() -> String {
    "https://api.twitter.com/1.1/statuses/update.json".to_string()
}

fn default_hours_to_fetch() -> u32 {
    1
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_announce_interval_secs() -> u64 {
    3600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
        }
    }
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            bearer_token: String::new(),
            search_url: default_search_url(),
            post_url: default_post_url(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            channel: String::new(),
            hours_to_fetch: default_hours_to_fetch(),
            poll_interval_secs: default_poll_interval_secs(),
            announce_interval_secs: default_announce_interval_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            slack: SlackConfig::default(),
            twitter: TwitterConfig::default(),
            watch: WatchConfig::default(),
            default_language: default_language(),
            sources: SourceRegistry::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file with environment variable
    /// overrides. A missing file is fine as long as the environment
    /// provides the required values.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str::<Config>(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("SLACK_BOT_TOKEN") {
            self.slack.bot_token = val;
        }
        if let Ok(val) = std::env::var("TWITTER_BEARER_TOKEN") {
            self.twitter.bearer_token = val;
        }
        if let Ok(val) = std::env::var("WATCH_USER") {
            self.watch.user = val;
        }
        if let Ok(val) = std::env::var("WATCH_CHANNEL") {
            self.watch.channel = val;
        }
        if let Ok(val) = std::env::var("LISTEN_PORT") {
            self.server.port = val
                .parse()
                .with_context(|| format!("LISTEN_PORT must be a valid port number, got: {}", val))?;
        }
        if let Ok(val) = std::env::var("HOURS_TO_FETCH") {
            self.watch.hours_to_fetch = val
                .parse()
                .with_context(|| format!("HOURS_TO_FETCH must be a positive integer, got: {}", val))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.slack.bot_token.trim().is_empty() {
            anyhow::bail!(
                "slack.bot_token is required (set in config.toml or SLACK_BOT_TOKEN env var)"
            );
        }
        if self.twitter.bearer_token.trim().is_empty() {
            anyhow::bail!(
                "twitter.bearer_token is required (set in config.toml or TWITTER_BEARER_TOKEN env var)"
            );
        }
        if self.watch.user.trim().is_empty() {
            anyhow::bail!("watch.user is required (set in config.toml or WATCH_USER env var)");
        }
        if self.watch.channel.trim().is_empty() {
            anyhow::bail!("watch.channel is required (set in config.toml or WATCH_CHANNEL env var)");
        }
        if self.watch.hours_to_fetch == 0 {
            anyhow::bail!("watch.hours_to_fetch must be at least 1");
        }
        if self.watch.poll_interval_secs == 0 {
            anyhow::bail!("watch.poll_interval_secs must be at least 1");
        }
        Ok(())
    }
}
