// ABOUTME: Platform-agnostic core of the Slack-Twitter relay bot.
// ABOUTME: Command parsing, pagination, relay, polling, and the transport trait seams.

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod metrics;
pub mod paginator;
pub mod poller;
pub mod relay;
pub mod scheduler;
pub mod sources;
pub mod traits;
pub mod watermark;

// Re-export the types most callers touch
pub use commands::{parse_command, Command};
pub use config::Config;
pub use traits::{ChatSender, Post, SearchClient, SearchPage, SearchQuery};
pub use watermark::WatermarkStore;
