// ABOUTME: Main entry point wiring config, transport clients, watermark, and timers.
// ABOUTME: Runs the Slack events server on the foreground task.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chirpbridge::{
    config::Config,
    dispatch::DispatchContext,
    events,
    poller::Poller,
    scheduler,
    slack::SlackSender,
    traits::{ChatSender, SearchClient},
    twitter::TwitterApi,
    watermark::WatermarkStore,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "chirpbridge", about = "Slack <-> Twitter relay bot")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting chirpbridge");

    // Load configuration
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Arc::new(Config::load(&cli.config)?);

    tracing::info!(
        port = config.server.port,
        watch_user = %config.watch.user,
        watch_channel = %config.watch.channel,
        languages = config.sources.len(),
        "Configuration loaded"
    );

    let sender: Arc<dyn ChatSender> = Arc::new(SlackSender::new(&config.slack.bot_token)?);
    let search: Arc<dyn SearchClient> = Arc::new(TwitterApi::new(&config.twitter));

    // The watermark starts at "now": posts published before boot are never
    // announced, and the value does not survive restarts.
    let watermark = Arc::new(WatermarkStore::starting_now());

    let ctx = Arc::new(DispatchContext {
        sender: Arc::clone(&sender),
        search: Arc::clone(&search),
        config: Arc::clone(&config),
    });

    let poller = Arc::new(Poller::new(
        Arc::clone(&search),
        Arc::clone(&sender),
        Arc::clone(&watermark),
        &config,
    ));

    scheduler::start_scheduler(
        Arc::clone(&sender),
        config.watch.channel.clone(),
        Duration::from_secs(config.watch.announce_interval_secs),
        Duration::from_secs(config.watch.poll_interval_secs),
        poller,
    );

    tracing::info!("Bot tasks have been scheduled. Starting events server...");
    events::start_events_server(config.server.port, ctx).await
}
