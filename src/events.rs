// ABOUTME: HTTP server ingesting Slack Events API callbacks.
// ABOUTME: Acknowledges immediately; command execution happens on spawned tasks.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use chirpbridge_core::dispatch::{self, DispatchContext};
use chirpbridge_core::metrics::{self, PrometheusHandle};

/// Envelope posted by the Slack Events API.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub challenge: Option<String>,
    #[serde(default)]
    pub event: Option<MessageEvent>,
}

/// The message event payload the bot cares about. Everything is optional on
/// the wire; `actionable_event` decides what gets dispatched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageEvent {
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Decide whether an event should be dispatched.
///
/// Bot-authored messages and events without text or a destination channel
/// are dropped before any parsing happens.
pub fn actionable_event(event: &MessageEvent) -> Option<(String, String)> {
    if event.bot_id.is_some() {
        return None;
    }
    let channel = event.channel.clone()?;
    let text = event.text.clone()?;
    Some((channel, text))
}

struct EventsState {
    ctx: Arc<DispatchContext>,
}

/// Start the events HTTP server. Runs until the process exits.
pub async fn start_events_server(port: u16, ctx: Arc<DispatchContext>) -> Result<()> {
    let metrics_handle =
        metrics::init_metrics().context("Failed to initialize Prometheus metrics")?;

    let event_routes = Router::new()
        .route("/slack/events", post(events_handler))
        .with_state(Arc::new(EventsState { ctx }));

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(Arc::new(metrics_handle));

    let app = Router::new()
        .merge(event_routes)
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http());

    // Default to localhost, but allow override for Docker (needs 0.0.0.0)
    let bind_addr =
        std::env::var("EVENTS_BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind_addr, port);
    tracing::info!(addr = %addr, "Starting Slack events server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handle Slack Events API POSTs.
///
/// The handshake challenge is echoed back; message events are handed off to
/// a spawned task so this handler acknowledges without waiting on any
/// search or post round-trip.
async fn events_handler(
    State(state): State<Arc<EventsState>>,
    Json(envelope): Json<EventEnvelope>,
) -> (StatusCode, Json<Value>) {
    match envelope.kind.as_str() {
        "url_verification" => {
            let challenge = envelope.challenge.unwrap_or_default();
            (StatusCode::OK, Json(json!({ "challenge": challenge })))
        }
        "event_callback" => {
            if let Some((channel, text)) =
                envelope.event.as_ref().and_then(actionable_event)
            {
                dispatch::spawn(Arc::clone(&state.ctx), text, channel);
            }
            (StatusCode::OK, Json(json!({ "ok": true })))
        }
        other => {
            tracing::debug!(kind = %other, "Ignoring unhandled event envelope");
            (StatusCode::OK, Json(json!({ "ok": true })))
        }
    }
}

/// Handle GET /metrics - returns Prometheus text format
async fn metrics_handler(State(handle): State<Arc<PrometheusHandle>>) -> String {
    handle.render()
}
