// ABOUTME: Metrics facade helpers and the Prometheus recorder installer.
// ABOUTME: Thin wrappers so call sites stay one-liners.

use anyhow::Result;
use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

pub use metrics_exporter_prometheus::PrometheusHandle;

/// Install the Prometheus recorder. Call once at startup; the returned
/// handle renders the exposition text for the /metrics endpoint.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(handle)
}

/// Record an inbound command by verb.
pub fn record_command(name: &'static str) {
    counter!("chirpbridge_commands_total", "command" => name).increment(1);
}

/// Record one post relayed to chat.
pub fn record_post_relayed() {
    counter!("chirpbridge_posts_relayed_total").increment(1);
}

/// Record a completed poll cycle with its outcome.
pub fn record_poll_cycle(outcome: &'static str) {
    counter!("chirpbridge_poll_cycles_total", "outcome" => outcome).increment(1);
}

/// Record an operational error by kind.
pub fn record_error(kind: &'static str) {
    counter!("chirpbridge_errors_total", "kind" => kind).increment(1);
}
