use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("broadcasts_total").absolute(0);
    counter!("confirmations_created_total").absolute(0);
    counter!("confirmations_failed_total").absolute(0);
    counter!("confirmation_updates_total").absolute(0);
    counter!("notifications_published_total").absolute(0);

    // Pre-register gauges at zero.
    gauge!("sse_connected_clients").set(0.0);

    handle
}
