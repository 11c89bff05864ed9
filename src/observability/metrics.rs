//! Metrics collection and exposition.
//!
//! # Metrics
//! - `switchyard_requests_total` (counter): requests by method and outcome
//! - `switchyard_dispatch_duration_seconds` (histogram): time spent routing
//!   and running the winning handler
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Method and outcome labels are closed sets to keep cardinality bounded

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// How a request left the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Reply,
    Empty,
    Unsettled,
    ConfigError,
    HandlerError,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Reply => "reply",
            Outcome::Empty => "empty",
            Outcome::Unsettled => "unsettled",
            Outcome::ConfigError => "config_error",
            Outcome::HandlerError => "handler_error",
        }
    }
}

/// Install the Prometheus exporter with an HTTP scrape endpoint.
///
/// Must be called from inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Fold a request method onto a fixed label set. Extension methods are
/// arbitrary tokens and would each open a new series.
pub fn method_label(method: &str) -> &'static str {
    const KNOWN: &[&str] = &["GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH"];
    KNOWN
        .iter()
        .find(|known| known.eq_ignore_ascii_case(method))
        .copied()
        .unwrap_or("OTHER")
}

pub fn record_dispatch(method: &str, outcome: Outcome, start: Instant) {
    metrics::counter!(
        "switchyard_requests_total",
        "method" => method_label(method),
        "outcome" => outcome.as_str()
    )
    .increment(1);
    metrics::histogram!("switchyard_dispatch_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_label_is_bounded() {
        assert_eq!(method_label("GET"), "GET");
        assert_eq!(method_label("patch"), "PATCH");
        assert_eq!(method_label("OPTIONS"), "OPTIONS");
        assert_eq!(method_label("PROPFIND"), "OTHER");
        assert_eq!(method_label("X-RANDOM-1234"), "OTHER");
        assert_eq!(method_label(""), "OTHER");
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Reply.as_str(), "reply");
        assert_eq!(Outcome::HandlerError.as_str(), "handler_error");
    }
}
