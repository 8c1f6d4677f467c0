//! Metrics collection and exposition.
//!
//! # Metrics
//! - `booking_requests_total` (counter): requests by method, route, status
//! - `booking_request_duration_seconds` (histogram): latency distribution
//! - `booking_store_events_total` (counter): created/updated/deleted/conflict
//! - `booking_store_size` (gauge): bookings currently held

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics recorder"),
    }
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("booking_requests_total", &labels).increment(1);
    histogram!("booking_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

pub fn record_store_event(event: &'static str) {
    counter!("booking_store_events_total", "event" => event).increment(1);
}

pub fn record_store_size(size: usize) {
    gauge!("booking_store_size").set(size as f64);
}

/// Middleware recording request count and latency per matched route.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
