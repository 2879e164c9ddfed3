//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;
use crate::domain::legal_cache::MatchType;

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Install the Prometheus recorder; `None` when disabled or already installed
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("legal_cache_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router serving `path`
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

fn lookup_outcome(match_type: Option<MatchType>) -> &'static str {
    match_type.map(|m| m.as_str()).unwrap_or("miss")
}

/// Record a cache lookup; `None` is a miss
pub fn record_cache_lookup(match_type: Option<MatchType>, duration: Duration) {
    let outcome = lookup_outcome(match_type);

    counter!("legal_cache_lookups_total", "outcome" => outcome).increment(1);
    histogram!("legal_cache_lookup_duration_seconds", "outcome" => outcome)
        .record(duration.as_secs_f64());
}

/// Record an admission decision
pub fn record_cache_admission(admitted: bool) {
    let admitted = if admitted { "true" } else { "false" };
    counter!("legal_cache_admissions_total", "admitted" => admitted).increment(1);
}

pub fn record_cache_evictions(count: usize) {
    counter!("legal_cache_evictions_total").increment(count as u64);
}

/// Record entries removed by invalidation or expiry
pub fn record_cache_invalidation(reason: &'static str, count: usize) {
    counter!("legal_cache_invalidations_total", "reason" => reason).increment(count as u64);
}

pub fn record_cache_size(size: usize) {
    gauge!("legal_cache_entries").set(size as f64);
}
