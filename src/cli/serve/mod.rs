//! Serve command - runs the cache HTTP API

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::legal_cache::spawn_expiry_task;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::observability::{create_metrics_router, init_metrics};

/// Run the cache server until it fails
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging);

    let metrics = init_metrics(&config.metrics);
    let service = crate::create_cache_service(&config).await?;

    let expiry_task = config
        .cache
        .cleanup_interval()
        .map(|period| spawn_expiry_task(service.clone(), period));

    let mut app = create_router(crate::create_app_state(service));
    if let Some(metrics) = metrics {
        app = app.merge(create_metrics_router(metrics, &config.metrics.path));
    }

    let addr = build_socket_addr(&config)?;
    info!("Starting legal response cache on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    let result = axum::serve(listener, app).await;

    if let Some(task) = expiry_task {
        task.abort();
    }

    Ok(result?)
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_socket_addr() {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;

        assert_eq!(build_socket_addr(&config).unwrap().to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_build_socket_addr_rejects_hostname() {
        let mut config = AppConfig::default();
        config.server.host = "localhost".to_string();

        assert!(build_socket_addr(&config).is_err());
    }
}
