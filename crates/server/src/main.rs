use anyhow::{Context, Result};
use axum::serve;
use sentinel_core::{config::AppConfig, filter::MethodFilter, upstream::UpstreamClient};
use server::router;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the logging system based on the configuration.
///
/// `RUST_LOG` wins when set; otherwise `logging.level` applies to the workspace crates.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.logging.level.as_str();
        EnvFilter::new(format!("warn,sentinel_core={level},server={level},tower_http={level}"))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format.as_str() == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        // "pretty" and any other format default to pretty logging
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_target(false);
        registry.with(fmt_layer).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config =
        AppConfig::load().map_err(|e| anyhow::anyhow!("Configuration loading failed: {e}"))?;
    config.validate().map_err(|e| anyhow::anyhow!("Configuration validation failed: {e}"))?;

    init_logging(&config);
    info!(environment = %config.environment, "Starting Sentinel");

    let filter = Arc::new(MethodFilter::new(&config.filter).context("Method filter init failed")?);
    let upstream =
        Arc::new(UpstreamClient::new(&config.upstream).context("Upstream client init failed")?);
    debug!(
        denylisted_methods = filter.denylist().distinct_methods(),
        match_policy = %filter.denylist().policy(),
        upstream = upstream.url(),
        upstream_timeout_seconds = config.upstream.timeout_seconds,
        max_body_bytes = ?config.server.max_body_bytes,
        "Configuration loaded"
    );

    let app = router::create_app(filter, upstream, &config.server);
    let addr = config.socket_addr().map_err(|e| anyhow::anyhow!(e))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Proxy server listening");

    if let Err(e) = serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error occurred");
    }

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                () = std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
