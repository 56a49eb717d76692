mod api;
mod middleware;

use std::sync::Arc;

use bizgap_osm::{NominatimClient, OverpassClient};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = bizgap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let thresholds = bizgap_core::load_thresholds(config.thresholds_path.as_deref())?;
    tracing::info!(
        env = %config.env,
        categories = thresholds.len(),
        custom = config.thresholds_path.is_some(),
        "competition thresholds loaded"
    );

    let state = AppState {
        nominatim: Arc::new(NominatimClient::new(
            &config.user_agent,
            config.request_timeout_secs,
        )?),
        overpass: Arc::new(OverpassClient::new(
            &config.user_agent,
            config.request_timeout_secs,
        )?),
        thresholds: Arc::new(thresholds),
        geocode_limit: config.geocode_limit,
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
