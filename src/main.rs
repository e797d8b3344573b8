use std::sync::Arc;

use anyhow::Context;
use log::{info, warn};
use symptom_triage::{http, Config, PredictionService};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env().context("failed to read configuration")?;
    let service = PredictionService::from_config(&config)
        .context("failed to build the prediction service")?;

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening at {addr}");

    axum::serve(listener, http::router(Arc::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("failed to listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
}
