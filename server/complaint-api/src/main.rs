//! Binary entrypoint for the complaint intake service.

use std::net::SocketAddr;
use std::sync::Arc;

use complaint_api::{AppState, Config};
use complaint_core::{Desk, FileStore};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = Config::load().map_err(|e| {
    warn!("configuration rejected: {}", e);
    e
  })?;

  let store = FileStore::new(&config.data_file);
  info!("storing complaints in {}", store.path().display());
  let desk = Desk::new(config.core(), Arc::new(store));
  let state = Arc::new(AppState { desk });

  if let Some(dir) = &config.static_dir {
    info!("serving front-end from {}", dir.display());
  }
  let app = complaint_api::router(state, config.static_dir.as_deref());

  let addr = SocketAddr::from((config.host, config.port));
  let listener = tokio::net::TcpListener::bind(addr).await?;
  info!("complaint-api listening on http://{}", addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  info!("complaint-api stopped");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      warn!("failed to listen for Ctrl+C: {}", e);
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        warn!("failed to install SIGTERM handler: {}", e);
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => info!("received Ctrl+C, shutting down"),
    _ = terminate => info!("received terminate signal, shutting down"),
  }
}
