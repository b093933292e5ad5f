mod config;

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use lostfound_api::AppStateInner;
use lostfound_db::Database;

use crate::config::Config;

const DEFAULT_LOG_FILTER: &str =
    "lostfound_server=debug,lostfound_api=debug,lostfound_db=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = Config::from_env().inspect_err(|e| error!("Invalid configuration: {}", e))?;
    if config.database_tls {
        warn!("DATABASE_TLS is set but has no effect on a local SQLite database");
    }

    // Schema must exist before the listener accepts anything
    let db = Database::open(&config.database_path)
        .inspect_err(|e| error!("Critical: database initialization failed: {:#}", e))?;

    let state = Arc::new(AppStateInner::new(db)?);

    if !config.static_dir.join("index.html").is_file() {
        warn!(
            "No index.html in {}; GET / will return 404",
            config.static_dir.display()
        );
    }

    let app = lostfound_api::router(state, &config.static_dir).layer(TraceLayer::new_for_http());

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Lost & found server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    warn!("Could not install SIGTERM handler: {}", e);
                    ctrl_c.await.ok();
                    info!("Received Ctrl+C, shutting down...");
                    return;
                }
            };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
