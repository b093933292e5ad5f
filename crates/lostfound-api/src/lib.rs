pub mod auth;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod reports;
pub mod validation;


use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get_service, post},
};
use tower_http::services::{ServeDir, ServeFile};

use lostfound_db::Database;

use crate::credentials::CredentialStore;
use crate::error::ApiError;

/// Request bodies larger than this are rejected before reaching a handler.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Arc<Database>,
    pub credentials: CredentialStore,
}

impl AppStateInner {
    pub fn new(db: Database) -> anyhow::Result<Self> {
        let db = Arc::new(db);
        let credentials = CredentialStore::new(db.clone())?;
        Ok(Self { db, credentials })
    }

    pub fn with_credentials(db: Arc<Database>, credentials: CredentialStore) -> Self {
        Self { db, credentials }
    }
}

/// The full HTTP surface: the three form endpoints plus the landing document
/// and any other file under `static_dir`.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let api = Router::new()
        .route("/api/report", post(reports::submit_report))
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .with_state(state);

    Router::new()
        .route("/", get_service(ServeFile::new(static_dir.join("index.html"))))
        .merge(api)
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

/// Runs blocking storage/hashing work off the async runtime. Failures are
/// logged with `route` and collapsed into `message`.
pub(crate) async fn blocking<F, T>(
    route: &'static str,
    message: &'static str,
    f: F,
) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(route, message, anyhow::anyhow!("spawn_blocking join error: {}", e)))?
        .map_err(|e| ApiError::internal(route, message, e))
}
