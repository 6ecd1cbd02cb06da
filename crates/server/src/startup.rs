use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, DatabaseConfig, MEMORY_PORT};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Validate the database settings, connect once, and apply migrations.
/// There is no retry: any failure here ends startup.
pub async fn connect_storage(cfg: &DatabaseConfig) -> Result<DatabaseConnection, StartupError> {
    cfg.validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let db = models::db::connect(cfg)
        .await
        .map_err(|e| StartupError::Connect(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migrate(e.to_string()))?;
    info!("database schema ready");
    Ok(db)
}

pub async fn bind(addr: &str) -> Result<TcpListener, StartupError> {
    let listener = TcpListener::bind(addr).await.map_err(|source| StartupError::Bind {
        addr: addr.to_string(),
        source,
    })?;
    let local: SocketAddr = listener.local_addr()?;
    info!(addr = %local, "listening on http://{}", local);
    Ok(listener)
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), StartupError> {
    axum::serve(listener, app).await?;
    Ok(())
}

/// In-memory flavor. Always listens on [`MEMORY_PORT`]; only the host is configurable.
pub async fn run_memory(mut cfg: AppConfig) -> Result<(), StartupError> {
    cfg.server.port = MEMORY_PORT;
    cfg.server
        .normalize()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let app = build_app(AppState::memory());
    let listener = bind(&cfg.server.bind_addr()).await?;
    info!(flavor = "memory", "starting user api");
    serve(listener, app).await
}

/// Database flavor. Storage is connected before the port is bound, so a bad
/// `DATABASE_URL` never leaves a listening socket behind.
pub async fn run_database(mut cfg: AppConfig) -> Result<(), StartupError> {
    cfg.server
        .normalize()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = connect_storage(&cfg.database).await?;
    let app = build_app(AppState::database(db));
    let listener = bind(&cfg.server.bind_addr()).await?;
    info!(flavor = "database", "starting user api");
    serve(listener, app).await
}
