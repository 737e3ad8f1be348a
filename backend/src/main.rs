//! Issue tracker entry-point: loads settings, prepares storage and serves
//! the form actions, issue API and health probes.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::BuildMode;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{
    ServerConfig, ServerSettings, create_server, session_settings_from_process, shutdown_on_ctrl_c,
};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!(error = %err, "{context}");
    std::io::Error::other(format!("{context}: {err}"))
}

/// Open the pool and apply migrations when a database is configured.
async fn connect_storage(settings: &ServerSettings) -> std::io::Result<Option<DbPool>> {
    let Some(url) = settings.database_url() else {
        warn!("no database URL configured; users and issues are kept in memory");
        return Ok(None);
    };
    if settings.run_migrations() {
        run_pending_migrations(url)
            .await
            .map_err(|err| startup_error("database migrations failed", err))?;
    }
    let config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(config)
        .await
        .map_err(|err| startup_error("database pool initialisation failed", err))?;
    info!(max_connections = settings.db_max_connections(), "database pool ready");
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load().map_err(|err| startup_error("failed to load settings", err))?;
    let session = session_settings_from_process(BuildMode::from_debug_assertions())
        .map_err(|err| startup_error("invalid session configuration", err))?;

    let mut health = HealthState::new();
    let mut config = ServerConfig::new(session, settings.bind_addr());
    if let Some(pool) = connect_storage(&settings).await? {
        health = health.with_storage(Arc::new(pool.clone()));
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(health);
    let server = create_server(health_state.clone(), config)?;
    shutdown_on_ctrl_c(health_state, server.handle());
    server.await
}
