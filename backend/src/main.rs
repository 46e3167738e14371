//! Service entry-point: loads settings, prepares storage and serves the chair
//! API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use chair_dispatch::inbound::http::health::HealthState;
use chair_dispatch::outbound::persistence::{DbPool, PoolConfig};
use server::{create_server, DispatchSettings, ServerConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations over a blocking connection.
fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| std::io::Error::other(format!("migration connection failed: {err}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    info!(count = applied.len(), "database migrations applied");
    Ok(())
}

async fn build_server_config(settings: &DispatchSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))?;
    let config = ServerConfig::new(bind_addr);

    let Some(database_url) = settings.database_url.clone() else {
        return Ok(config);
    };

    if settings.run_migrations {
        let url = database_url.clone();
        tokio::task::spawn_blocking(move || run_migrations(&url))
            .await
            .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))??;
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(config.with_db_pool(pool))
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

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings = DispatchSettings::load_from_iter(args)
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = build_server_config(&settings).await?;
    info!(
        bind_addr = %config.bind_addr,
        database = config.db_pool.is_some(),
        "starting chair dispatch"
    );

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
