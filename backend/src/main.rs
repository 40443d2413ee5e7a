//! Backend entry-point: loads settings, prepares storage and runs the HTTP server.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use marketplace::inbound::http::health::HealthState;
use marketplace::inbound::http::session_config::{BuildMode, session_settings_from_env};
use marketplace::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
#[cfg(feature = "metrics")]
use server::prometheus_metrics;
use server::{ServerConfig, ServerSettings, create_server};

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

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("load settings: {err}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| std::io::Error::other(format!("session configuration: {err}")))?;

    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(session, bind_addr);

    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(prometheus_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
