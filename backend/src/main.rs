//! Service entry-point: loads configuration, applies migrations, and starts
//! the HTTP listener. Startup fails fast on missing configuration or an
//! unreachable database so a broken deployment never accepts traffic.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use podium_backend::inbound::http::health::HealthState;
use podium_backend::outbound::persistence::{run_pending_migrations, DbPool, PoolConfig};
use server::config::{AppConfig, RunMode};
use server::{create_server, ServerConfig};

fn init_tracing(mode: RunMode) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(mode.default_log_filter()));
    let builder = fmt().with_env_filter(filter);
    let result = match mode {
        RunMode::Production => builder.json().try_init(),
        RunMode::Development => builder.try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    init_tracing(config.run_mode());

    info!(
        mode = %config.run_mode(),
        bind_addr = %config.bind_addr(),
        db_credential = %config.database_credential_fingerprint(),
        "starting registration service"
    );

    run_pending_migrations(config.database_url().to_owned())
        .await
        .map_err(std::io::Error::other)?;

    let pool = DbPool::new(PoolConfig::new(config.database_url()))
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(config).with_db_pool(pool),
    )?;
    server.await
}
