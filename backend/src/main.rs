//! Backend entry-point: loads configuration, prepares storage, and serves
//! the calculator API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use calculator_backend::inbound::http::health::HealthState;
use calculator_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use calculator_backend::{CalculatorSettings, StorageBackend};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CalculatorSettings::load_from_iter(std::env::args_os())
        .wrap_err("load configuration")?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(bind_addr, settings.static_dir());

    match settings.storage()? {
        StorageBackend::Sqlite => {
            let database_url = settings.database_url();
            let applied = run_migrations(database_url)
                .await
                .wrap_err("apply database migrations")?;
            info!(database_url, applied, "database schema ready");
            let pool = DbPool::new(
                PoolConfig::new(database_url).with_max_size(settings.pool_max_size()?),
            )
            .await
            .wrap_err("build connection pool")?;
            config = config.with_db_pool(pool);
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; saved calculations are lost on restart");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting calculator server");
    create_server(health_state, config)?.await?;
    Ok(())
}
