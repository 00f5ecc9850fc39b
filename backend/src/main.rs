//! Backend entry-point: loads configuration, prepares persistence, and runs
//! the REST server.

mod server;

use std::ffi::OsString;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, ServerConfig, create_server};
use stampcard::domain::AdminAuthenticator;
use stampcard::inbound::http::admin_config::{BuildMode, admin_secret_from_env};
use stampcard::inbound::http::health::HealthState;
use stampcard::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

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

    let settings = AppSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let allowed_origin = settings.allowed_origin().to_owned();
    if allowed_origin == "*" {
        return Err(std::io::Error::other(
            "allowed origin must name a single origin when credentials are allowed",
        ));
    }

    let secret = admin_secret_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let admin = AdminAuthenticator::new(&secret);
    drop(secret);
    info!(fingerprint = %admin.fingerprint(), "admin secret loaded");

    let mut config = ServerConfig::new(settings.bind_addr(), allowed_origin, admin);
    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url.to_owned())
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(
        port = settings.port(),
        origin = settings.allowed_origin(),
        "server listening"
    );
    server.await
}
