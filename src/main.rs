mod config;
mod db;
mod gate;
mod routes;
mod services;
mod state;

use std::process::ExitCode;
use std::time::Duration;

use tracing::{error, info, warn};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let pool = match db::init_pool(&config.database_url, config.db_max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "database init failed");
            return ExitCode::FAILURE;
        }
    };

    if config.mailer.is_none() {
        warn!("RESEND_API_KEY/RESEND_FROM not set; access codes will be logged instead of e-mailed");
    }
    info!(policy = ?config.gate_policy, "access gate configured");

    let port = config.port;
    let state = state::AppState::new(pool.clone(), config);

    let _sweeper = services::session::spawn_session_sweeper(pool, SESSION_SWEEP_INTERVAL);

    let app = routes::app(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %port, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(%port, "placement-connect listening");
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
