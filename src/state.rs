//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool and the parsed configuration. The access gate is
//! stateless, so nothing per-session lives here.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::gate::GatePolicy;

/// Shared application state. Clone is required by Axum; the config is
/// Arc-wrapped and `PgPool` is itself a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self { pool, config: Arc::new(config) }
    }

    #[must_use]
    pub fn gate_policy(&self) -> GatePolicy {
        self.config.gate_policy
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
