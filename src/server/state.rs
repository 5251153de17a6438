//! Server shared state
//!
//! Holds configuration, live connections and the start time for the HTTP
//! server.

use crate::config::Config;
use crate::error::Result;
use crate::rng::{get_source, RandomSource};
use crate::server::connections::ConnectionManager;
use crate::service::{compute, IntegrationRequest, IntegrationResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// Live WebSocket connections
    pub connections: ConnectionManager,

    /// Origins allowed by CORS, fixed at startup
    allowed_origins: Vec<String>,

    started_at: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Self {
        let allowed_origins = config.server.allowed_origins.clone();
        Self {
            config: Arc::new(RwLock::new(config)),
            connections: ConnectionManager::new(),
            allowed_origins,
            started_at: Utc::now(),
        }
    }

    /// Random source for Monte Carlo, as configured
    pub async fn random_source(&self) -> Result<Box<dyn RandomSource>> {
        let config = self.config.read().await;
        get_source(&config.defaults.rng, config.defaults.seed)
    }

    /// Validate and compute a request
    pub async fn integrate(&self, request: &IntegrationRequest) -> Result<IntegrationResult> {
        request.validate()?;
        let rng = self.random_source().await?;
        compute(request, rng.as_ref())
    }

    /// Origins allowed by CORS
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
