//! HTTP API routes
//!
//! Defines the REST endpoints, the WebSocket route and CORS.

use crate::constants::SERVICE_NAME;
use crate::error::Error;
use crate::quadrature::{available_methods, Method};
use crate::server::state::AppState;
use crate::server::ws::ws_handler;
use crate::service::{IntegrationRequest, IntegrationResult};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.allowed_origins());

    Router::new()
        .route("/health", get(health_handler))
        .route("/integrate", post(integrate_handler))
        .route("/methods", get(methods_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let mut allowed = Vec::with_capacity(origins.len());
    for origin in origins {
        match HeaderValue::from_str(origin) {
            Ok(value) => allowed.push(value),
            Err(_) => warn!("Ignoring invalid CORS origin: {}", origin),
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "INVALID_REQUEST" => StatusCode::UNPROCESSABLE_ENTITY,
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidExpression(_) => "INVALID_EXPRESSION",
            Error::Evaluation { .. } => "EVALUATION_ERROR",
            Error::InvalidRequest(_) => "INVALID_REQUEST",
            _ => "INTERNAL_ERROR",
        };
        if code == "INTERNAL_ERROR" {
            warn!("Unexpected error in integration: {}", err);
            return ApiError {
                error: "Internal server error during integration".to_string(),
                code: code.to_string(),
            };
        }
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Live WebSocket connections
    pub connections: usize,
}

/// Health check endpoint
///
/// GET /health
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        connections: state.connections.len().await,
    })
}

/// Integrate endpoint
///
/// POST /integrate
async fn integrate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IntegrationRequest>, JsonRejection>,
) -> Result<Json<IntegrationResult>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        ApiError::from(Error::InvalidRequest(rejection.body_text()))
    })?;
    let result = state.integrate(&req).await.map_err(ApiError::from)?;
    Ok(Json(result))
}

/// Methods list response
#[derive(Debug, Serialize, Deserialize)]
pub struct MethodsResponse {
    pub methods: Vec<MethodInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: Method,
    pub description: String,
    /// Smallest `num_points` that yields an error estimate
    pub min_points_for_error: usize,
}

/// List available integration methods
///
/// GET /methods
async fn methods_handler() -> Json<MethodsResponse> {
    let methods = available_methods()
        .into_iter()
        .map(|m| MethodInfo {
            name: m,
            description: m.description().to_string(),
            min_points_for_error: m.min_points_for_error(),
        })
        .collect();

    Json(MethodsResponse { methods })
}
