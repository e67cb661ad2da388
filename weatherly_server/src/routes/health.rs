use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use utoipa_axum::{router::OpenApiRouter, routes};
use weatherly::health::{HealthStatus, Readiness};

use crate::models::state::WeatherlyState;

pub fn router(state: WeatherlyState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(health))
        .routes(routes!(ready))
        .with_state(state)
}

/// Check that the server is up.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is running", body = HealthStatus)
    )
)]
#[axum::debug_handler]
pub async fn health(State(state): State<WeatherlyState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        success: true,
        message: "Weather API is running".to_string(),
        timestamp: Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.server_config.environment.to_string(),
    })
}

/// Check that the server can serve weather requests, i.e. an API key for the
/// weather service is configured.
#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Service is ready", body = Readiness),
        (status = 503, description = "No weather service API key is configured", body = Readiness)
    )
)]
#[axum::debug_handler]
pub async fn ready(State(state): State<WeatherlyState>) -> (StatusCode, Json<Readiness>) {
    if state.weather_client.config().has_credential() {
        let readiness = Readiness {
            success: true,
            message: "Service is ready".to_string(),
            ready: true,
        };
        (StatusCode::OK, Json(readiness))
    } else {
        let readiness = Readiness {
            success: false,
            message: "Service not ready - API key not configured".to_string(),
            ready: false,
        };
        (StatusCode::SERVICE_UNAVAILABLE, Json(readiness))
    }
}
