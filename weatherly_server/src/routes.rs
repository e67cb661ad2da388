use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use weatherly::Failure;

pub mod health;
pub mod weather;

/// Fallback for paths no router matches.
pub async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(Failure::new("Route not found", None)),
    )
}
