use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct HealthStatus {
    pub success: bool,
    pub message: String,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started.
    pub uptime: f64,
    pub environment: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct Readiness {
    pub success: bool,
    pub message: String,
    pub ready: bool,
}
