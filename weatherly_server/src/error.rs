use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{error, warn};
use weatherly::{ErrorKind, Failure};

use crate::{models::config::Environment, normalize::ShapeError};

/// Ways a call to the weather provider can fail before shaping starts.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    /// The provider answered with a non-2xx status.
    #[error("weather service responded with {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    /// The request went out but no response came back.
    #[error("no response from weather service: {0}")]
    NoResponse(#[source] reqwest::Error),
    /// The request couldn't be built or sent at all.
    #[error("{0}")]
    Request(#[source] reqwest::Error),
    /// The provider answered 2xx with a body that doesn't match its schema.
    #[error("malformed response from weather service: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for UpstreamFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Request(err)
        } else {
            Self::NoResponse(err)
        }
    }
}

/// Provider statuses that get their own caller-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpstreamStatus {
    NotFound,
    Unauthorized,
    TooManyRequests,
    Other(StatusCode),
}

impl From<StatusCode> for UpstreamStatus {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => Self::TooManyRequests,
            other => Self::Other(other),
        }
    }
}

impl UpstreamStatus {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::Other(status) => status,
        }
    }

    /// Caller-facing message. Only unrecognized statuses forward the
    /// provider's own message.
    pub fn message(self, upstream_message: Option<String>) -> String {
        match self {
            Self::NotFound => "City not found".to_string(),
            Self::Unauthorized => "Invalid API key. Please check your configuration.".to_string(),
            Self::TooManyRequests => "Too many requests. Please try again later.".to_string(),
            Self::Other(_) => upstream_message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| "Weather API error".to_string()),
        }
    }
}

/// Every failure a weather route reports to its caller.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Api { message: String, status: StatusCode },
}

impl WeatherError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn api(message: impl Into<String>, status: StatusCode) -> Self {
        Self::Api {
            message: message.into(),
            status,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationError,
            Self::Api { .. } => ErrorKind::ApiError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Api { status, .. } => *status,
        }
    }
}

/// Map a gateway failure onto the caller-facing error taxonomy.
pub fn classify_upstream_failure(failure: UpstreamFailure) -> WeatherError {
    match failure {
        UpstreamFailure::Status { status, message } => {
            let status = UpstreamStatus::from(status);
            WeatherError::api(status.message(message), status.status_code())
        }
        UpstreamFailure::NoResponse(_) => WeatherError::api(
            "Unable to reach weather service. Please check your connection.",
            StatusCode::SERVICE_UNAVAILABLE,
        ),
        UpstreamFailure::Request(err) => {
            WeatherError::api(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
        }
        decode @ UpstreamFailure::Decode(_) => {
            WeatherError::api(decode.to_string(), StatusCode::BAD_GATEWAY)
        }
    }
}

impl From<UpstreamFailure> for WeatherError {
    fn from(failure: UpstreamFailure) -> Self {
        classify_upstream_failure(failure)
    }
}

impl From<ShapeError> for WeatherError {
    fn from(err: ShapeError) -> Self {
        WeatherError::api(err.to_string(), StatusCode::BAD_GATEWAY)
    }
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{self}");
        } else {
            warn!("{self}");
        }
        let failure = Failure::new(self.to_string(), Some(self.kind()));
        (status, Json(failure)).into_response()
    }
}

#[derive(Debug, Error)]
#[error("handler panicked: {0}")]
pub struct PanicError(String);

/// Generic `500 Internal Server Error` for failures outside the taxonomy.
/// Production hides the error entirely.
pub fn internal_error_response(
    environment: Environment,
    err: &(dyn std::error::Error + 'static),
) -> Response {
    error!("unexpected failure: {err}");
    let failure = match environment {
        Environment::Production => Failure::new("Internal server error", None),
        Environment::Development => {
            Failure::new(err.to_string(), None).with_details(format!("{err:?}"))
        }
        Environment::Test => Failure::new(err.to_string(), None),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(failure)).into_response()
}

/// Panic handler for `CatchPanicLayer`.
pub fn panic_handler(
    environment: Environment,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone {
    move |panic| {
        let detail = if let Some(detail) = panic.downcast_ref::<String>() {
            detail.clone()
        } else if let Some(detail) = panic.downcast_ref::<&str>() {
            detail.to_string()
        } else {
            "unknown panic".to_string()
        };
        internal_error_response(environment, &PanicError(detail))
    }
}
