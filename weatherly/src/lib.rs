use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod health;
pub mod timestamp;
pub mod weather;

/// Which side of the exchange a failure is blamed on.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize, ToSchema)]
pub enum ErrorKind {
    /// Caller input was malformed. Always a 400.
    ValidationError,
    /// The weather provider failed or couldn't be reached.
    ApiError,
}

/// Envelope wrapping every successful response body.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct Success<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Envelope wrapping every failed response body.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct Failure {
    pub success: bool,
    pub message: String,
    /// Missing for unexpected internal failures.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    /// Debug rendering of the underlying error, only filled in development.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Failure {
    pub fn new(message: impl Into<String>, kind: Option<ErrorKind>) -> Self {
        Self {
            success: false,
            message: message.into(),
            kind,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn failure_envelope_names_type_field() {
        let failure = Failure::new("City not found", Some(ErrorKind::ApiError));
        let value = serde_json::to_value(failure).expect("failure serializes");
        assert_eq!(
            value,
            json!({"success": false, "message": "City not found", "type": "ApiError"})
        );
    }

    #[test]
    fn internal_failure_omits_type() {
        let failure = Failure::new("Internal server error", None);
        let value = serde_json::to_value(failure).expect("failure serializes");
        assert_eq!(
            value,
            json!({"success": false, "message": "Internal server error"})
        );
    }

    #[test]
    fn success_envelope_wraps_data() {
        let value = serde_json::to_value(Success::new(vec![1, 2])).expect("success serializes");
        assert_eq!(value, json!({"success": true, "data": [1, 2]}));
    }
}
