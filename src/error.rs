//! Request-path error taxonomy for `/ranked_keywords`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type LookupResult<T> = Result<T, LookupError>;

pub const UPSTREAM_PROTOCOL_MESSAGE: &str = "Invalid response from DataForSEO API";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Domain is required")]
    MissingDomain,

    #[error("Limit must be an integer")]
    InvalidLimit,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{}", UPSTREAM_PROTOCOL_MESSAGE)]
    UpstreamProtocol,

    #[error("{0}")]
    UpstreamTransport(String),
}

impl LookupError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::MissingDomain | LookupError::InvalidLimit | LookupError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            LookupError::Unauthorized => StatusCode::UNAUTHORIZED,
            LookupError::UpstreamProtocol | LookupError::UpstreamTransport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short label used for the `outcome` metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            LookupError::MissingDomain | LookupError::InvalidLimit | LookupError::InvalidBody(_) => {
                "invalid_request"
            }
            LookupError::Unauthorized => "unauthorized",
            LookupError::UpstreamProtocol => "upstream_protocol_error",
            LookupError::UpstreamTransport(_) => "upstream_transport_error",
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::UpstreamTransport(err.to_string())
    }
}

/// JSON error body: `{error, details?}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            LookupError::InvalidBody(details) => ErrorBody {
                error: "Invalid request body".to_string(),
                details: Some(details.clone()),
            },
            LookupError::UpstreamProtocol | LookupError::UpstreamTransport(_) => ErrorBody {
                error: "Failed to fetch keywords".to_string(),
                details: Some(self.to_string()),
            },
            _ => ErrorBody {
                error: self.to_string(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn render(err: LookupError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors() {
        assert_eq!(
            render(LookupError::MissingDomain).await,
            (StatusCode::BAD_REQUEST, json!({ "error": "Domain is required" }))
        );
        assert_eq!(
            render(LookupError::InvalidLimit).await,
            (StatusCode::BAD_REQUEST, json!({ "error": "Limit must be an integer" }))
        );
        assert_eq!(
            render(LookupError::InvalidBody("expected a JSON object".into())).await,
            (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request body", "details": "expected a JSON object" })
            )
        );
        assert_eq!(
            render(LookupError::Unauthorized).await,
            (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" }))
        );
    }

    #[tokio::test]
    async fn test_upstream_errors_are_500_with_details() {
        assert_eq!(
            render(LookupError::UpstreamProtocol).await,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to fetch keywords",
                    "details": "Invalid response from DataForSEO API"
                })
            )
        );
        assert_eq!(
            render(LookupError::UpstreamTransport("connection refused".into())).await,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to fetch keywords", "details": "connection refused" })
            )
        );
    }
}
