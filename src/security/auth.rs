//! Shared-secret bearer gate.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::LookupError;

/// Expected `Authorization` value, see `AuthConfig::expected_header`.
#[derive(Clone)]
pub struct BearerGate {
    expected: Arc<str>,
}

impl BearerGate {
    pub fn new(expected_header: impl Into<String>) -> Self {
        let expected: String = expected_header.into();
        Self {
            expected: Arc::from(expected),
        }
    }

    /// Exact byte comparison; no trimming, no case folding.
    pub fn accepts(&self, header: Option<&[u8]>) -> bool {
        header == Some(self.expected.as_bytes())
    }
}

pub async fn bearer_auth_middleware(
    State(gate): State<BearerGate>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let header = request.headers().get(AUTHORIZATION).map(|v| v.as_bytes());
    let header_present = header.is_some();

    if gate.accepts(header) {
        return next.run(request).await;
    }

    tracing::warn!(
        path = %request.uri().path(),
        header_present,
        "Rejected request with invalid bearer token"
    );
    LookupError::Unauthorized.into_response()
}
