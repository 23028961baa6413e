//! Route handlers.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::LookupError;
use crate::http::response::{HealthStatus, ServiceStatus};
use crate::http::server::AppState;
use crate::keywords::{self, KeywordQuery};
use crate::observability::metrics;

pub async fn root() -> Json<ServiceStatus> {
    Json(ServiceStatus::default())
}

pub async fn health() -> Json<HealthStatus> {
    tracing::debug!("Health check");
    Json(HealthStatus {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// `POST /ranked_keywords`.
pub async fn ranked_keywords(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    tracing::info!("Received ranked keywords request");

    let body = match body {
        Ok(Json(body)) => body,
        // Without a JSON content type the body is not read at all.
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Object(Map::new()),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            metrics::record_lookup("invalid_request", start);
            return rejection.into_response();
        }
        Err(rejection) => {
            let err = LookupError::InvalidBody(rejection.body_text());
            return finish_with_error(err, start);
        }
    };

    let query = match KeywordQuery::from_body(&body) {
        Ok(query) => query,
        Err(err) => return finish_with_error(err, start),
    };

    tracing::info!(
        domain = %query.domain,
        location = %query.location,
        language = %query.language,
        limit = query.limit,
        "Fetching keywords for domain"
    );

    match keywords::lookup_ranked_keywords(&state.upstream, &query).await {
        Ok(result) => {
            tracing::info!(
                domain = %query.domain,
                keywords = result.keywords().len(),
                "Lookup complete"
            );
            metrics::record_lookup("ok", start);
            Json(result).into_response()
        }
        Err(err) => finish_with_error(err, start),
    }
}

fn finish_with_error(err: LookupError, start: Instant) -> Response {
    if err.status_code().is_server_error() {
        tracing::error!(error = %err, "Error fetching keywords");
    } else {
        tracing::warn!(error = %err, "Rejected ranked keywords request");
    }
    metrics::record_lookup(err.outcome(), start);
    err.into_response()
}
