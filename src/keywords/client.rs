//! Outbound client for the provider's ranked-keywords endpoint.

use std::time::Instant;

use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::error::LookupResult;
use crate::keywords::payload::UpstreamRequest;
use crate::observability::metrics;

/// Authenticated client for a single provider endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoint: String,
    login: String,
    password: String,
}

impl UpstreamClient {
    /// Build a client from configuration.
    ///
    /// No request timeout is set; a call waits for the provider or for the
    /// transport to give up.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("keyword-lookup-proxy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint_url(),
            login: config.login.clone(),
            password: config.password.clone(),
        })
    }

    /// POST the task batch and return the decoded JSON body.
    ///
    /// Transport errors, non-2xx statuses and undecodable bodies all surface
    /// as `LookupError::UpstreamTransport`.
    pub async fn fetch_ranked_keywords(&self, payload: &[UpstreamRequest]) -> LookupResult<Value> {
        let start = Instant::now();

        let result = self
            .http
            .post(&self.endpoint)
            .basic_auth(&self.login, Some(&self.password))
            .json(payload)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                metrics::record_upstream_call("error", start);
                return Err(e.into());
            }
        };

        let status = response.status();
        metrics::record_upstream_call(status.as_str(), start);
        tracing::debug!(status = %status, endpoint = %self.endpoint, "Upstream responded");

        let body = response.error_for_status()?.json::<Value>().await?;
        Ok(body)
    }
}
