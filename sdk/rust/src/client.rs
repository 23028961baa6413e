use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Body of `POST /ranked_keywords`. Unset fields use the proxy's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupRequest {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl LookupRequest {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The proxy answered with a non-2xx status. `body` is the decoded JSON
    /// error body when there was one.
    #[error("proxy returned {status}: {body}")]
    Status { status: StatusCode, body: Value },
}

pub struct LookupClient {
    client: Client,
    proxy_url: String,
    api_key: Option<String>,
}

impl LookupClient {
    pub fn new(proxy_url: &str) -> Self {
        Self {
            client: Client::new(),
            proxy_url: proxy_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Send `Authorization: Bearer <key>` with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// `GET /`.
    pub async fn status(&self) -> Result<Value, ClientError> {
        self.send(self.client.get(self.url("/"))).await
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<Value, ClientError> {
        self.send(self.client.get(self.url("/health"))).await
    }

    /// `POST /ranked_keywords`.
    pub async fn ranked_keywords(&self, req: &LookupRequest) -> Result<Value, ClientError> {
        self.send(self.client.post(self.url("/ranked_keywords")).json(req))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.proxy_url, path)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, ClientError> {
        let builder = match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        };

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        if !status.is_success() {
            return Err(ClientError::Status { status, body });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_unset_fields() {
        let value = serde_json::to_value(LookupRequest::new("example.com")).unwrap();
        assert_eq!(value, json!({ "domain": "example.com" }));

        let value = serde_json::to_value(LookupRequest {
            limit: Some(5),
            ..LookupRequest::new("example.com")
        })
        .unwrap();
        assert_eq!(value, json!({ "domain": "example.com", "limit": 5 }));
    }

    #[test]
    fn test_url_joining() {
        let client = LookupClient::new("http://localhost:3000/");
        assert_eq!(client.url("/health"), "http://localhost:3000/health");
    }
}
