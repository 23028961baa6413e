//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;

use keyword_lookup_proxy::config::{ProxyConfig, UpstreamConfig};
use keyword_lookup_proxy::{HttpServer, Shutdown};

/// `Basic base64("login:password")`.
#[allow(dead_code)]
pub const EXPECTED_BASIC_AUTH: &str = "Basic bG9naW46cGFzc3dvcmQ=";

/// One request as seen by the mock provider.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

/// A mock provider that answers every call with a fixed status and body.
#[derive(Clone)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.captured.lock().unwrap().len()
    }
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Start a mock provider on an ephemeral port.
///
/// `body` is sent verbatim so tests can return malformed JSON.
pub async fn start_mock_upstream(status: u16, body: impl Into<String>) -> MockUpstream {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let status = StatusCode::from_u16(status).unwrap();
    let body: String = body.into();
    let path = UpstreamConfig::default().endpoint_path;

    let app = Router::new().route(
        &path,
        post({
            let captured = captured.clone();
            move |headers: HeaderMap, request_body: Bytes| {
                let captured = captured.clone();
                let body = body.clone();
                async move {
                    captured.lock().unwrap().push(CapturedRequest {
                        authorization: header_string(&headers, header::AUTHORIZATION),
                        content_type: header_string(&headers, header::CONTENT_TYPE),
                        body: serde_json::from_slice(&request_body).unwrap_or(Value::Null),
                    });
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, captured }
}

/// Proxy configuration pointing at `upstream`, without the bearer gate.
pub fn proxy_config(upstream: &MockUpstream) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.base_url = upstream.base_url();
    config.upstream.login = "login".to_string();
    config.upstream.password = "password".to_string();
    config
}

/// A running proxy. Triggers shutdown when dropped.
pub struct RunningProxy {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl RunningProxy {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for RunningProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the proxy on an ephemeral port.
pub async fn start_proxy(config: ProxyConfig) -> RunningProxy {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Let the accept loop start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    RunningProxy { addr, shutdown }
}
