//! Request size limits.
//!
//! Bodies above the configured size are rejected with 413 Payload Too Large
//! before the JSON extractor reads them.

use tower_http::limit::RequestBodyLimitLayer;

pub fn body_limit_layer(max_body_size: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(max_body_size)
}
