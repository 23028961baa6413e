//! Keyword Lookup Proxy Library
//!
//! Relays ranked-keyword lookups to the DataForSEO Labs API and reshapes the
//! provider's task envelope into a flat list of keyword records.

pub mod config;
pub mod error;
pub mod http;
pub mod keywords;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::ProxyConfig;
pub use error::{LookupError, LookupResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
