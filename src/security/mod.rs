//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (preflight and origin headers)
//!     → limits.rs (reject oversized bodies)
//!     → auth.rs (bearer gate, when an API key is configured)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any security check failure
//! - The bearer gate short-circuits before validation or upstream calls

pub mod auth;
pub mod cors;
pub mod limits;

pub use auth::{bearer_auth_middleware, BearerGate};
pub use cors::cors_layer;
pub use limits::body_limit_layer;
