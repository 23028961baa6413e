//! Ranked-keywords lookup.
//!
//! # Data Flow
//! ```text
//! JSON body
//!     → query.rs (validate, apply defaults)
//!     → payload.rs (one-task batch in provider format)
//!     → client.rs (basic-auth POST, single attempt)
//!     → envelope.rs (tasks[0].result[0].items → KeywordRecord)
//!     → QueryResult
//! ```

pub mod client;
pub mod envelope;
pub mod payload;
pub mod query;

pub use client::UpstreamClient;
pub use envelope::{KeywordRecord, QueryResult};
pub use payload::UpstreamRequest;
pub use query::KeywordQuery;

use crate::error::LookupResult;

/// Run one lookup against the provider.
pub async fn lookup_ranked_keywords(
    client: &UpstreamClient,
    query: &KeywordQuery,
) -> LookupResult<QueryResult> {
    let payload = payload::build_upstream_payload(query);
    let body = client.fetch_ranked_keywords(&payload).await?;
    envelope::reshape(query, body)
}
