//! Upstream request construction.

use serde::Serialize;

use crate::keywords::query::KeywordQuery;

/// Sort order sent with every ranked-keywords task.
pub const ORDER_BY_SEARCH_VOLUME: &str = "keyword_data.keyword_info.search_volume,desc";

/// One ranked-keywords task in the provider's request format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamRequest {
    pub target: String,
    pub location_name: String,
    pub language_name: String,
    pub limit: i64,
    pub order_by: Vec<String>,
}

impl From<&KeywordQuery> for UpstreamRequest {
    fn from(query: &KeywordQuery) -> Self {
        Self {
            target: query.domain.clone(),
            location_name: query.location.clone(),
            language_name: query.language.clone(),
            limit: query.limit,
            order_by: vec![ORDER_BY_SEARCH_VOLUME.to_string()],
        }
    }
}

/// Build the request body: the provider takes a batch of tasks, we always
/// send exactly one.
pub fn build_upstream_payload(query: &KeywordQuery) -> Vec<UpstreamRequest> {
    vec![UpstreamRequest::from(query)]
}
