//! Provider response envelope and the reshaping into client-facing records.
//!
//! # Envelope shape
//! ```text
//! { tasks: [ { status_code, status_message,
//!              result: [ { items: [ item, .. ] } ] } ] }
//! ```
//!
//! Only `tasks[0]` and `result[0]` are read; the proxy always sends a single
//! task. The `tasks`/`result` skeleton is typed and a mismatch there is a
//! protocol error. Items are read leniently: a missing or mistyped field
//! yields an absent field in the output record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LookupError, LookupResult};
use crate::keywords::query::KeywordQuery;

/// Task status code the provider uses for success.
pub const TASK_OK: i64 = 20000;

pub const NO_RESULTS_MESSAGE: &str = "No ranked keywords found for this domain";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamEnvelope {
    #[serde(default)]
    pub tasks: Option<Vec<UpstreamTask>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamTask {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub result: Option<Vec<TaskResult>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskResult {
    /// Items stay untyped; each one is projected field by field.
    #[serde(default)]
    pub items: Option<Vec<Value>>,
}

/// One ranked keyword as returned to clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_volume: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

const KEYWORD: &str = "/keyword_data/keyword";
const SEARCH_VOLUME: &str = "/keyword_data/keyword_info/search_volume";
const COMPETITION: &str = "/keyword_data/keyword_info/competition";
const CPC: &str = "/keyword_data/keyword_info/cpc";
const POSITION: &str = "/ranked_serp_element/serp_item/rank_absolute";
const URL: &str = "/ranked_serp_element/serp_item/url";

impl KeywordRecord {
    /// Project one raw provider item.
    ///
    /// A field whose path is missing, or whose value has an unexpected
    /// type, is left out; the item itself never fails.
    pub fn from_item(item: &Value) -> Self {
        let text = |path: &str| item.pointer(path).and_then(Value::as_str).map(String::from);
        let float = |path: &str| item.pointer(path).and_then(Value::as_f64);

        Self {
            keyword: text(KEYWORD),
            search_volume: item.pointer(SEARCH_VOLUME).and_then(Value::as_u64),
            competition: float(COMPETITION),
            cpc: float(CPC),
            position: item
                .pointer(POSITION)
                .and_then(Value::as_u64)
                .and_then(|rank| u32::try_from(rank).ok()),
            url: text(URL),
        }
    }
}

/// Response body of a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResult {
    Found {
        domain: String,
        location: String,
        language: String,
        total_keywords: usize,
        keywords: Vec<KeywordRecord>,
    },
    NoResults {
        domain: String,
        message: String,
        keywords: Vec<KeywordRecord>,
    },
}

impl QueryResult {
    pub fn no_results(domain: impl Into<String>) -> Self {
        QueryResult::NoResults {
            domain: domain.into(),
            message: NO_RESULTS_MESSAGE.to_string(),
            keywords: Vec::new(),
        }
    }

    pub fn keywords(&self) -> &[KeywordRecord] {
        match self {
            QueryResult::Found { keywords, .. } | QueryResult::NoResults { keywords, .. } => {
                keywords
            }
        }
    }
}

/// Reshape a raw provider body into the client-facing result.
pub fn reshape(query: &KeywordQuery, body: Value) -> LookupResult<QueryResult> {
    let envelope: UpstreamEnvelope =
        serde_json::from_value(body).map_err(|_| LookupError::UpstreamProtocol)?;

    let task = envelope
        .tasks
        .and_then(|tasks| tasks.into_iter().next())
        .ok_or(LookupError::UpstreamProtocol)?;

    if let Some(code) = task.status_code.filter(|code| *code != TASK_OK) {
        tracing::warn!(
            domain = %query.domain,
            status_code = code,
            status_message = task.status_message.as_deref().unwrap_or(""),
            "Upstream task reported a non-success status"
        );
    }

    let first_result = match task.result.and_then(|results| results.into_iter().next()) {
        Some(result) => result,
        None => return Ok(QueryResult::no_results(query.domain.clone())),
    };

    let keywords: Vec<KeywordRecord> = first_result
        .items
        .unwrap_or_default()
        .iter()
        .map(KeywordRecord::from_item)
        .collect();

    Ok(QueryResult::Found {
        domain: query.domain.clone(),
        location: query.location.clone(),
        language: query.language.clone(),
        total_keywords: keywords.len(),
        keywords,
    })
}
