//! Inbound query validation.
//!
//! Turns the JSON body of `POST /ranked_keywords` into a [`KeywordQuery`],
//! applying defaults for every optional field.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{LookupError, LookupResult};

pub const DEFAULT_LOCATION: &str = "United States";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_LIMIT: i64 = 50;

/// A validated ranked-keywords lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordQuery {
    pub domain: String,
    pub location: String,
    pub language: String,
    pub limit: i64,
}

impl KeywordQuery {
    /// Query for `domain` with every other field defaulted.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            location: DEFAULT_LOCATION.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Validate a request body.
    ///
    /// `null` is treated the same as an absent field. The domain must be a
    /// non-empty string; it is not trimmed.
    pub fn from_body(body: &Value) -> LookupResult<Self> {
        let fields = body
            .as_object()
            .ok_or_else(|| LookupError::InvalidBody("expected a JSON object".to_string()))?;

        let domain = match fields.get("domain") {
            Some(Value::String(domain)) if !domain.is_empty() => domain.clone(),
            _ => return Err(LookupError::MissingDomain),
        };

        Ok(Self {
            domain,
            location: text_field(fields, "location", DEFAULT_LOCATION)?,
            language: text_field(fields, "language", DEFAULT_LANGUAGE)?,
            limit: coerce_limit(fields.get("limit"))?,
        })
    }
}

fn text_field(fields: &Map<String, Value>, name: &str, default: &str) -> LookupResult<String> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(LookupError::InvalidBody(format!("{} must be a string", name))),
    }
}

/// Coerce the `limit` field to an integer.
///
/// Integers pass through, floats truncate toward zero and strings are read
/// up to the first non-digit (`"25abc"` is 25). Anything else, including a
/// number outside the `i64` range, is rejected.
pub fn coerce_limit(value: Option<&Value>) -> LookupResult<i64> {
    match value {
        None | Some(Value::Null) => Ok(DEFAULT_LIMIT),
        Some(Value::Number(number)) => {
            if let Some(limit) = number.as_i64() {
                return Ok(limit);
            }
            // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
            match number.as_f64().map(f64::trunc) {
                Some(limit) if limit >= i64::MIN as f64 && limit < i64::MAX as f64 => {
                    Ok(limit as i64)
                }
                _ => Err(LookupError::InvalidLimit),
            }
        }
        Some(Value::String(text)) => parse_leading_int(text).ok_or(LookupError::InvalidLimit),
        Some(_) => Err(LookupError::InvalidLimit),
    }
}

fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
