use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_START: &str = "0";
pub const DEFAULT_LIMIT: &str = "100";

/// A search as forwarded to the upstream service.
///
/// `start` and `limit` stay strings: they are passed through verbatim and
/// never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub start: String,
    pub limit: String,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> SearchRequest {
        SearchRequest {
            query: query.into(),
            start: DEFAULT_START.to_string(),
            limit: DEFAULT_LIMIT.to_string(),
        }
    }

    pub fn with_window(mut self, start: Option<String>, limit: Option<String>) -> SearchRequest {
        if let Some(start) = start.filter(|s| !s.is_empty()) {
            self.start = start;
        }
        if let Some(limit) = limit.filter(|l| !l.is_empty()) {
            self.limit = limit;
        }
        self
    }
}

/// Records matched by a search, as held by the search view.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub lines: Vec<String>,
    pub count: u64,
}

impl SearchResult {
    /// Reads a proxy response body.
    ///
    /// Returns `None` when `lines` is missing or is not an array. Elements
    /// that are not strings are kept in their JSON text form.
    /// A falsy `count` falls back to the number of lines.
    pub fn from_body(body: &Value) -> Option<SearchResult> {
        let lines = body
            .get("lines")?
            .as_array()?
            .iter()
            .map(|line| match line {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<String>>();

        let count = body
            .get("count")
            .and_then(Value::as_u64)
            .filter(|c| *c > 0)
            .unwrap_or(lines.len() as u64);

        Some(SearchResult { lines, count })
    }
}

/// JavaScript-style truthiness, used to check the upstream response shape.
///
/// An empty array counts as falsy here, so `lines: []` is treated the same
/// as a missing field.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}
