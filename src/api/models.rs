use serde::{Deserialize, Serialize};

use crate::data_models::SearchRequest;

/// Query-string parameters of `GET /api/search`. Everything is optional at
/// parse time so a missing `query` becomes a 400 instead of a rejection.
#[derive(Debug, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub start: Option<String>,
    pub limit: Option<String>,
}

impl SearchParams {
    /// Folds raw `key=value` pairs; the first occurrence of a key wins and
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> SearchParams
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "query" => &mut params.query,
                "start" => &mut params.start,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Returns `None` when the query is absent or empty. Whitespace is not
    /// trimmed here.
    pub fn into_request(self) -> Option<SearchRequest> {
        let query = self.query.filter(|q| !q.is_empty())?;
        Some(SearchRequest::new(query).with_window(self.start, self.limit))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
