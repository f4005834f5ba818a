use serde_json::Value;
use thiserror::Error;

use crate::api::models::ErrorBody;
use crate::data_models::SearchResult;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid response format";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Failures seen by the search view. The `Display` output is exactly the
/// message shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The proxy answered with a non-success status.
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response format")]
    InvalidFormat,

    #[error("An unexpected error occurred")]
    Transport(#[from] reqwest::Error),
}

/// Talks to the query proxy on behalf of the search view.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> ProxyClient {
        ProxyClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/api/search?query={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    pub async fn search(&self, query: &str) -> Result<SearchResult, ClientError> {
        let res = self.http.get(self.search_url(query)).send().await?;

        if !res.status().is_success() {
            let message = res
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.error)
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| FETCH_FAILED_MESSAGE.to_string());
            return Err(ClientError::Rejected(message));
        }

        let body: Value = res.json().await?;
        SearchResult::from_body(&body).ok_or(ClientError::InvalidFormat)
    }
}
