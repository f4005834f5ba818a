use axum::http::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::data_models::{SearchRequest, is_truthy};
use crate::error::ProxyError;

/// Client for the third-party breach-search service.
///
/// Holds one `reqwest::Client` for the lifetime of the server; requests use
/// the client's default timeouts and are never retried.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>) -> UpstreamClient {
        UpstreamClient::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> UpstreamClient {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        UpstreamClient { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the upstream URL. Only the query is encoded; start and limit
    /// are appended as given.
    pub fn comb_url(&self, request: &SearchRequest) -> String {
        format!(
            "{}/comb?query={}&start={}&limit={}",
            self.base_url,
            urlencoding::encode(&request.query),
            request.start,
            request.limit
        )
    }

    /// Runs one search against the upstream and returns its body untouched.
    pub async fn search(&self, request: &SearchRequest) -> Result<Value, ProxyError> {
        let url = self.comb_url(request);
        log::debug!("forwarding search to {url}");

        let res = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            log::warn!("upstream returned {status} for query {:?}", request.query);
            let status =
                StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
            return Err(ProxyError::Upstream(status));
        }

        let body: Value = res.json().await?;
        if !is_truthy(body.get("lines")) || !is_truthy(body.get("count")) {
            return Err(ProxyError::NothingFound);
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comb_url_encodes_query_only() {
        let client = UpstreamClient::new("https://upstream.test/");
        let req = SearchRequest::new("john doe@example.com")
            .with_window(Some("10".into()), Some("5&x=1".into()));
        assert_eq!(
            client.comb_url(&req),
            "https://upstream.test/comb?query=john%20doe%40example.com&start=10&limit=5&x=1"
        );
    }
}
