use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use mockito::Matcher;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use breach_lookup::api::create_router;
use breach_lookup::upstream::UpstreamClient;

mod test_helpers {
    use super::*;

    pub async fn get(upstream_url: &str, uri: &str) -> Result<(StatusCode, Value)> {
        let router = create_router(Arc::new(UpstreamClient::new(upstream_url)));
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = serde_json::from_slice(&bytes)?;
        Ok((status, body))
    }

    pub fn comb_query(query: &str, start: &str, limit: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), query.into()),
            Matcher::UrlEncoded("start".into(), start.into()),
            Matcher::UrlEncoded("limit".into(), limit.into()),
        ])
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_missing_query_is_rejected() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let (status, body) = get(&server.url(), "/api/search").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Query parameter is required" }));

    let (status, _) = get(&server.url(), "/api/search?query=&start=5").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    upstream.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_success_passes_body_through() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let upstream_body = json!({
        "lines": ["a:1", "b:2"],
        "count": 2,
        "took": 17
    });
    let upstream = server
        .mock("GET", "/comb")
        .match_query(comb_query("test1234", "0", "100"))
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(upstream_body.to_string())
        .create_async()
        .await;

    let (status, body) = get(&server.url(), "/api/search?query=test1234").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, upstream_body, "extra fields are kept");

    upstream.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_start_and_limit_are_forwarded() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("GET", "/comb")
        .match_query(comb_query("john doe", "40", "20"))
        .with_status(200)
        .with_body(r#"{"lines":["john:x"],"count":41}"#)
        .create_async()
        .await;

    let (status, _) = get(
        &server.url(),
        "/api/search?query=john%20doe&start=40&limit=20",
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    upstream.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_upstream_status_is_reused() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _upstream = server
        .mock("GET", "/comb")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body(r#"{"error":"slow down"}"#)
        .create_async()
        .await;

    let (status, body) = get(&server.url(), "/api/search?query=ab").await?;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body,
        json!({ "error": "Your query is too short. Minimum 4 characters required." })
    );
    Ok(())
}

#[tokio::test]
async fn test_empty_lines_is_nothing_found() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _upstream = server
        .mock("GET", "/comb")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"lines":[],"count":0}"#)
        .create_async()
        .await;

    let (status, body) = get(&server.url(), "/api/search?query=nobody1234").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Nothing Found");
    assert_eq!(
        body["details"],
        "The API response did not contain the expected fields."
    );
    Ok(())
}

#[tokio::test]
async fn test_zero_count_is_nothing_found() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _upstream = server
        .mock("GET", "/comb")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"lines":["a:1"],"count":0}"#)
        .create_async()
        .await;

    let (status, body) = get(&server.url(), "/api/search?query=someone").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Nothing Found");
    Ok(())
}

#[tokio::test]
async fn test_undecodable_body_is_internal_error() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _upstream = server
        .mock("GET", "/comb")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let (status, body) = get(&server.url(), "/api/search?query=someone").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_upstream_is_internal_error() -> Result<()> {
    let (status, body) = get("http://127.0.0.1:1", "/api/search?query=someone").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
    Ok(())
}

#[tokio::test]
async fn test_repeated_query_key_uses_first_value() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("GET", "/comb")
        .match_query(comb_query("abcd", "0", "100"))
        .with_status(200)
        .with_body(r#"{"lines":["abcd:1"],"count":1}"#)
        .create_async()
        .await;

    let (status, body) = get(&server.url(), "/api/search?query=abcd&query=efgh").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lines"], json!(["abcd:1"]));

    upstream.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_repeated_keys_without_query_is_json_400() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let (status, body) = get(&server.url(), "/api/search?start=1&start=2").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Query parameter is required" }));

    upstream.assert_async().await;
    Ok(())
}
