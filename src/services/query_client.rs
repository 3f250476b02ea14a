//! HTTP client for the law question-answering service

use crate::model::query::{QueryOutcome, QueryResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Path of the query endpoint, relative to the configured base
pub const QUERY_PATH: &str = "/laws/query";

/// Failure of a dispatched query
///
/// `Display` is the exact text shown in the error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The service answered with a non-2xx status; the body is not read
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    /// Connection, timeout or body read failure
    #[error("Error: {0}")]
    Transport(String),
    /// Body was not the expected JSON shape
    #[error("Error: {0}")]
    Decode(String),
}

impl QueryError {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Status { .. } => "status",
            QueryError::Transport(_) => "transport",
            QueryError::Decode(_) => "decode",
        }
    }
}

/// Endpoint configuration errors
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid endpoint '{endpoint}': {source}")]
    Parse {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("unsupported endpoint scheme '{0}', expected http or https")]
    Scheme(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Client for `GET <endpoint>/laws/query`
#[derive(Debug, Clone)]
pub struct QueryClient {
    query_url: Url,
    client: Client,
}

impl QueryClient {
    /// Build a client for the given endpoint base
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, EndpointError> {
        let query_url = build_query_url(endpoint)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            query_url,
            client: builder.build()?,
        })
    }

    /// Full URL queries are sent to (without the query string)
    pub fn query_url(&self) -> &Url {
        &self.query_url
    }

    /// Send one question and decode the answer
    pub async fn fetch(&self, query: &str) -> QueryOutcome {
        debug!(url = %self.query_url, query_len = query.len(), "sending query");

        let response = self
            .client
            .get(self.query_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "query service returned an error status");
            return Err(QueryError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        serde_json::from_slice::<QueryResponse>(&body).map_err(|e| QueryError::Decode(e.to_string()))
    }
}

/// Join the endpoint base and the query path
fn build_query_url(endpoint: &str) -> Result<Url, EndpointError> {
    let base = endpoint.trim().trim_end_matches('/');
    let full = format!("{}{}", base, QUERY_PATH);

    let url = Url::parse(&full).map_err(|source| EndpointError::Parse {
        endpoint: endpoint.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(EndpointError::Scheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::query::Citation;
    use axum::{extract::Query, http::HeaderMap, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn spawn_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{}", addr)
    }

    async fn echo_query(
        Query(params): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> Json<QueryResponse> {
        let query = params.get("query").cloned().unwrap_or_default();
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("missing")
            .to_string();

        Json(QueryResponse {
            query,
            response: format!("content-type={}", content_type),
            citations: vec![
                Citation {
                    source: "1. Theft, 1.2 Sept".to_string(),
                    text: "Stealing from a sept is punished by the loss of a hand.".to_string(),
                },
                Citation {
                    source: "4. Trials".to_string(),
                    text: "The accused may demand a trial by combat.".to_string(),
                },
            ],
        })
    }

    #[test]
    fn test_query_url_joins_path() {
        let client = QueryClient::new("http://localhost:8000/", None).expect("client");
        assert_eq!(client.query_url().as_str(), "http://localhost:8000/laws/query");

        let client = QueryClient::new("https://laws.example.org/api", None).expect("client");
        assert_eq!(
            client.query_url().as_str(),
            "https://laws.example.org/api/laws/query"
        );
    }

    #[test]
    fn test_invalid_endpoints_are_rejected() {
        assert!(matches!(
            QueryClient::new("not a url", None),
            Err(EndpointError::Parse { .. })
        ));
        assert!(matches!(
            QueryClient::new("ftp://localhost", None),
            Err(EndpointError::Scheme(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            QueryError::Status { status: 404 }.to_string(),
            "HTTP error! status: 404"
        );
        assert_eq!(
            QueryError::Transport("connection refused".to_string()).to_string(),
            "Error: connection refused"
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_raw_query_and_json_header() {
        let base = spawn_server(Router::new().route(QUERY_PATH, get(echo_query))).await;
        let client = QueryClient::new(&base, None).expect("client");

        let response = client
            .fetch("what happens if I steal from the Sept? & more")
            .await
            .expect("query succeeds");

        assert_eq!(response.query, "what happens if I steal from the Sept? & more");
        assert_eq!(response.response, "content-type=application/json");
        assert_eq!(response.citations.len(), 2);
        assert_eq!(response.citations[0].source, "1. Theft, 1.2 Sept");
        assert_eq!(response.citations[1].source, "4. Trials");
    }

    #[tokio::test]
    async fn test_fetch_reports_status_without_reading_body() {
        let router = Router::new().route(
            QUERY_PATH,
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(QueryResponse {
                        query: "q".to_string(),
                        response: "should not be shown".to_string(),
                        citations: Vec::new(),
                    }),
                )
            }),
        );
        let base = spawn_server(router).await;
        let client = QueryClient::new(&base, None).expect("client");

        let err = client.fetch("q").await.expect_err("500 is an error");
        assert_eq!(err, QueryError::Status { status: 500 });
    }

    #[tokio::test]
    async fn test_fetch_unknown_route_is_404() {
        let base = spawn_server(Router::new()).await;
        let client = QueryClient::new(&base, None).expect("client");

        let err = client.fetch("q").await.expect_err("no route");
        assert_eq!(err, QueryError::Status { status: 404 });
    }

    #[tokio::test]
    async fn test_fetch_malformed_json_is_decode_error() {
        let router = Router::new().route(QUERY_PATH, get(|| async { "not json" }));
        let base = spawn_server(router).await;
        let client = QueryClient::new(&base, None).expect("client");

        let err = client.fetch("q").await.expect_err("bad body");
        assert_eq!(err.kind(), "decode");
        assert!(err.to_string().starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_fetch_missing_citations_is_decode_error() {
        let router = Router::new().route(
            QUERY_PATH,
            get(|| async { Json(serde_json::json!({"query": "q", "response": "r"})) }),
        );
        let base = spawn_server(router).await;
        let client = QueryClient::new(&base, None).expect("client");

        let err = client.fetch("q").await.expect_err("citations are required");
        assert_eq!(err.kind(), "decode");
        assert!(err.to_string().contains("citations"));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let client = QueryClient::new(&format!("http://{}", addr), None).expect("client");
        let err = client.fetch("q").await.expect_err("nothing listening");

        assert_eq!(err.kind(), "transport");
        assert!(err.to_string().starts_with("Error: "));
    }
}
