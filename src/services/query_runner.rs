//! Background query runner service
//!
//! Spawns each submission onto the tokio runtime and hands completions back
//! to the UI thread through a channel that is drained on every tick.

use crate::model::query::QueryOutcome;
use crate::services::query_client::QueryClient;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::{debug, info};

/// A finished submission, tagged with the generation it was dispatched for
#[derive(Debug)]
pub struct Completion {
    pub generation: u64,
    pub outcome: QueryOutcome,
    pub elapsed: Duration,
}

/// Runs queries in the background
///
/// Earlier requests are never cancelled; every spawned request eventually
/// produces one `Completion` (or none, if the service never answers).
pub struct QueryRunner {
    client: Arc<QueryClient>,
    handle: Handle,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    in_flight: usize,
}

impl QueryRunner {
    pub fn new(client: QueryClient, handle: Handle) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            client: Arc::new(client),
            handle,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// URL every query is sent to
    pub fn query_url(&self) -> &url::Url {
        self.client.query_url()
    }

    /// Number of requests spawned but not yet polled
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Spawn a request for `query`
    pub fn spawn(&mut self, generation: u64, query: String) {
        let client = Arc::clone(&self.client);
        let tx = self.sender.clone();

        info!(generation, query_len = query.len(), "dispatching query");

        self.handle.spawn(async move {
            let start = Instant::now();
            let outcome = client.fetch(&query).await;
            // The receiver only goes away on shutdown
            let _ = tx.send(Completion {
                generation,
                outcome,
                elapsed: start.elapsed(),
            });
        });

        self.in_flight += 1;
    }

    /// Collect every completion received since the last poll
    pub fn poll(&mut self) -> Vec<Completion> {
        let mut completions = Vec::new();

        loop {
            match self.receiver.try_recv() {
                Ok(completion) => {
                    debug!(
                        generation = completion.generation,
                        elapsed_ms = completion.elapsed.as_millis() as u64,
                        ok = completion.outcome.is_ok(),
                        "query completed"
                    );
                    self.in_flight = self.in_flight.saturating_sub(1);
                    completions.push(completion);
                }
                // The runner holds a sender itself, so Disconnected cannot occur
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        completions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::query::{QueryResponse, QueryState, Submission};
    use crate::services::query_client::QUERY_PATH;
    use axum::{extract::Query, routing::get, Json, Router};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn spawn_server() -> String {
        async fn handler(Query(params): Query<HashMap<String, String>>) -> Json<QueryResponse> {
            let query = params.get("query").cloned().unwrap_or_default();
            // The first question answers last
            if query == "slow" {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            Json(QueryResponse {
                response: format!("answer to {}", query),
                query,
                citations: Vec::new(),
            })
        }

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let router = Router::new().route(QUERY_PATH, get(handler));
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{}", addr)
    }

    async fn wait_for(runner: &mut QueryRunner, count: usize) -> Vec<Completion> {
        let mut completions = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        while completions.len() < count && Instant::now() < deadline {
            completions.extend(runner.poll());
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        completions
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_runner_delivers_completion() {
        let base = spawn_server().await;
        let client = QueryClient::new(&base, None).expect("client");
        let mut runner = QueryRunner::new(client, Handle::current());

        runner.spawn(1, "who may wed?".to_string());
        assert_eq!(runner.in_flight(), 1);

        let completions = wait_for(&mut runner, 1).await;
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].generation, 1);
        let response = completions[0].outcome.as_ref().expect("success");
        assert_eq!(response.response, "answer to who may wed?");
        assert_eq!(runner.in_flight(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_late_completion_of_older_submission_is_ignored() {
        let base = spawn_server().await;
        let client = QueryClient::new(&base, None).expect("client");
        let mut runner = QueryRunner::new(client, Handle::current());
        let mut state = QueryState::new();

        for input in ["slow", "fast"] {
            state.input = input.to_string();
            if let Submission::Dispatch { generation, query } = state.begin_submission() {
                runner.spawn(generation, query);
            }
        }

        let completions = wait_for(&mut runner, 2).await;
        assert_eq!(completions.len(), 2);
        // Fast answer lands first, slow one second
        assert_eq!(completions[0].generation, 2);

        for completion in completions {
            state.complete(completion.generation, completion.outcome);
        }

        assert_eq!(state.last_question.as_deref(), Some("fast"));
        assert_eq!(state.last_answer.as_deref(), Some("answer to fast"));
        assert!(!state.is_loading);
    }
}
