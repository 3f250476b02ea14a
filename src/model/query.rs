//! Query lifecycle state
//!
//! `QueryState` is the single record driving the UI. It is only mutated
//! through `begin_submission` and `complete`, so the whole lifecycle
//! (`Idle -> Submitting -> Success | Error`) can be exercised without a
//! terminal or a network.

use crate::services::QueryError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Message shown when the user submits an empty or whitespace-only query
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a query";

/// A supporting passage returned by the service
///
/// Display numbering comes from the position in the list, never from the
/// content, so two identical citations are still two entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub text: String,
}

/// Success body of `GET /laws/query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub response: String,
    pub citations: Vec<Citation>,
}

/// Result of resolving one submission
pub type QueryOutcome = Result<QueryResponse, QueryError>;

/// What the caller must do after `begin_submission`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Input was empty; the error message is already set, nothing to send
    Rejected,
    /// Send `query` and report the outcome back tagged with `generation`
    Dispatch { generation: u64, query: String },
}

/// All mutable state for the query lifecycle
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    /// Uncommitted text in the input box
    pub input: String,
    /// True while the current generation is outstanding
    pub is_loading: bool,
    pub error_message: Option<String>,
    /// Question as echoed back by the service
    pub last_question: Option<String>,
    pub last_answer: Option<String>,
    pub citations: Vec<Citation>,
    /// When the displayed result arrived
    pub answered_at: Option<DateTime<Local>>,
    /// Token of the most recently dispatched submission
    pub generation: u64,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submission of the current input
    ///
    /// Always clears the previous result first. Empty input is rejected
    /// locally without ever entering the loading state. A rejection still
    /// counts as a new submission, so any request already in flight is
    /// superseded and its outcome discarded.
    pub fn begin_submission(&mut self) -> Submission {
        self.clear_result();
        self.generation += 1;

        if self.input.trim().is_empty() {
            self.is_loading = false;
            self.error_message = Some(EMPTY_QUERY_MESSAGE.to_string());
            return Submission::Rejected;
        }

        self.is_loading = true;

        Submission::Dispatch {
            generation: self.generation,
            query: self.input.clone(),
        }
    }

    /// Apply the outcome of a dispatched submission
    ///
    /// Returns `false` when the outcome belongs to an older generation and
    /// was discarded. Non-2xx statuses are reported without reading the body.
    pub fn complete(&mut self, generation: u64, outcome: QueryOutcome) -> bool {
        if generation != self.generation {
            return false;
        }

        match outcome {
            Ok(response) => {
                self.error_message = None;
                self.last_question = Some(response.query);
                self.last_answer = Some(response.response);
                self.citations = response.citations;
                self.answered_at = Some(Local::now());
                self.input.clear();
            }
            Err(err) => {
                self.clear_result();
                self.error_message = Some(err.to_string());
            }
        }

        self.is_loading = false;
        true
    }

    /// True when a result (question, answer or citations) is populated
    pub fn has_result(&self) -> bool {
        is_populated(&self.last_question)
            || is_populated(&self.last_answer)
            || !self.citations.is_empty()
    }

    fn clear_result(&mut self) {
        self.error_message = None;
        self.last_question = None;
        self.last_answer = None;
        self.citations.clear();
        self.answered_at = None;
    }
}

/// Non-empty check used for every optional text region
pub fn is_populated(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}
