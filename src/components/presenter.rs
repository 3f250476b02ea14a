//! Result presenter
//!
//! Maps a `QueryState` to the regions that should be visible. This is a
//! pure function; the drawing components only ever see a `QueryView`.

use crate::model::query::{is_populated, Citation, QueryState};

/// Placeholder shown in an empty input box
pub const INPUT_PLACEHOLDER: &str = "Ask a question about the laws of Westeros...";

/// The input control, always visible
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputView {
    pub text: String,
    /// Submitting is disabled while a query is loading; typing is not
    pub submit_enabled: bool,
}

/// One numbered entry in the citation list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationLine {
    /// 1-based position in the list returned by the service
    pub index: usize,
    pub source: String,
    pub text: String,
}

impl CitationLine {
    /// Bold part of the entry, e.g. `[1] Book 1, Ch. 7`
    pub fn heading(&self) -> String {
        format!("[{}] {}", self.index, self.source)
    }

    /// Full single-line label, e.g. `[1] Book 1, Ch. 7 - text`
    pub fn label(&self) -> String {
        format!("{} - {}", self.heading(), self.text)
    }
}

/// Everything the screen shows for one state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryView {
    pub input: InputView,
    pub loading: bool,
    pub error: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub citations: Vec<CitationLine>,
    pub status: Option<String>,
}

impl QueryView {
    /// True when the result region has nothing to show
    pub fn is_blank(&self) -> bool {
        !self.loading
            && self.error.is_none()
            && self.question.is_none()
            && self.answer.is_none()
            && self.citations.is_empty()
    }
}

/// Number citations by position, in the order received
pub fn citation_lines(citations: &[Citation]) -> Vec<CitationLine> {
    citations
        .iter()
        .enumerate()
        .map(|(i, citation)| CitationLine {
            index: i + 1,
            source: citation.source.clone(),
            text: citation.text.clone(),
        })
        .collect()
}

/// Compute the visible regions for `state`
///
/// While loading, only the input and the loading placeholder are shown.
pub fn present(state: &QueryState) -> QueryView {
    let input = InputView {
        text: state.input.clone(),
        submit_enabled: !state.is_loading,
    };

    if state.is_loading {
        return QueryView {
            input,
            loading: true,
            ..QueryView::default()
        };
    }

    let non_empty = |value: &Option<String>| {
        if is_populated(value) {
            value.clone()
        } else {
            None
        }
    };

    let status = state
        .answered_at
        .filter(|_| state.has_result())
        .map(|t| format!("Answered at {}", t.format("%H:%M:%S")));

    QueryView {
        input,
        loading: false,
        error: non_empty(&state.error_message),
        question: non_empty(&state.last_question),
        answer: non_empty(&state.last_answer),
        citations: citation_lines(&state.citations),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::query::{QueryResponse, Submission, EMPTY_QUERY_MESSAGE};
    use crate::services::QueryError;
    use proptest::prelude::*;

    fn submitted(input: &str) -> (QueryState, u64) {
        let mut state = QueryState::new();
        state.input = input.to_string();
        match state.begin_submission() {
            Submission::Dispatch { generation, .. } => (state, generation),
            Submission::Rejected => panic!("expected dispatch"),
        }
    }

    #[test]
    fn test_nights_watch_scenario() {
        let (mut state, generation) = submitted("What is the Night's Watch oath?");
        state.complete(
            generation,
            Ok(QueryResponse {
                query: "What is the Night's Watch oath?".to_string(),
                response: "...".to_string(),
                citations: vec![Citation {
                    source: "Book 1, Ch. 7".to_string(),
                    text: "...".to_string(),
                }],
            }),
        );

        let view = present(&state);

        assert_eq!(view.question.as_deref(), Some("What is the Night's Watch oath?"));
        assert_eq!(view.answer.as_deref(), Some("..."));
        assert_eq!(view.citations.len(), 1);
        assert_eq!(view.citations[0].label(), "[1] Book 1, Ch. 7 - ...");
        assert!(view.error.is_none());
        assert!(view.input.text.is_empty());
        assert!(view.input.submit_enabled);
        assert!(view.status.is_some());
    }

    #[test]
    fn test_empty_input_shows_only_error() {
        let mut state = QueryState::new();
        state.begin_submission();

        let view = present(&state);

        assert_eq!(view.error.as_deref(), Some(EMPTY_QUERY_MESSAGE));
        assert!(!view.loading);
        assert!(view.question.is_none());
        assert!(view.answer.is_none());
        assert!(view.citations.is_empty());
        assert!(view.status.is_none());
    }

    #[test]
    fn test_loading_hides_everything_but_input() {
        let (mut state, _) = submitted("who holds Casterly Rock?");
        // Results from an earlier generation must not leak into the loading view
        state.last_answer = Some("stale".to_string());
        state.error_message = Some("stale error".to_string());

        let view = present(&state);

        assert!(view.loading);
        assert!(!view.input.submit_enabled);
        assert_eq!(view.input.text, "who holds Casterly Rock?");
        assert!(view.answer.is_none());
        assert!(view.error.is_none());
        assert!(view.citations.is_empty());
    }

    #[test]
    fn test_connectivity_failure_view() {
        let (mut state, generation) = submitted("anything");
        state.complete(
            generation,
            Err(QueryError::Transport("tcp connect error: Connection refused".to_string())),
        );

        let view = present(&state);

        assert!(view
            .error
            .as_deref()
            .is_some_and(|e| e.contains("Connection refused")));
        assert!(view.citations.is_empty());
        assert!(!view.loading);
        assert!(view.input.submit_enabled);
    }

    #[test]
    fn test_empty_strings_are_not_rendered() {
        let (mut state, generation) = submitted("blank");
        state.complete(
            generation,
            Ok(QueryResponse {
                query: String::new(),
                response: String::new(),
                citations: Vec::new(),
            }),
        );

        let view = present(&state);

        assert!(view.question.is_none());
        assert!(view.answer.is_none());
        assert!(view.is_blank());
    }

    #[test]
    fn test_duplicate_citations_are_numbered_separately() {
        let citation = Citation {
            source: "7. Inheritance".to_string(),
            text: "The eldest son inherits.".to_string(),
        };
        let lines = citation_lines(&[citation.clone(), citation]);

        assert_eq!(lines[0].heading(), "[1] 7. Inheritance");
        assert_eq!(lines[1].heading(), "[2] 7. Inheritance");
    }

    proptest! {
        #[test]
        fn prop_citation_index_is_position_plus_one(
            entries in proptest::collection::vec(("[A-Za-z0-9 .,]{0,10}", "[a-z ]{0,20}"), 0..12)
        ) {
            let citations: Vec<Citation> = entries
                .into_iter()
                .map(|(source, text)| Citation { source, text })
                .collect();

            let lines = citation_lines(&citations);

            prop_assert_eq!(lines.len(), citations.len());
            for (position, (line, citation)) in lines.iter().zip(&citations).enumerate() {
                prop_assert_eq!(line.index, position + 1);
                prop_assert_eq!(&line.source, &citation.source);
                prop_assert_eq!(&line.text, &citation.text);
            }
        }

        #[test]
        fn prop_present_is_idempotent(input in ".{0,20}", loading in any::<bool>(), error in proptest::option::of("[a-z ]{0,10}")) {
            let mut state = QueryState::new();
            state.input = input;
            state.is_loading = loading;
            state.error_message = error;

            prop_assert_eq!(present(&state), present(&state));
        }
    }
}
