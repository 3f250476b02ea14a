//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations and polling background queries
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Query Input
    // ─────────────────────────────────────────────────────────────────────────
    /// Insert a character at the cursor
    InputChar(char),
    /// Insert pasted text at the cursor
    InputPaste(String),
    /// Delete the character before the cursor
    InputBackspace,
    /// Delete the character under the cursor
    InputDelete,
    /// Empty the input box
    ClearInput,
    /// Submit the current input as a query
    SubmitQuery,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    /// Scroll result panel up one line
    ScrollUp,
    /// Scroll result panel down one line
    ScrollDown,
    /// Scroll result panel up one page
    PageUp,
    /// Scroll result panel down one page
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::InputChar(c) => write!(f, "InputChar('{}')", c),
            Action::InputPaste(text) => write!(f, "InputPaste({} chars)", text.chars().count()),
            Action::InputBackspace => write!(f, "InputBackspace"),
            Action::InputDelete => write!(f, "InputDelete"),
            Action::ClearInput => write!(f, "ClearInput"),
            Action::SubmitQuery => write!(f, "SubmitQuery"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_omits_pasted_text() {
        assert_eq!(Action::Resize(80, 24).to_string(), "Resize(80, 24)");
        assert_eq!(Action::InputChar('x').to_string(), "InputChar('x')");
        assert_eq!(
            Action::InputPaste("lord commander".to_string()).to_string(),
            "InputPaste(14 chars)"
        );
    }
}
