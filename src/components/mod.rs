//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod help_dialog;
pub mod layout;
pub mod loading;
pub mod presenter;
pub mod query_input;
pub mod quit_dialog;
pub mod results;

pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use loading::LoadingComponent;
pub use presenter::present;
pub use query_input::QueryInputComponent;
pub use quit_dialog::QuitDialog;
pub use results::ResultsComponent;
