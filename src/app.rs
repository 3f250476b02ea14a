//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! It owns the `QueryState`; every mutation of it happens in `update`.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, present, HelpDialog, LoadingComponent, QueryInputComponent, QuitDialog,
    ResultsComponent,
};
use crate::model::modal::{Modal, ModalStack};
use crate::model::query::{QueryState, Submission};
use crate::services::{Completion, QueryRunner};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Query lifecycle state
    pub query: QueryState,

    /// Background query runner
    pub runner: QueryRunner,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub input: QueryInputComponent,
    pub loading: LoadingComponent,
    pub results: ResultsComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(runner: QueryRunner) -> App {
        let endpoint = runner.query_url().to_string();
        App {
            query: QueryState::new(),
            runner,
            modals: ModalStack::new(),
            should_quit: false,
            input: QueryInputComponent::new(),
            loading: LoadingComponent::new(),
            results: ResultsComponent::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::new(endpoint),
        }
    }

    /// Validate the input and dispatch it
    fn submit_query(&mut self) {
        match self.query.begin_submission() {
            Submission::Rejected => {
                info!("empty query rejected");
            }
            Submission::Dispatch { generation, query } => {
                self.runner.spawn(generation, query);
            }
        }
        self.results.reset_scroll();
    }

    /// Feed one finished request back into the query state
    fn apply_completion(&mut self, completion: Completion) {
        let generation = completion.generation;
        let outcome_kind = match &completion.outcome {
            Ok(response) => format!("ok ({} citations)", response.citations.len()),
            Err(err) => err.kind().to_string(),
        };

        if self.query.complete(generation, completion.outcome) {
            if let Some(error) = &self.query.error_message {
                warn!(generation, outcome = %outcome_kind, %error, "query failed");
            } else {
                info!(generation, outcome = %outcome_kind, "query answered");
            }
            self.results.reset_scroll();
            self.input.clamp_cursor(&self.query.input);
        } else {
            debug!(
                generation,
                current = self.query.generation,
                outcome = %outcome_kind,
                "discarding stale query result"
            );
        }
    }

    /// Handle pasted text
    pub fn handle_paste(&mut self, text: &str) -> Option<Action> {
        if self.modals.is_empty() {
            Some(Action::InputPaste(text.to_string()))
        } else {
            None
        }
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let submit_style = if self.query.is_loading {
            Style::default().fg(Color::DarkGray)
        } else {
            key_style
        };

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", submit_style),
            Span::raw("Submit  "),
            Span::styled(" PgUp/PgDn ", key_style),
            Span::raw("Scroll  "),
            Span::styled(" F1 ", key_style),
            Span::raw("Help  "),
            Span::styled(" Esc ", key_style),
            Span::raw("Quit"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(help, area);
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::OpenQuitDialog));
        }

        if let Some(modal) = self.modals.top() {
            return match modal {
                Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
                Modal::Help => self.help_dialog.handle_key_event(key),
            };
        }

        match key.code {
            KeyCode::Esc => Ok(Some(Action::OpenQuitDialog)),
            KeyCode::F(1) => Ok(Some(Action::OpenHelp)),
            KeyCode::Up if ctrl => Ok(Some(Action::ScrollUp)),
            KeyCode::Down if ctrl => Ok(Some(Action::ScrollDown)),
            KeyCode::PageUp => Ok(Some(Action::PageUp)),
            KeyCode::PageDown => Ok(Some(Action::PageDown)),
            _ => {
                // The input needs the current loading state to gate Enter
                self.input.set_view(present(&self.query).input);
                self.input.handle_key_event(key)
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(action = %action, "handling action");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.query.is_loading {
                    self.loading.update(Action::Tick)?;
                }
                for completion in self.runner.poll() {
                    self.apply_completion(completion);
                }
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Query Input
            // ─────────────────────────────────────────────────────────────────
            Action::InputChar(c) => self.input.insert_char(&mut self.query.input, c),
            Action::InputPaste(text) => self.input.insert_str(&mut self.query.input, &text),
            Action::InputBackspace => self.input.backspace(&mut self.query.input),
            Action::InputDelete => self.input.delete(&mut self.query.input),
            Action::ClearInput => self.input.clear(&mut self.query.input),
            Action::SubmitQuery => self.submit_query(),

            // ─────────────────────────────────────────────────────────────────
            // Scrolling (delegate to ResultsComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.results.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                if self.modals.top() != Some(&Modal::QuitConfirm) {
                    self.modals.push(Modal::QuitConfirm);
                }
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.toggle(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let view = present(&self.query);
        let layout = calculate_main_layout(area, view.status.is_some());

        self.input.set_view(view.input.clone());
        self.input.draw(frame, layout.input)?;

        if view.loading {
            self.loading.draw(frame, layout.body)?;
        } else {
            self.results.set_view(view.clone());
            self.results.draw(frame, layout.body)?;
        }

        if let (Some(status_area), Some(status)) = (layout.status, &view.status) {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    status.clone(),
                    Style::default().fg(Color::DarkGray),
                ))
                .alignment(Alignment::Right),
                status_area,
            );
        }

        self.draw_help_bar(frame, layout.help);

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }

        Ok(())
    }
}
