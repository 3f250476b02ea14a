//! Result panel component
//!
//! Draws the error banner, the question echo, the answer and the numbered
//! citation list of a `QueryView`.

use crate::action::Action;
use crate::component::Component;
use crate::components::presenter::QueryView;
use anyhow::Result;
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

/// Scrollable panel showing the last result or error
#[derive(Default)]
pub struct ResultsComponent {
    scroll: usize,
    /// Inner height of the panel on the last draw, used for paging
    page_height: usize,
    view: QueryView,
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Build the panel content for `view`
///
/// Each text region is only present when populated.
pub fn build_result_lines(view: &QueryView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(error) = &view.error {
        lines.push(Line::from(vec![
            Span::styled(
                " ✗ ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(error.clone(), Style::default().fg(Color::Red)),
        ]));
        lines.push(Line::from(""));
    }

    if let Some(question) = &view.question {
        lines.push(section_title("Your question:"));
        lines.push(Line::from(question.clone()));
        lines.push(Line::from(""));
    }

    if let Some(answer) = &view.answer {
        lines.push(section_title("Response:"));
        for text_line in answer.lines() {
            lines.push(Line::from(text_line.to_string()));
        }
        lines.push(Line::from(""));
    }

    if !view.citations.is_empty() {
        lines.push(Line::from(Span::styled(
            "─".repeat(40),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(section_title("Citations:"));
        for citation in &view.citations {
            lines.push(Line::from(vec![
                Span::styled(
                    citation.heading(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" - "),
                Span::raw(citation.text.clone()),
            ]));
        }
    }

    lines
}

/// Rows `lines` occupy once word-wrapped to `width` columns
fn wrapped_height(lines: &[Line<'static>], width: u16) -> usize {
    Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width.max(1))
}

impl ResultsComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_view(&mut self, view: QueryView) {
        self.view = view;
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }
}

impl Component for ResultsComponent {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let page = self.page_height.max(1);
        match action {
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(page),
            Action::PageDown => self.scroll = self.scroll.saturating_add(page),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        if self.view.is_blank() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Type a question and press Enter",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(hint, area);
            return Ok(());
        }

        let lines = build_result_lines(&self.view);
        let inner = block.inner(area);

        // Clamp scroll against the height ratatui actually renders
        let total = wrapped_height(&lines, inner.width);
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        let visible_height = inner.height as usize;
        self.page_height = visible_height;
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }

        let offset = u16::try_from(self.scroll).unwrap_or(u16::MAX);
        frame.render_widget(paragraph.scroll((offset, 0)), area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}
