//! Loading skeleton component
//!
//! Placeholder bars shown while a query is outstanding.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of each skeleton bar as a percentage of the panel
const BAR_WIDTHS: [u16; 5] = [20, 100, 100, 100, 100];

/// Skeleton placeholder with a shimmer that advances on every tick
#[derive(Default)]
pub struct LoadingComponent {
    frame: usize,
}

impl LoadingComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the bar lines for a panel `width` columns wide
    fn skeleton_lines(&self, width: u16) -> Vec<Line<'static>> {
        let highlighted = self.frame % BAR_WIDTHS.len();
        let mut lines = Vec::new();

        for (i, pct) in BAR_WIDTHS.iter().enumerate() {
            let bar_width = (width as usize * *pct as usize) / 100;
            let color = if i == highlighted {
                Color::Gray
            } else {
                Color::DarkGray
            };
            lines.push(Line::from(Span::styled(
                "▆".repeat(bar_width),
                Style::default().fg(color),
            )));
            lines.push(Line::from(""));
        }

        lines
    }
}

impl Component for LoadingComponent {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick {
            self.frame = self.frame.wrapping_add(1);
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Searching the laws... ")
            .title_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);

        let paragraph = Paragraph::new(self.skeleton_lines(inner.width)).block(block);
        frame.render_widget(paragraph, area);
        Ok(())
    }
}
