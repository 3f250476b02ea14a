//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Widest the query column is allowed to grow
pub const MAX_CONTENT_WIDTH: u16 = 100;

/// Main screen layout areas
pub struct MainLayout {
    pub input: Rect,
    pub body: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Center a column of at most `max_width` inside `area`
pub fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y,
        width,
        area.height,
    )
}

/// Calculate main screen layout
///
/// Input box on top, result panel below, then the optional status line and
/// the help bar.
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    let column = centered_column(area, MAX_CONTENT_WIDTH);

    let main_chunks = if has_status {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(column)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(column)
    };

    let (status, help) = if has_status {
        (Some(main_chunks[2]), main_chunks[3])
    } else {
        (None, main_chunks[2])
    };

    MainLayout {
        input: main_chunks[0],
        body: main_chunks[1],
        status,
        help,
    }
}
