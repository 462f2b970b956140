use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub header: Rect,
    pub progress: Rect,
    pub column: Rect,
    pub footer: Rect,
}

/// Fullscreen hides all chrome: the column takes the whole frame and the
/// header/progress/footer collapse to zero-height rects.
pub fn split_layout(area: Rect, fullscreen: bool) -> UiLayout {
    if fullscreen {
        let empty = Rect::new(area.x, area.y, area.width, 0);
        return UiLayout {
            header: empty,
            progress: empty,
            column: area,
            footer: empty,
        };
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    UiLayout {
        header: chunks[0],
        progress: chunks[1],
        column: chunks[2],
        footer: chunks[3],
    }
}

pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
