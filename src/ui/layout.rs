// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed layout areas for rendering.
pub struct ComputedLayout {
    /// Breadcrumb bar across the top
    pub header: Rect,
    /// File list or grid
    pub files: Rect,
    /// Preview content
    pub preview: Rect,
    /// File info box under the preview
    pub info: Rect,
    /// Notices, prompt or key help
    pub status: Rect,
}

/// Compute the layout for the whole frame.
pub fn compute_layout(area: Rect) -> ComputedLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    // Files take the left half; the preview column gets the rest.
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let preview_column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(7)])
        .split(columns[1]);

    ComputedLayout {
        header: rows[0],
        files: columns[0],
        preview: preview_column[0],
        info: preview_column[1],
        status: rows[2],
    }
}

/// A rectangle of `width` x `height` centred in `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
