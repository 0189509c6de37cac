// src/ui/widgets/mod.rs
//! Custom widgets for the folio UI.

pub mod breadcrumbs;
pub mod file_list;
pub mod preview_pane;
pub mod status_bar;

use ratatui::layout::{Position, Rect};

use crate::fs::EntryId;

// Re-export widget rendering functions
pub use breadcrumbs::render_breadcrumbs;
pub use file_list::{FileListState, render_file_list};
pub use preview_pane::{ImageCache, render_editor, render_info, render_preview};
pub use status_bar::{render_prompt, render_status};

/// Screen regions drawn in the last frame, used to route mouse clicks.
#[derive(Debug, Default)]
pub struct HitMap {
    pub rows: Vec<(Rect, EntryId)>,
    pub crumbs: Vec<(Rect, usize)>,
    /// Preview pane, where the wheel scrolls text instead of the cursor.
    pub preview: Rect,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.rows.clear();
        self.crumbs.clear();
        self.preview = Rect::default();
    }

    pub fn over_preview(&self, column: u16, row: u16) -> bool {
        self.preview.contains(Position::new(column, row))
    }

    pub fn row_at(&self, column: u16, row: u16) -> Option<&EntryId> {
        let pos = Position::new(column, row);
        self.rows
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, id)| id)
    }

    pub fn crumb_at(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.crumbs
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, index)| *index)
    }
}
