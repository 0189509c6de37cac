// src/ui/rows.rs
//! Projection of the computed view into display rows with per-row handlers.

use chrono::{DateTime, Local};

use crate::{
    fs::{Entry, EntryId, format_bytes},
    ui::icons::icon_for_entry,
    view::SelectionSet,
};

/// Pointer gesture on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Click,
    DoubleClick,
    Context,
}

/// What a gesture on a row does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Descend(EntryId),
    Preview(EntryId),
    OpenExternal(EntryId),
    Rename(EntryId),
}

/// Handlers bound to one row by entry identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHandlers {
    pub on_click: RowAction,
    pub on_double_click: RowAction,
    pub on_context: Option<RowAction>,
}

impl RowHandlers {
    fn for_entry(entry: &Entry) -> Self {
        let id = entry.id();
        if entry.is_dir() {
            Self {
                on_click: RowAction::Descend(id.clone()),
                on_double_click: RowAction::Descend(id),
                on_context: None,
            }
        } else {
            Self {
                on_click: RowAction::Preview(id.clone()),
                on_double_click: RowAction::OpenExternal(id.clone()),
                on_context: Some(RowAction::Rename(id)),
            }
        }
    }

    pub fn action_for(&self, gesture: Gesture) -> Option<&RowAction> {
        match gesture {
            Gesture::Click => Some(&self.on_click),
            Gesture::DoubleClick => Some(&self.on_double_click),
            Gesture::Context => self.on_context.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: EntryId,
    pub icon: &'static str,
    pub name: String,
    pub size: String,
    pub modified: String,
    /// `None` for directories, which have no selection toggle.
    pub selected: Option<bool>,
    pub handlers: RowHandlers,
}

impl DisplayRow {
    /// One line of the list view.
    pub fn list_line(&self, name_width: usize) -> String {
        let mark = match self.selected {
            Some(true) => "[x]",
            Some(false) => "[ ]",
            None => "   ",
        };
        format!(
            "{mark} {} {:<name_width$} {:>9}  {}",
            self.icon,
            truncate(&self.name, name_width),
            self.size,
            self.modified
        )
    }

    /// Cell text of the grid view.
    pub fn grid_cell(&self, width: usize) -> String {
        let mark = if self.selected == Some(true) { "*" } else { " " };
        let name_width = width.saturating_sub(4);
        format!("{mark}{} {}", self.icon, truncate(&self.name, name_width))
    }
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let keep = width.saturating_sub(1);
    let mut out: String = name.chars().take(keep).collect();
    out.push('…');
    out
}

/// Format a modification instant in local time.
pub fn format_modified(instant: std::time::SystemTime) -> String {
    DateTime::<Local>::from(instant).format("%Y-%m-%d %H:%M").to_string()
}

/// Project the view into rows. No filtering or ordering happens here; the
/// widgets lay the same rows out as a list or a grid.
pub fn project_rows(view: &[&Entry], selection: &SelectionSet) -> Vec<DisplayRow> {
    view.iter()
        .map(|entry| {
            let (size, modified) = match &entry.snapshot {
                Some(snap) => (format_bytes(snap.byte_size), format_modified(snap.last_modified)),
                None => ("-".to_string(), String::new()),
            };
            DisplayRow {
                id: entry.id(),
                icon: icon_for_entry(entry.is_dir(), entry.category),
                name: entry.name().to_string(),
                size,
                modified,
                selected: (!entry.is_dir()).then(|| selection.contains(&entry.id())),
                handlers: RowHandlers::for_entry(entry),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::UNIX_EPOCH;

    use super::*;
    use crate::fs::{DirectoryHandle, EntryKind, FileSnapshot};

    fn sample() -> Vec<Entry> {
        let dir = DirectoryHandle::new("/r");
        vec![
            Entry::directory(dir.child("docs", EntryKind::Directory)),
            Entry::file(
                dir.child("song.mp3", EntryKind::File),
                FileSnapshot {
                    name: "song.mp3".into(),
                    byte_size: 2048,
                    mime_hint: Some("audio/mpeg".into()),
                    last_modified: UNIX_EPOCH,
                },
            ),
        ]
    }

    #[test]
    fn rows_bind_handlers_by_kind() {
        let entries = sample();
        let view: Vec<&Entry> = entries.iter().collect();
        let rows = project_rows(&view, &SelectionSet::default());

        let dir = &rows[0];
        assert_eq!(dir.selected, None);
        assert_eq!(dir.handlers.on_click, RowAction::Descend(entries[0].id()));
        assert!(dir.handlers.action_for(Gesture::Context).is_none());

        let file = &rows[1];
        assert_eq!(file.selected, Some(false));
        assert_eq!(file.size, "2.0 KB");
        assert_eq!(
            file.handlers.action_for(Gesture::DoubleClick),
            Some(&RowAction::OpenExternal(entries[1].id()))
        );
        assert_eq!(
            file.handlers.action_for(Gesture::Context),
            Some(&RowAction::Rename(entries[1].id()))
        );
    }

    #[test]
    fn selection_shows_in_rows() {
        let entries = sample();
        let mut selection = SelectionSet::default();
        selection.toggle(&entries[1]);
        let view: Vec<&Entry> = entries.iter().collect();
        let rows = project_rows(&view, &selection);
        assert_eq!(rows[1].selected, Some(true));
        assert!(rows[1].list_line(20).starts_with("[x]"));
        assert!(rows[1].grid_cell(20).starts_with('*'));
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
        assert_eq!(truncate("abc", 5), "abc");
    }
}
