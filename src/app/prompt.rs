// src/app/prompt.rs
//! One-line text prompts and the confirmation state.

use super::editor::EditBuffer;
use crate::fs::EntryId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    OpenFolder,
    JumpTo,
    Search,
    SizeRange,
    DateRange,
    CreateFolder,
    Upload,
    Rename(EntryId),
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::OpenFolder => "Open folder",
            PromptKind::JumpTo => "Jump to breadcrumb #",
            PromptKind::Search => "Search",
            PromptKind::SizeRange => "Size range (e.g. 1K..2M)",
            PromptKind::DateRange => "Date range (YYYY-MM-DD..YYYY-MM-DD)",
            PromptKind::CreateFolder => "New folder name",
            PromptKind::Upload => "Upload files (separate paths with ;)",
            PromptKind::Rename(_) => "New file name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
    /// Value to restore when a live-edited prompt is cancelled.
    pub original: String,
}

impl Prompt {
    pub fn new(kind: PromptKind, initial: impl Into<String>) -> Self {
        let initial = initial.into();
        Self {
            kind,
            input: initial.clone(),
            original: initial,
        }
    }
}

/// What keystrokes currently drive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Prompt(Prompt),
    ConfirmDelete { count: usize },
    /// The previewed text file is open in the editor.
    Edit(EditBuffer),
}

/// Split upload input into paths. Blank segments are ignored.
pub fn split_paths(input: &str) -> Vec<std::path::PathBuf> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(std::path::PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_paths_split_on_semicolons() {
        let paths = split_paths(" /tmp/a b.txt ; ;/tmp/c.txt");
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].to_str(), Some("/tmp/a b.txt"));
    }
}
