// src/ui/icons.rs
//! Icon mappings for file types in the browser.

use crate::fs::FileCategory;

/// Get the appropriate icon for a file or directory entry.
pub fn icon_for_entry(is_dir: bool, category: Option<FileCategory>) -> &'static str {
    if is_dir {
        return "\u{f07b}"; // folder icon
    }
    match category.unwrap_or(FileCategory::Other) {
        FileCategory::Image => "\u{f1c5}",
        FileCategory::Pdf => "\u{f1c1}",
        FileCategory::Audio => "\u{f1c7}",
        FileCategory::Video => "\u{f1c8}",
        FileCategory::Text => "\u{f15c}",
        FileCategory::Other => "\u{f016}",
    }
}
