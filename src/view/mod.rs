// src/view/mod.rs
//! View computation: the filtered, sorted projection of the current directory.

pub mod filter;
pub mod selection;
pub mod sort;

use serde::Deserialize;
use tracing::debug;

use crate::fs::{Entry, FileCategory};

pub use filter::{DateRange, RangeParseError, SizeRange, filter_entries};
pub use selection::SelectionSet;
pub use sort::{SortKey, sort_entries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    List,
    Grid,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::List => DisplayMode::Grid,
            DisplayMode::Grid => DisplayMode::List,
        }
    }
}

/// User-controlled filter, sort and display options.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub type_filter: Option<FileCategory>,
    pub size_range: SizeRange,
    pub date_range: DateRange,
    pub search_text: String,
    pub sort_key: SortKey,
    pub sort_ascending: bool,
    pub display_mode: DisplayMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            type_filter: None,
            size_range: SizeRange::default(),
            date_range: DateRange::default(),
            search_text: String::new(),
            sort_key: SortKey::Name,
            sort_ascending: true,
            display_mode: DisplayMode::List,
        }
    }
}

impl ViewState {
    /// Next type filter in the cycle: none, each category in turn, none again.
    pub fn next_type_filter(&self) -> Option<FileCategory> {
        match self.type_filter {
            None => Some(FileCategory::ALL[0]),
            Some(current) => {
                let pos = FileCategory::ALL.iter().position(|c| *c == current).unwrap_or(0);
                FileCategory::ALL.get(pos + 1).copied()
            }
        }
    }

    /// Drop all filters, keep sort and display settings.
    pub fn clear_filters(&mut self) {
        self.type_filter = None;
        self.size_range = SizeRange::default();
        self.date_range = DateRange::default();
        self.search_text.clear();
    }

    pub fn has_filters(&self) -> bool {
        self.type_filter.is_some()
            || !self.size_range.is_unbounded()
            || !self.date_range.is_unbounded()
            || !self.search_text.is_empty()
    }
}

/// Filter then sort. A pure function of its inputs.
pub fn compute_view<'a>(entries: &'a [Entry], state: &ViewState) -> Vec<&'a Entry> {
    let mut view = filter_entries(entries, state);
    sort_entries(&mut view, state.sort_key, state.sort_ascending);
    debug!(listed = entries.len(), shown = view.len(), "recomputed view");
    view
}

#[cfg(test)]
mod tests {
    use std::{
        fs::{self, File},
        time::SystemTime,
    };

    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    use super::*;
    use crate::fs::{DirectoryHandle, LocalHost, list_entries};

    fn stamp(year: i32) -> SystemTime {
        Local
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .earliest()
            .map(SystemTime::from)
            .unwrap()
    }

    #[test]
    fn size_filter_then_date_sort_scenario() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), vec![b'a'; 512]).unwrap();
        fs::write(tmp.path().join("b.jpg"), vec![0u8; 2048]).unwrap();
        File::options()
            .write(true)
            .open(tmp.path().join("a.txt"))
            .unwrap()
            .set_modified(stamp(2023))
            .unwrap();
        File::options()
            .write(true)
            .open(tmp.path().join("b.jpg"))
            .unwrap()
            .set_modified(stamp(2024))
            .unwrap();

        let entries = list_entries(&LocalHost::new(), &DirectoryHandle::new(tmp.path())).unwrap();
        let mut state = ViewState {
            size_range: SizeRange { min: 1024, max: u64::MAX },
            ..ViewState::default()
        };
        let names = |view: Vec<&Entry>| view.iter().map(|e| e.name().to_string()).collect::<Vec<_>>();
        assert_eq!(names(compute_view(&entries, &state)), ["b.jpg"]);

        state.sort_key = SortKey::Modified;
        state.sort_ascending = false;
        assert_eq!(names(compute_view(&entries, &state)), ["b.jpg"]);

        state.clear_filters();
        assert_eq!(names(compute_view(&entries, &state)), ["b.jpg", "a.txt"]);
    }

    #[test]
    fn type_filter_cycles_through_every_category() {
        let mut state = ViewState::default();
        let mut seen = Vec::new();
        loop {
            state.type_filter = state.next_type_filter();
            match state.type_filter {
                Some(cat) => seen.push(cat),
                None => break,
            }
        }
        assert_eq!(seen, FileCategory::ALL);
    }
}
