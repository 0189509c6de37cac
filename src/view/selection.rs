// src/view/selection.rs
//! Files marked for bulk deletion.

use std::collections::BTreeSet;

use crate::fs::{Entry, EntryHandle, EntryId};

#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    ids: BTreeSet<EntryId>,
}

impl SelectionSet {
    pub fn contains(&self, id: &EntryId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip membership of a file. Directories are never selectable.
    pub fn toggle(&mut self, entry: &Entry) -> bool {
        if entry.is_dir() {
            return false;
        }
        let id = entry.id();
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
        true
    }

    /// Select every file among `entries`.
    pub fn select_all<'a>(&mut self, entries: impl IntoIterator<Item = &'a Entry>) {
        self.ids
            .extend(entries.into_iter().filter(|e| !e.is_dir()).map(Entry::id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Handles of selected entries still present in `entries`, in selection order.
    pub fn resolve(&self, entries: &[Entry]) -> Vec<EntryHandle> {
        self.ids
            .iter()
            .filter_map(|id| entries.iter().find(|e| &e.id() == id))
            .map(|e| e.handle.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{DirectoryHandle, EntryKind};

    #[test]
    fn only_files_can_be_selected() {
        let dir = DirectoryHandle::new("/x");
        let folder = Entry::directory(dir.child("sub", EntryKind::Directory));
        let mut selection = SelectionSet::default();

        assert!(!selection.toggle(&folder));
        selection.select_all([&folder]);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_flips_membership() {
        let dir = DirectoryHandle::new("/x");
        let file = Entry {
            handle: dir.child("a.txt", EntryKind::File),
            snapshot: None,
            category: None,
        };
        let mut selection = SelectionSet::default();
        selection.toggle(&file);
        assert!(selection.contains(&file.id()));
        selection.toggle(&file);
        assert!(!selection.contains(&file.id()));
    }
}
