// src/fs/lister.rs
//! Enumerates the immediate children of a directory into the working set.

use tracing::warn;

use super::{
    detection::{FileCategory, classify},
    handle::{DirectoryHandle, EntryHandle, EntryId, FileSnapshot},
    host::StorageHost,
};
use crate::error::FsError;

/// One listed child with its metadata already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub handle: EntryHandle,
    /// Present for files only.
    pub snapshot: Option<FileSnapshot>,
    /// Present for files only.
    pub category: Option<FileCategory>,
}

impl Entry {
    pub fn directory(handle: EntryHandle) -> Self {
        Self {
            handle,
            snapshot: None,
            category: None,
        }
    }

    pub fn file(handle: EntryHandle, snapshot: FileSnapshot) -> Self {
        let category = classify(snapshot.mime_hint.as_deref(), handle.name());
        Self {
            handle,
            snapshot: Some(snapshot),
            category: Some(category),
        }
    }

    pub fn id(&self) -> EntryId {
        self.handle.id()
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }

    pub fn is_dir(&self) -> bool {
        self.handle.is_dir()
    }
}

/// List `dir`. Snapshots are taken here so later sorting never waits on I/O.
pub fn list_entries(host: &dyn StorageHost, dir: &DirectoryHandle) -> Result<Vec<Entry>, FsError> {
    let children = host.list_children(dir)?;
    let mut entries = Vec::with_capacity(children.len());
    for handle in children {
        if handle.is_dir() {
            entries.push(Entry::directory(handle));
            continue;
        }
        match host.snapshot(&handle) {
            Ok(snapshot) => entries.push(Entry::file(handle, snapshot)),
            Err(err) => warn!(entry = handle.name(), %err, "skipping unreadable entry"),
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::fs::host::LocalHost;

    #[test]
    fn lists_immediate_children_only() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("photos/2024")).unwrap();
        fs::write(tmp.path().join("photos/2024/deep.png"), "x").unwrap();
        fs::write(tmp.path().join("cat.png"), "x").unwrap();

        let entries =
            list_entries(&LocalHost::new(), &DirectoryHandle::new(tmp.path())).unwrap();
        let mut names: Vec<_> = entries.iter().map(Entry::name).collect();
        names.sort();
        assert_eq!(names, ["cat.png", "photos"]);

        let cat = entries.iter().find(|e| e.name() == "cat.png").unwrap();
        assert_eq!(cat.category, Some(FileCategory::Image));
        assert_eq!(cat.snapshot.as_ref().map(|s| s.byte_size), Some(1));

        let photos = entries.iter().find(|e| e.is_dir()).unwrap();
        assert!(photos.snapshot.is_none());
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let entries =
            list_entries(&LocalHost::new(), &DirectoryHandle::new(tmp.path())).unwrap();
        assert!(entries.is_empty());
    }
}
