// src/fs/handle.rs
//! Handles referencing directories and entries, plus read-once file snapshots.

use std::{
    fmt,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// Stable identity of a listed entry. Rows, selection and preview key on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(PathBuf);

impl EntryId {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Opaque reference to a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryHandle {
    name: String,
    path: PathBuf,
}

impl DirectoryHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Handle for a child of this directory.
    pub fn child(&self, name: &str, kind: EntryKind) -> EntryHandle {
        EntryHandle {
            kind,
            name: name.to_string(),
            path: self.path.join(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A child of a directory: either a directory or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHandle {
    kind: EntryKind,
    name: String,
    path: PathBuf,
}

impl EntryHandle {
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn id(&self) -> EntryId {
        EntryId(self.path.clone())
    }

    /// Directory handle for a directory-kind entry.
    pub fn as_directory(&self) -> Option<DirectoryHandle> {
        self.is_dir().then(|| DirectoryHandle {
            name: self.name.clone(),
            path: self.path.clone(),
        })
    }
}

/// Metadata of a file captured at access time. Not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    pub name: String,
    pub byte_size: u64,
    pub mime_hint: Option<String>,
    pub last_modified: SystemTime,
}
