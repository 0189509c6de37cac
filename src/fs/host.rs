// src/fs/host.rs
//! The hierarchical storage capability the file manager runs on top of.

use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{
    detection::detect_mime,
    handle::{DirectoryHandle, EntryHandle, EntryKind, FileSnapshot},
};
use crate::error::FsError;

/// Host storage operations. Every call is a direct pass-through with no retry.
pub trait StorageHost {
    /// Resolve a user-supplied location to a directory. Blank input is a cancel.
    fn pick_directory(&self, location: &str) -> Result<DirectoryHandle, FsError>;

    /// Immediate children of `dir`, in no particular order.
    fn list_children(&self, dir: &DirectoryHandle) -> Result<Vec<EntryHandle>, FsError>;

    fn snapshot(&self, file: &EntryHandle) -> Result<FileSnapshot, FsError>;

    /// Read at most `limit` bytes from the start of a file.
    fn read_head(&self, file: &EntryHandle, limit: usize) -> Result<Vec<u8>, FsError>;

    fn read_file(&self, file: &EntryHandle) -> Result<Vec<u8>, FsError>;

    /// Write `bytes` to `dir/name`, replacing any existing file.
    fn write_file(&self, dir: &DirectoryHandle, name: &str, bytes: &[u8]) -> Result<(), FsError>;

    fn remove_entry(&self, dir: &DirectoryHandle, name: &str, recursive: bool)
        -> Result<(), FsError>;

    fn create_directory(&self, dir: &DirectoryHandle, name: &str)
        -> Result<DirectoryHandle, FsError>;
}

/// `StorageHost` backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalHost {
    /// Base for resolving relative picker input.
    base: Option<PathBuf>,
}

impl LocalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let expanded = match location.strip_prefix("~") {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => dirs::home_dir()
                .map(|home| home.join(rest.trim_start_matches('/')))
                .unwrap_or_else(|| PathBuf::from(location)),
            _ => PathBuf::from(location),
        };
        match &self.base {
            Some(base) if expanded.is_relative() => base.join(expanded),
            _ => expanded,
        }
    }
}

impl StorageHost for LocalHost {
    fn pick_directory(&self, location: &str) -> Result<DirectoryHandle, FsError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(FsError::Cancelled);
        }
        let path = self
            .resolve(location)
            .canonicalize()
            .map_err(|e| FsError::from_io("open folder", location, e))?;
        if !path.is_dir() {
            return Err(FsError::InvalidName(location.to_string()));
        }
        Ok(DirectoryHandle::new(path))
    }

    fn list_children(&self, dir: &DirectoryHandle) -> Result<Vec<EntryHandle>, FsError> {
        let read = fs::read_dir(dir.path()).map_err(|e| FsError::from_io("list", dir.name(), e))?;
        let mut children = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| FsError::from_io("list", dir.name(), e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks so linked directories stay navigable.
            let kind = if entry.path().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            children.push(dir.child(&name, kind));
        }
        debug!(dir = %dir.path().display(), count = children.len(), "listed children");
        Ok(children)
    }

    fn snapshot(&self, file: &EntryHandle) -> Result<FileSnapshot, FsError> {
        let meta = fs::metadata(file.path()).map_err(|e| FsError::from_io("stat", file.name(), e))?;
        let last_modified = meta
            .modified()
            .map_err(|e| FsError::from_io("stat", file.name(), e))?;
        Ok(FileSnapshot {
            name: file.name().to_string(),
            byte_size: meta.len(),
            mime_hint: detect_mime(file.path()),
            last_modified,
        })
    }

    fn read_head(&self, file: &EntryHandle, limit: usize) -> Result<Vec<u8>, FsError> {
        let handle = fs::File::open(file.path()).map_err(|e| FsError::from_io("read", file.name(), e))?;
        let mut buf = Vec::new();
        handle
            .take(limit as u64)
            .read_to_end(&mut buf)
            .map_err(|e| FsError::from_io("read", file.name(), e))?;
        Ok(buf)
    }

    fn read_file(&self, file: &EntryHandle) -> Result<Vec<u8>, FsError> {
        fs::read(file.path()).map_err(|e| FsError::from_io("read", file.name(), e))
    }

    fn write_file(&self, dir: &DirectoryHandle, name: &str, bytes: &[u8]) -> Result<(), FsError> {
        fs::write(dir.path().join(name), bytes).map_err(|e| FsError::from_io("write", name, e))
    }

    fn remove_entry(
        &self,
        dir: &DirectoryHandle,
        name: &str,
        recursive: bool,
    ) -> Result<(), FsError> {
        let path = dir.path().join(name);
        let meta = fs::symlink_metadata(&path).map_err(|e| FsError::from_io("delete", name, e))?;
        let result = if meta.is_dir() {
            if recursive {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_dir(&path)
            }
        } else {
            fs::remove_file(&path)
        };
        result.map_err(|e| FsError::from_io("delete", name, e))
    }

    fn create_directory(
        &self,
        dir: &DirectoryHandle,
        name: &str,
    ) -> Result<DirectoryHandle, FsError> {
        let path = dir.path().join(name);
        fs::create_dir(&path).map_err(|e| FsError::from_io("create folder", name, e))?;
        Ok(DirectoryHandle::new(path))
    }
}

/// Source file picked for upload, read straight from the local machine.
pub fn read_upload_source(path: &Path) -> Result<(String, Vec<u8>), FsError> {
    let label = path.display().to_string();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| FsError::InvalidName(label.clone()))?;
    let bytes = fs::read(path).map_err(|e| FsError::from_io("upload", &label, e))?;
    Ok((name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn blank_picker_input_is_a_cancel() {
        let host = LocalHost::new();
        assert!(host.pick_directory("   ").unwrap_err().is_cancelled());
    }

    #[test]
    fn picker_resolves_relative_to_base() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("inner")).unwrap();
        let host = LocalHost::with_base(tmp.path());
        let dir = host.pick_directory("inner").unwrap();
        assert_eq!(dir.name(), "inner");

        fs::write(tmp.path().join("file.txt"), "x").unwrap();
        assert!(matches!(
            host.pick_directory("file.txt"),
            Err(FsError::InvalidName(_))
        ));
        assert!(matches!(
            host.pick_directory("missing"),
            Err(FsError::NotFound(_))
        ));
    }

    #[test]
    fn children_report_kind_and_snapshot() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("notes.txt"), "hello").unwrap();
        let host = LocalHost::new();
        let dir = DirectoryHandle::new(tmp.path());

        let mut children = host.list_children(&dir).unwrap();
        children.sort_by(|a, b| a.name().cmp(b.name()));
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name(), "notes.txt");
        assert!(!children[0].is_dir());
        assert!(children[1].is_dir());

        let snap = host.snapshot(&children[0]).unwrap();
        assert_eq!(snap.byte_size, 5);
        assert_eq!(snap.mime_hint.as_deref(), Some("text/plain"));
        assert_eq!(host.read_head(&children[0], 3).unwrap(), b"hel");
    }

    #[test]
    fn remove_entry_is_recursive_on_request() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("tree/leaf")).unwrap();
        fs::write(tmp.path().join("tree/leaf/f"), "x").unwrap();
        let host = LocalHost::new();
        let dir = DirectoryHandle::new(tmp.path());

        assert!(host.remove_entry(&dir, "tree", false).is_err());
        host.remove_entry(&dir, "tree", true).unwrap();
        assert!(!tmp.path().join("tree").exists());
    }

    #[test]
    fn listing_a_vanished_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let gone = DirectoryHandle::new(tmp.path().join("gone"));
        assert!(matches!(
            LocalHost::new().list_children(&gone),
            Err(FsError::NotFound(_))
        ));
    }
}
