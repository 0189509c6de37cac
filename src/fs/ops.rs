// src/fs/ops.rs
//! File mutations: create folder, upload, delete, rename.
//!
//! Each operation is a direct call into the [`StorageHost`]. Batch operations
//! keep going after a failed item and report every outcome.

use std::path::PathBuf;

use tracing::{info, warn};

use super::{
    handle::{DirectoryHandle, EntryHandle, EntryId},
    host::{StorageHost, read_upload_source},
};
use crate::error::FsError;

/// Outcome of a batch operation, item by item.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, FsError)>,
}

impl BatchReport {
    fn record(&mut self, name: String, result: Result<(), FsError>) {
        match result {
            Ok(()) => self.succeeded.push(name),
            Err(err) => self.failed.push((name, err)),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Host-independent name validation.
pub fn validate_name(name: &str) -> Result<(), FsError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(FsError::InvalidName(name.to_string()));
    }
    Ok(())
}

pub fn create_folder(
    host: &dyn StorageHost,
    dir: &DirectoryHandle,
    name: &str,
) -> Result<DirectoryHandle, FsError> {
    validate_name(name)?;
    let created = host.create_directory(dir, name)?;
    info!(folder = name, parent = %dir.path().display(), "created folder");
    Ok(created)
}

/// Copy each local file into `dir` under its own name, overwriting.
pub fn upload(host: &dyn StorageHost, dir: &DirectoryHandle, sources: &[PathBuf]) -> BatchReport {
    let mut report = BatchReport::default();
    for source in sources {
        let result = read_upload_source(source)
            .and_then(|(name, bytes)| host.write_file(dir, &name, &bytes).map(|()| name));
        match result {
            Ok(name) => {
                info!(file = %name, "uploaded");
                report.succeeded.push(name);
            }
            Err(err) => {
                warn!(source = %source.display(), %err, "upload failed");
                report.failed.push((source.display().to_string(), err));
            }
        }
    }
    report
}

/// Recursively delete each target from `dir`.
pub fn delete_entries(
    host: &dyn StorageHost,
    dir: &DirectoryHandle,
    targets: &[EntryHandle],
) -> BatchReport {
    let mut report = BatchReport::default();
    for target in targets {
        let result = host.remove_entry(dir, target.name(), true);
        match &result {
            Ok(()) => info!(entry = target.name(), "deleted"),
            Err(err) => warn!(entry = target.name(), %err, "delete failed"),
        }
        report.record(target.name().to_string(), result);
    }
    report
}

/// The host exposes no atomic rename, so this never touches storage.
pub fn rename(target: &EntryId, new_name: &str) -> Result<(), FsError> {
    warn!(entry = %target, new_name, "rename requested but unsupported");
    Err(FsError::Unsupported("rename"))
}
