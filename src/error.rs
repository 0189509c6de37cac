// src/error.rs
//! Error types surfaced by storage access and file mutations.

use std::io;

use thiserror::Error;

/// Failure of a call into the storage host.
#[derive(Debug, Error)]
pub enum FsError {
    /// The user dismissed the directory picker. Never shown as a notice.
    #[error("cancelled")]
    Cancelled,
    #[error("{op} failed: {source}")]
    Io {
        op: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("'{0}' no longer exists")]
    NotFound(String),
    #[error("'{0}' already exists")]
    AlreadyExists(String),
    #[error("'{0}' is not a valid name")]
    InvalidName(String),
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

impl FsError {
    /// Wrap an `io::Error`, promoting the kinds the UI reports differently.
    pub fn from_io(op: &'static str, name: &str, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(name.to_string()),
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists(name.to_string()),
            _ => FsError::Io { op, source },
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FsError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kinds_map_to_dedicated_variants() {
        let err = FsError::from_io("read", "a.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, FsError::NotFound(ref n) if n == "a.txt"));

        let err = FsError::from_io("mkdir", "x", io::Error::from(io::ErrorKind::AlreadyExists));
        assert_eq!(err.to_string(), "'x' already exists");

        let err = FsError::from_io(
            "write",
            "y",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(err.to_string().starts_with("write failed"));
    }
}
