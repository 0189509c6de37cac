// src/fs/mod.rs
//! Filesystem module - storage host, navigation, listing and mutations.

pub mod detection;
pub mod handle;
pub mod host;
pub mod lister;
pub mod navigation;
pub mod ops;

// Re-export commonly used types
pub use detection::{FileCategory, classify, format_bytes};
pub use handle::{DirectoryHandle, EntryHandle, EntryId, EntryKind, FileSnapshot};
pub use host::{LocalHost, StorageHost};
pub use lister::{Entry, list_entries};
pub use navigation::{NavigationError, NavigationStack};
