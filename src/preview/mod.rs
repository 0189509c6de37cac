// src/preview/mod.rs
//! Preview module - builds the preview surface for a selected file.

pub mod markup;
pub mod metadata;
pub mod player;

use image::DynamicImage;
use ratatui::text::Line;
use tracing::warn;

use crate::{
    error::FsError,
    fs::{Entry, EntryId, FileCategory, FileSnapshot, StorageHost, format_bytes},
};

pub use metadata::AudioDetails;
pub use player::AudioPlayer;

/// Which surface a file is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    PlainText,
    Markup,
    Image,
    Audio,
    Video,
    Document,
}

impl PreviewKind {
    pub fn for_entry(category: FileCategory, name: &str) -> Self {
        match category {
            FileCategory::Image => PreviewKind::Image,
            FileCategory::Pdf => PreviewKind::Document,
            FileCategory::Audio => PreviewKind::Audio,
            FileCategory::Video => PreviewKind::Video,
            FileCategory::Text if markup_flavor(name).is_some() => PreviewKind::Markup,
            FileCategory::Text | FileCategory::Other => PreviewKind::PlainText,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Markup {
    Markdown,
    Html,
}

fn markup_flavor(name: &str) -> Option<Markup> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "md" | "markdown" => Some(Markup::Markdown),
        "html" | "htm" => Some(Markup::Html),
        _ => None,
    }
}

/// Rendered content of the preview pane.
pub enum PreviewSurface {
    Text {
        lines: Vec<Line<'static>>,
        truncated: bool,
    },
    Image(DynamicImage),
    Audio(Option<AudioDetails>),
    /// Video and embedded documents only get the info box plus an open hint.
    External(PreviewKind),
    Binary { len: u64 },
    Failed(String),
}

/// Byte budgets for building a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLimits {
    /// Text is read up to this many bytes and marked truncated past it.
    pub text_bytes: usize,
    /// Larger images are refused before any read.
    pub image_bytes: u64,
}

/// A file shown in the preview pane.
pub struct Preview {
    pub id: EntryId,
    pub snapshot: FileSnapshot,
    pub category: FileCategory,
    pub surface: PreviewSurface,
}

/// Build the preview for a listed file.
pub fn load_preview(
    host: &dyn StorageHost,
    entry: &Entry,
    limits: PreviewLimits,
) -> Result<Preview, FsError> {
    let snapshot = match &entry.snapshot {
        Some(snapshot) => snapshot.clone(),
        None => host.snapshot(&entry.handle)?,
    };
    let category = entry.category.unwrap_or(FileCategory::Other);
    let kind = PreviewKind::for_entry(category, entry.name());

    let surface = match kind {
        PreviewKind::PlainText | PreviewKind::Markup => {
            let bytes = host.read_head(&entry.handle, limits.text_bytes)?;
            let truncated = (bytes.len() as u64) < snapshot.byte_size;
            text_surface(bytes, truncated, markup_flavor(entry.name()), snapshot.byte_size)
        }
        PreviewKind::Image if snapshot.byte_size > limits.image_bytes => {
            warn!(entry = entry.name(), size = snapshot.byte_size, "image over preview limit");
            PreviewSurface::Failed(format!(
                "image is too large to preview ({})",
                format_bytes(snapshot.byte_size)
            ))
        }
        PreviewKind::Image => {
            let bytes = host.read_file(&entry.handle)?;
            match image::load_from_memory(&bytes) {
                Ok(img) => PreviewSurface::Image(img),
                Err(err) => {
                    warn!(entry = entry.name(), %err, "image decode failed");
                    PreviewSurface::Failed(format!("cannot decode image: {err}"))
                }
            }
        }
        PreviewKind::Audio => match metadata::load_audio_details(entry.handle.path()) {
            Ok(details) => PreviewSurface::Audio(Some(details)),
            Err(err) => {
                warn!(entry = entry.name(), %err, "audio tags unreadable");
                PreviewSurface::Audio(None)
            }
        },
        PreviewKind::Video | PreviewKind::Document => PreviewSurface::External(kind),
    };

    Ok(Preview {
        id: entry.id(),
        snapshot,
        category,
        surface,
    })
}

fn text_surface(
    mut bytes: Vec<u8>,
    truncated: bool,
    flavor: Option<Markup>,
    len: u64,
) -> PreviewSurface {
    // A cut may land inside a multi-byte character.
    if truncated {
        if let Err(err) = std::str::from_utf8(&bytes) {
            if err.error_len().is_none() {
                bytes.truncate(err.valid_up_to());
            }
        }
    }
    let Ok(text) = String::from_utf8(bytes) else {
        return PreviewSurface::Binary { len };
    };
    let lines = match flavor {
        Some(Markup::Markdown) => markup::render_markdown(&text),
        Some(Markup::Html) => markup::render_html(&text),
        None => text.lines().map(|l| Line::from(l.to_string())).collect(),
    };
    PreviewSurface::Text { lines, truncated }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::fs::{DirectoryHandle, LocalHost, list_entries};

    fn limits(text_bytes: usize) -> PreviewLimits {
        PreviewLimits {
            text_bytes,
            image_bytes: 1024,
        }
    }

    fn entry(tmp: &TempDir, name: &str) -> Entry {
        list_entries(&LocalHost::new(), &DirectoryHandle::new(tmp.path()))
            .unwrap()
            .into_iter()
            .find(|e| e.name() == name)
            .unwrap()
    }

    #[test]
    fn kinds_follow_category_and_extension() {
        assert_eq!(PreviewKind::for_entry(FileCategory::Text, "a.md"), PreviewKind::Markup);
        assert_eq!(PreviewKind::for_entry(FileCategory::Text, "a.HTM"), PreviewKind::Markup);
        assert_eq!(PreviewKind::for_entry(FileCategory::Text, "a.rs"), PreviewKind::PlainText);
        assert_eq!(PreviewKind::for_entry(FileCategory::Pdf, "a.pdf"), PreviewKind::Document);
        assert_eq!(PreviewKind::for_entry(FileCategory::Other, "a.bin"), PreviewKind::PlainText);
    }

    #[test]
    fn text_is_read_up_to_the_limit() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("log.txt"), "one\ntwo\nthree\n").unwrap();
        let preview =
            load_preview(&LocalHost::new(), &entry(&tmp, "log.txt"), limits(8)).unwrap();
        match preview.surface {
            PreviewSurface::Text { lines, truncated } => {
                assert!(truncated);
                assert_eq!(lines.len(), 2);
            }
            _ => panic!("expected text surface"),
        }
    }

    #[test]
    fn non_utf8_content_is_binary() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("blob.dat"), [0x80, 0x81, 0xfe, 0xff]).unwrap();
        let preview =
            load_preview(&LocalHost::new(), &entry(&tmp, "blob.dat"), limits(1024)).unwrap();
        assert!(matches!(preview.surface, PreviewSurface::Binary { len: 4 }));
    }

    #[test]
    fn undecodable_image_fails_softly() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("fake.png"), "not a png").unwrap();
        let preview =
            load_preview(&LocalHost::new(), &entry(&tmp, "fake.png"), limits(1024)).unwrap();
        assert_eq!(preview.category, FileCategory::Image);
        assert!(matches!(preview.surface, PreviewSurface::Failed(_)));
    }

    #[test]
    fn oversized_image_is_refused_unread() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("huge.png"), vec![0u8; 4096]).unwrap();
        let e = entry(&tmp, "huge.png");
        fs::remove_file(tmp.path().join("huge.png")).unwrap();
        // Refused from the listed snapshot alone.
        let preview = load_preview(&LocalHost::new(), &e, limits(1024)).unwrap();
        match preview.surface {
            PreviewSurface::Failed(reason) => assert!(reason.contains("too large")),
            _ => panic!("expected failed surface"),
        }
    }

    #[test]
    fn vanished_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("gone.txt"), "x").unwrap();
        let e = entry(&tmp, "gone.txt");
        fs::remove_file(tmp.path().join("gone.txt")).unwrap();
        assert!(matches!(
            load_preview(&LocalHost::new(), &e, limits(1024)),
            Err(FsError::NotFound(_))
        ));
    }
}
