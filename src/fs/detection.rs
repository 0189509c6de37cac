// src/fs/detection.rs
//! File type detection using magic numbers and extension-based fallback.

use std::{fmt, path::Path};

use infer::Infer;
use mime_guess::MimeGuess;

/// High-level file categories. Every file maps to exactly one.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum FileCategory {
    Image,
    Pdf,
    Audio,
    Video,
    Text,
    Other,
}

impl FileCategory {
    pub const ALL: [FileCategory; 6] = [
        FileCategory::Image,
        FileCategory::Pdf,
        FileCategory::Audio,
        FileCategory::Video,
        FileCategory::Text,
        FileCategory::Other,
    ];

    /// Category from a MIME type, `None` when the type says nothing useful.
    fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        let essence = mime.split(';').next().unwrap_or_default();
        let (top, sub) = essence.split_once('/')?;
        match (top, sub) {
            ("image", _) => Some(FileCategory::Image),
            ("audio", _) => Some(FileCategory::Audio),
            ("video", _) => Some(FileCategory::Video),
            ("text", _) => Some(FileCategory::Text),
            ("application", "pdf") => Some(FileCategory::Pdf),
            (
                "application",
                "json" | "xml" | "javascript" | "x-javascript" | "toml" | "x-sh" | "x-yaml"
                | "yaml" | "xhtml+xml",
            ) => Some(FileCategory::Text),
            _ => None,
        }
    }

    fn from_extension(name: &str) -> Self {
        let ext = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
            _ => return FileCategory::Other,
        };
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "svg" | "ico" | "tif" | "tiff"
            | "avif" => FileCategory::Image,
            "pdf" => FileCategory::Pdf,
            "mp3" | "wav" | "ogg" | "oga" | "flac" | "m4a" | "aac" | "opus" => FileCategory::Audio,
            "mp4" | "m4v" | "webm" | "mkv" | "mov" | "avi" | "ogv" => FileCategory::Video,
            "txt" | "md" | "markdown" | "html" | "htm" | "css" | "js" | "ts" | "json" | "xml"
            | "csv" | "log" | "rs" | "py" | "toml" | "yaml" | "yml" | "ini" | "sh" | "c" | "h"
            | "cpp" | "java" | "go" => FileCategory::Text,
            _ => FileCategory::Other,
        }
    }

    /// Short lowercase label, also used by the type-filter cycle.
    pub fn label(self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Pdf => "pdf",
            FileCategory::Audio => "audio",
            FileCategory::Video => "video",
            FileCategory::Text => "text",
            FileCategory::Other => "other",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a file: declared MIME type first, filename extension as fallback.
pub fn classify(mime_hint: Option<&str>, name: &str) -> FileCategory {
    mime_hint
        .and_then(FileCategory::from_mime)
        .unwrap_or_else(|| FileCategory::from_extension(name))
}

/// Detect the MIME type for a file on disk.
pub fn detect_mime(path: &Path) -> Option<String> {
    // 1. Magic-number sniffing
    if let Ok(Some(kind)) = Infer::new().get_from_path(path) {
        return Some(kind.mime_type().to_string());
    }

    // 2. Extension lookup; unknown extensions stay undeclared
    MimeGuess::from_path(path).first_raw().map(str::to_string)
}

/// Human-readable byte count: `B`, then one-decimal `KB` and `MB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let kb = bytes as f64 / 1024.0;
    if kb < 1024.0 {
        return format!("{kb:.1} KB");
    }
    format!("{:.1} MB", kb / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_wins_over_extension() {
        assert_eq!(classify(Some("image/png"), "notes.txt"), FileCategory::Image);
        assert_eq!(classify(Some("application/pdf"), "x.bin"), FileCategory::Pdf);
        assert_eq!(classify(Some("text/html; charset=utf-8"), "a"), FileCategory::Text);
    }

    #[test]
    fn extension_decides_when_mime_is_missing_or_opaque() {
        assert_eq!(classify(None, "photo.JPG"), FileCategory::Image);
        assert_eq!(classify(Some("application/octet-stream"), "song.flac"), FileCategory::Audio);
        assert_eq!(classify(Some(""), "clip.webm"), FileCategory::Video);
        assert_eq!(classify(None, "README.md"), FileCategory::Text);
    }

    #[test]
    fn classification_is_total() {
        for name in ["", ".", ".bashrc", "noext", "archive.zip", "weird.", "ünï.cödé"] {
            let cat = classify(None, name);
            assert!(FileCategory::ALL.contains(&cat));
        }
        assert_eq!(classify(None, ".bashrc"), FileCategory::Other);
        assert_eq!(classify(Some("garbage"), "archive.zip"), FileCategory::Other);
    }

    #[test]
    fn bytes_are_formatted_like_the_info_box() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
