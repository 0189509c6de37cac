// src/preview/metadata.rs
//! Audio tag extraction for the preview pane using Lofty.

use std::path::Path;

use anyhow::Result;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::ItemKey;

/// Tags and stream properties of an audio file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioDetails {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Audio properties (bitrate, sample rate, channels).
    pub properties: Vec<(String, String)>,
    pub duration_secs: u64,
}

impl AudioDetails {
    /// Display lines, tags first.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (label, value) in [
            ("Title", &self.title),
            ("Artist", &self.artist),
            ("Album", &self.album),
        ] {
            if let Some(v) = value {
                lines.push(format!("{label}: {v}"));
            }
        }
        lines.push(format!(
            "Duration: {:02}:{:02}",
            self.duration_secs / 60,
            self.duration_secs % 60
        ));
        for (k, v) in &self.properties {
            lines.push(format!("{k}: {v}"));
        }
        lines
    }
}

/// Read the tags and properties of `path`.
pub fn load_audio_details(path: &Path) -> Result<AudioDetails> {
    let tagged_file = Probe::open(path)?.read()?;

    let tag = tagged_file.primary_tag();
    let text = |key: ItemKey| tag.and_then(|t| t.get_string(&key)).map(str::to_string);

    let props = tagged_file.properties();
    let mut properties = Vec::new();
    if let Some(b) = props.audio_bitrate() {
        properties.push(("Bitrate (kbps)".into(), b.to_string()));
    }
    if let Some(sr) = props.sample_rate() {
        properties.push(("Sample Rate (Hz)".into(), sr.to_string()));
    }
    if let Some(ch) = props.channels() {
        properties.push(("Channels".into(), ch.to_string()));
    }

    Ok(AudioDetails {
        title: text(ItemKey::TrackTitle),
        artist: text(ItemKey::TrackArtist),
        album: text(ItemKey::AlbumTitle),
        properties,
        duration_secs: props.duration().as_secs(),
    })
}
