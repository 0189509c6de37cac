// src/preview/player.rs
//! Audio playback for the preview pane.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Result;
use rodio::{Decoder, OutputStream, Sink};

/// Plays one file at a time; starting a new one stops the previous.
#[derive(Default)]
pub struct AudioPlayer {
    // Keep the stream alive or audio will stop immediately.
    _stream: Option<OutputStream>,
    sink: Option<Sink>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self, path: &Path) -> Result<()> {
        self.stop();

        let (stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;

        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file))?;
        sink.append(source);
        sink.play();

        self._stream = Some(stream);
        self.sink = Some(sink);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self._stream = None;
    }

    /// True while a track is queued and not yet finished.
    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }
}
