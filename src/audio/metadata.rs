// src/audio/metadata.rs
//! Track metadata extraction using Lofty.

use std::path::Path;

use anyhow::Result;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;

/// What the status bar shows about the current track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Total track length in seconds.
    pub duration_secs: u64,
}

impl TrackMetadata {
    /// "Artist - Title", falling back to `fallback` (usually the file name).
    pub fn display_name(&self, fallback: &str) -> String {
        match (&self.artist, &self.title) {
            (Some(artist), Some(title)) => format!("{artist} - {title}"),
            (None, Some(title)) => title.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Load metadata for a file path. Safe to call from a background thread.
pub fn load_metadata(path: &Path) -> Result<TrackMetadata> {
    let tagged_file = Probe::open(path)?.read()?;

    let (title, artist) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
        .map(|tag| {
            (
                tag.title().map(|t| t.into_owned()),
                tag.artist().map(|a| a.into_owned()),
            )
        })
        .unwrap_or_default();

    Ok(TrackMetadata {
        title,
        artist,
        duration_secs: tagged_file.properties().duration().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_tags() {
        let mut meta = TrackMetadata::default();
        assert_eq!(meta.display_name("song.mp3"), "song.mp3");

        meta.title = Some("Aura".into());
        assert_eq!(meta.display_name("song.mp3"), "Aura");

        meta.artist = Some("Nobody".into());
        assert_eq!(meta.display_name("song.mp3"), "Nobody - Aura");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_metadata(Path::new("/definitely/not/here.flac")).is_err());
    }
}
