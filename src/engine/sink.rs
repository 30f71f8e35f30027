//! Utilities for creating `rodio` sinks from file locators.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` together with the item's duration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::EngineError;

pub(super) struct PreparedItem {
    pub sink: Sink,
    pub duration: Option<Duration>,
}

/// Create a paused `Sink` for the file at `path`.
pub(super) fn open_paused(stream: &OutputStream, path: &Path) -> Result<PreparedItem, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    // VBR MP3s often have no decoder-side length; the tag reader estimates it.
    let duration = source.total_duration().or_else(|| probe_duration(path));

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(PreparedItem { sink, duration })
}

fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}
