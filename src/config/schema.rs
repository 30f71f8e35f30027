use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/arcplay/config.toml` or `~/.config/arcplay/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ARCPLAY__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub seek: SeekSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the engine position/duration is polled while playback is observed (milliseconds).
    pub poll_interval_ms: u64,
    /// Distance jumped by the skip back / skip forward controls (milliseconds).
    pub skip_ms: u64,
    /// Whether repeat-one is switched on when the player starts.
    pub loop_on_start: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 250,
            skip_ms: 10_000,
            loop_on_start: false,
        }
    }
}

/// Geometry and gesture tuning for the seek ring.
///
/// Lengths are in ring units: one terminal column horizontally, half a row
/// vertically, so the ring renders round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekSettings {
    /// Where the arc begins, clockwise from "3 o'clock".
    pub start_angle_degrees: f64,
    /// Size of the open segment of the ring.
    pub gap_degrees: f64,
    pub stroke_width: f64,
    /// Accepted radial distance either side of the ring for a press to count.
    pub ring_tolerance: f64,
    /// Distance between the ring and the edge of the center (play/pause) area.
    pub center_inset: f64,
    /// Movement allowed before a press turns into a drag.
    pub touch_slop: f64,
    /// Center-tap flash fade duration (milliseconds).
    pub flash_ms: u64,
    /// Center-tap wave duration (milliseconds).
    pub wave_ms: u64,
}

impl Default for SeekSettings {
    fn default() -> Self {
        Self {
            start_angle_degrees: 125.0,
            gap_degrees: 70.0,
            stroke_width: 2.0,
            ring_tolerance: 3.0,
            center_inset: 6.0,
            touch_slop: 1.5,
            flash_ms: 260,
            wave_ms: 420,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as MP3 (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Probe the content of files that have no extension and keep the ones that are MPEG audio.
    pub sniff_content: bool,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Name used for files whose name cannot be represented as text.
    pub fallback_name: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into()],
            sniff_content: true,
            follow_links: true,
            include_hidden: false,
            fallback_name: "unknown.mp3".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ MP3 folders ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `arcplay=debug`.
    /// `ARCPLAY_LOG` overrides it.
    pub level: String,
    /// Log file path. Defaults to the XDG state directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
