use crate::library::Track;

/// Point-in-time view of the player as shown by the UI.
///
/// `position_ms` may run past `duration_ms` for a moment after a track change;
/// readers clamp.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaybackSnapshot {
    pub now_playing: Option<Track>,
    pub is_playing: bool,
    pub duration_ms: i64,
    pub position_ms: i64,
}

impl PlaybackSnapshot {
    /// Nothing loaded.
    pub fn idle() -> Self {
        Self::default()
    }

    /// What we show right after asking the engine to play `track`, before it reports a duration.
    pub fn loading(track: Track) -> Self {
        Self {
            now_playing: Some(track),
            is_playing: true,
            duration_ms: 0,
            position_ms: 0,
        }
    }

    /// Fraction of the track played, for display.
    pub fn progress(&self) -> f64 {
        display_fraction(self.position_ms, self.duration_ms)
    }
}

/// Engines report negative values while they are not prepared; the UI sees zero.
pub fn sanitize_ms(raw: i64) -> i64 {
    raw.max(0)
}

/// `position / duration` clamped to `[0, 1]`; an unknown (zero) duration shows no progress.
pub fn display_fraction(position_ms: i64, duration_ms: i64) -> f64 {
    if duration_ms <= 0 {
        return 0.0;
    }
    position_ms.clamp(0, duration_ms) as f64 / duration_ms as f64
}

/// `m:ss`, with `0:00` for anything not positive.
pub fn format_elapsed(ms: i64) -> String {
    if ms <= 0 {
        return "0:00".to_string();
    }
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// `-m:ss` left until the end, never negative.
pub fn format_remaining(position_ms: i64, duration_ms: i64) -> String {
    let remain = (duration_ms - position_ms).max(0);
    let total_secs = remain / 1000;
    format!("-{}:{:02}", total_secs / 60, total_secs % 60)
}
