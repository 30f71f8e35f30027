use crate::playback::display_fraction;

use super::geometry::clamp01;

/// Where the seek ring is pointing, which may differ from where playback is.
///
/// While a gesture is running the preview belongs to the user; otherwise it
/// follows every published position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeekUiState {
    pub is_dragging: bool,
    pub preview_ms: i64,
}

/// Duration to scale previews by. Zero would pin every preview to 0, so an
/// unknown duration counts as one millisecond.
pub fn safe_duration(duration_ms: i64) -> i64 {
    if duration_ms > 0 { duration_ms } else { 1 }
}

impl SeekUiState {
    pub fn follow(&mut self, position_ms: i64) {
        if !self.is_dragging {
            self.preview_ms = position_ms;
        }
    }

    pub fn preview(&mut self, progress: f64, duration_ms: i64) {
        self.is_dragging = true;
        self.preview_ms = (clamp01(progress) * safe_duration(duration_ms) as f64) as i64;
    }

    /// End the gesture; returns the position to seek to.
    pub fn finish(&mut self) -> i64 {
        self.is_dragging = false;
        self.preview_ms
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn fraction(&self, duration_ms: i64) -> f64 {
        display_fraction(self.preview_ms, duration_ms)
    }
}
