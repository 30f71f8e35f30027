use std::time::{Duration, Instant};

/// Cosmetic flash + wave played when the center of the ring is tapped.
///
/// A new tap restarts the animation instead of queueing another one.
#[derive(Debug, Clone)]
pub struct CenterPulse {
    flash: Duration,
    wave: Duration,
    started: Option<Instant>,
}

fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

fn progress(started: Instant, now: Instant, length: Duration) -> f64 {
    if length.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(started).as_secs_f64();
    (elapsed / length.as_secs_f64()).min(1.0)
}

impl CenterPulse {
    pub fn new(flash: Duration, wave: Duration) -> Self {
        Self {
            flash,
            wave,
            started: None,
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Overlay opacity: 1 at the tap, fading to 0.
    pub fn flash_alpha(&self, now: Instant) -> f64 {
        match self.started {
            Some(s) => 1.0 - ease_out(progress(s, now, self.flash)),
            None => 0.0,
        }
    }

    /// Wave phase in `[0, 1]`; 1 once finished or never started.
    pub fn wave_phase(&self, now: Instant) -> f64 {
        match self.started {
            Some(s) => ease_out(progress(s, now, self.wave)),
            None => 1.0,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|s| now.saturating_duration_since(s) < self.flash.max(self.wave))
    }
}
