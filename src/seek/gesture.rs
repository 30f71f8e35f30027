use std::time::{Duration, Instant};

use crate::config::SeekSettings;

use super::feedback::CenterPulse;
use super::geometry::{ArcGeometry, ArcLayout, Point};

/// What a pointer event on the ring asks the caller to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekEvent {
    /// Preview this fraction of the track. Not a seek yet.
    Progress(f64),
    /// The gesture finished; seek to the last previewed position.
    Commit,
    /// The center was tapped.
    TogglePlayback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    /// Pressed on the ring, still within slop of the press point.
    ArmedTap { origin: Point },
    Dragging,
    /// Pressed inside the center area.
    CenterPressed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekControlConfig {
    pub geometry: ArcGeometry,
    pub stroke_width: f64,
    pub ring_tolerance: f64,
    pub center_inset: f64,
    pub touch_slop: f64,
}

impl From<&SeekSettings> for SeekControlConfig {
    fn from(s: &SeekSettings) -> Self {
        Self {
            geometry: ArcGeometry::new(s.start_angle_degrees, s.gap_degrees),
            stroke_width: s.stroke_width,
            ring_tolerance: s.ring_tolerance,
            center_inset: s.center_inset,
            touch_slop: s.touch_slop,
        }
    }
}

/// Pointer state machine for the circular seek bar.
///
/// Press on the ring previews immediately; moving past the slop turns it
/// into a drag that previews on every move; release commits. A press in the
/// center toggles playback when released inside the center. Presses anywhere
/// else are ignored.
#[derive(Debug, Clone)]
pub struct ArcSeekControl {
    config: SeekControlConfig,
    layout: ArcLayout,
    state: GestureState,
    pulse: CenterPulse,
}

impl ArcSeekControl {
    pub fn new(config: SeekControlConfig, layout: ArcLayout, pulse: CenterPulse) -> Self {
        Self {
            config,
            layout,
            state: GestureState::Idle,
            pulse,
        }
    }

    pub fn from_settings(settings: &SeekSettings) -> Self {
        let config = SeekControlConfig::from(settings);
        Self::new(
            config,
            ArcLayout::fit(0.0, 0.0, config.stroke_width),
            CenterPulse::new(
                Duration::from_millis(settings.flash_ms),
                Duration::from_millis(settings.wave_ms),
            ),
        )
    }

    pub fn geometry(&self) -> &ArcGeometry {
        &self.config.geometry
    }

    pub fn layout(&self) -> &ArcLayout {
        &self.layout
    }

    /// Re-fit the ring to a new widget size. An in-flight gesture keeps going.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.layout = ArcLayout::fit(width, height, self.config.stroke_width);
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_engaged(&self) -> bool {
        self.state != GestureState::Idle
    }

    pub fn pulse(&self) -> &CenterPulse {
        &self.pulse
    }

    pub fn center_hit_radius(&self) -> f64 {
        (self.layout.radius - self.config.center_inset).max(0.0)
    }

    pub fn in_center(&self, at: Point) -> bool {
        at.distance_to(self.layout.center) <= self.center_hit_radius()
    }

    pub fn on_ring(&self, at: Point) -> bool {
        let d = at.distance_to(self.layout.center);
        (d - self.layout.radius).abs() <= self.config.ring_tolerance && !self.in_center(at)
    }

    fn progress_at(&self, at: Point) -> f64 {
        self.config.geometry.angle_to_progress(at, self.layout.center)
    }

    pub fn pointer_down(&mut self, at: Point) -> Option<SeekEvent> {
        if self.is_engaged() {
            return None;
        }
        if self.in_center(at) {
            self.state = GestureState::CenterPressed;
            None
        } else if self.on_ring(at) {
            self.state = GestureState::ArmedTap { origin: at };
            Some(SeekEvent::Progress(self.progress_at(at)))
        } else {
            None
        }
    }

    pub fn pointer_move(&mut self, at: Point) -> Option<SeekEvent> {
        match self.state {
            GestureState::ArmedTap { origin } => {
                if origin.distance_to(at) > self.config.touch_slop {
                    self.state = GestureState::Dragging;
                    Some(SeekEvent::Progress(self.progress_at(at)))
                } else {
                    None
                }
            }
            GestureState::Dragging => Some(SeekEvent::Progress(self.progress_at(at))),
            GestureState::Idle | GestureState::CenterPressed => None,
        }
    }

    pub fn pointer_up(&mut self, at: Point) -> Option<SeekEvent> {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::ArmedTap { .. } | GestureState::Dragging => Some(SeekEvent::Commit),
            GestureState::CenterPressed if self.in_center(at) => {
                self.pulse.trigger(Instant::now());
                Some(SeekEvent::TogglePlayback)
            }
            _ => None,
        }
    }

    /// Abandon the gesture without committing anything.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}
