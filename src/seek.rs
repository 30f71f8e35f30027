//! The circular seek bar: ring geometry, the pointer gesture machine,
//! the local preview it drives, and the center-tap pulse.

mod feedback;
mod geometry;
mod gesture;
mod preview;

pub use feedback::CenterPulse;
pub use geometry::{ArcGeometry, ArcLayout, Point, clamp01, pointer_angle};
pub use gesture::{ArcSeekControl, GestureState, SeekControlConfig, SeekEvent};
pub use preview::{SeekUiState, safe_duration};

#[cfg(test)]
mod tests;
