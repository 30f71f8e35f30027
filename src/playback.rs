//! Playback state: the snapshot the UI reads, the synchronizer that keeps it
//! in step with the engine, and the timer that paces the position poll.

mod poll;
mod snapshot;
mod sync;

pub use poll::PollTimer;
pub use snapshot::*;
pub use sync::Synchronizer;
