//! Playback engine: the capability contract the player core drives, and the
//! `rodio` implementation used by the binary.

mod player;
mod sink;
pub(crate) mod transport;
mod types;

#[cfg(test)]
pub mod scripted;

pub use player::RodioEngine;
pub use types::*;
