//! Engine capability contract and the small types around it.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

use thiserror::Error;

use crate::library::Locator;

/// Value reported by `current_position_ms`/`duration_ms` when the engine does not know.
pub const TIME_UNSET: i64 = -1;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    /// Repeat the current item when it ends.
    One,
}

impl RepeatMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Off => Self::One,
            Self::One => Self::Off,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing prepared.
    Idle,
    Ready,
    /// The item played to its end.
    Ended,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    IsPlayingChanged(bool),
    StateChanged(EngineState),
    RepeatModeChanged(RepeatMode),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output available: {0}")]
    Output(String),
    #[error("nothing to prepare: no item set")]
    NoItem,
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// What the player core needs from an audio engine.
///
/// Reads are cheap and may report [`TIME_UNSET`] (or any negative value)
/// while the engine is not prepared. State changes are delivered to
/// registered listeners; engines that detect changes lazily do so in
/// [`PlaybackEngine::dispatch_pending`].
pub trait PlaybackEngine {
    /// Replace the current item. Takes effect on the next `prepare`.
    fn set_item(&mut self, locator: &Locator);
    fn prepare(&mut self) -> Result<(), EngineError>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop playback and release the prepared item; the item itself stays set.
    fn stop(&mut self);
    fn clear_items(&mut self);
    fn seek_to(&mut self, position_ms: u64);
    fn current_position_ms(&self) -> i64;
    fn duration_ms(&self) -> i64;
    fn repeat_mode(&self) -> RepeatMode;
    fn set_repeat_mode(&mut self, mode: RepeatMode);
    fn add_listener(&mut self, tx: Sender<EngineEvent>) -> ListenerId;
    fn remove_listener(&mut self, id: ListenerId);

    /// Deliver state transitions noticed since the last call.
    fn dispatch_pending(&mut self) {}
}

/// Registry of listener channels. Listeners whose receiver is gone are dropped on the next emit.
#[derive(Debug, Default)]
pub struct Listeners {
    next_id: u64,
    senders: Vec<(ListenerId, Sender<EngineEvent>)>,
}

impl Listeners {
    pub fn add(&mut self, tx: Sender<EngineEvent>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.senders.push((id, tx));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.senders.len();
        self.senders.retain(|(i, _)| *i != id);
        self.senders.len() != before
    }

    pub fn emit(&mut self, event: EngineEvent) {
        self.senders.retain(|(_, tx)| tx.send(event).is_ok());
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }
}
