//! The observable half of an engine: state, play intent, repeat mode, and
//! the events each change produces. Kept free of audio types so transitions
//! can be checked without an output device.

use super::types::{EngineEvent, EngineState, RepeatMode};

/// What to do after looking at a possibly drained sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainAction {
    Keep,
    /// Repeat-one: rebuild the item and carry on playing.
    Restart,
    /// Report the end of the item.
    End,
}

#[derive(Debug, Clone)]
pub struct Transport {
    state: EngineState,
    play_when_ready: bool,
    loaded: bool,
    playing: bool,
    repeat: RepeatMode,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            state: EngineState::Idle,
            play_when_ready: false,
            loaded: false,
            playing: false,
            repeat: RepeatMode::Off,
        }
    }
}

impl Transport {
    pub fn play_when_ready(&self) -> bool {
        self.play_when_ready
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    fn set_state(&mut self, state: EngineState, events: &mut Vec<EngineEvent>) {
        if self.state != state {
            self.state = state;
            events.push(EngineEvent::StateChanged(state));
        }
    }

    /// "Actually playing" is intent plus a ready, loaded item.
    fn refresh_playing(&mut self, events: &mut Vec<EngineEvent>) {
        let now = self.play_when_ready && self.state == EngineState::Ready && self.loaded;
        if now != self.playing {
            self.playing = now;
            events.push(EngineEvent::IsPlayingChanged(now));
        }
    }

    /// The sink went away: after a new item is set, a stop, or a clear.
    pub fn unload(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.loaded = false;
        self.set_state(EngineState::Idle, &mut events);
        self.refresh_playing(&mut events);
        events
    }

    /// A sink for the current item is ready. Silent when it already was, as
    /// on a repeat-one restart.
    pub fn load(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.loaded = true;
        self.set_state(EngineState::Ready, &mut events);
        self.refresh_playing(&mut events);
        events
    }

    pub fn set_play_when_ready(&mut self, on: bool) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.play_when_ready = on;
        self.refresh_playing(&mut events);
        events
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) -> Vec<EngineEvent> {
        if self.repeat == mode {
            return Vec::new();
        }
        self.repeat = mode;
        vec![EngineEvent::RepeatModeChanged(mode)]
    }

    /// Decide what a drained sink means. Only an item that was meant to be
    /// playing can end; a paused or unloaded one is left alone.
    pub fn on_drained(&self, sink_empty: bool) -> DrainAction {
        let finished = sink_empty && self.state == EngineState::Ready && self.play_when_ready;
        match (finished, self.repeat) {
            (false, _) => DrainAction::Keep,
            (true, RepeatMode::One) => DrainAction::Restart,
            (true, RepeatMode::Off) => DrainAction::End,
        }
    }

    /// The item played to its end and its sink is released.
    pub fn end(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.loaded = false;
        self.set_state(EngineState::Ended, &mut events);
        self.refresh_playing(&mut events);
        events
    }
}
