//! In-memory engine for tests: records every command and lets the test
//! dictate what position/duration reads return.

use std::sync::mpsc::Sender;

use crate::library::Locator;

use super::types::{
    EngineError, EngineEvent, EngineState, ListenerId, Listeners, PlaybackEngine, RepeatMode,
    TIME_UNSET,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetItem(Locator),
    Prepare,
    Play,
    Pause,
    Stop,
    ClearItems,
    SeekTo(u64),
    SetRepeatMode(RepeatMode),
}

#[derive(Debug)]
pub struct ScriptedEngine {
    pub commands: Vec<Command>,
    pub position_ms: i64,
    pub duration_ms: i64,
    pub item: Option<Locator>,
    pub fail_prepare: bool,
    pub repeat: RepeatMode,
    pub listeners: Listeners,
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            position_ms: TIME_UNSET,
            duration_ms: TIME_UNSET,
            item: None,
            fail_prepare: false,
            repeat: RepeatMode::Off,
            listeners: Listeners::default(),
        }
    }
}

impl ScriptedEngine {
    /// Push an event to every listener, as the real engine would on its own.
    pub fn emit(&mut self, event: EngineEvent) {
        self.listeners.emit(event);
    }

    pub fn finish_item(&mut self) {
        self.emit(EngineEvent::IsPlayingChanged(false));
        self.emit(EngineEvent::StateChanged(EngineState::Ended));
    }
}

impl PlaybackEngine for ScriptedEngine {
    fn set_item(&mut self, locator: &Locator) {
        self.item = Some(locator.clone());
        self.commands.push(Command::SetItem(locator.clone()));
    }

    fn prepare(&mut self) -> Result<(), EngineError> {
        self.commands.push(Command::Prepare);
        if self.item.is_none() {
            return Err(EngineError::NoItem);
        }
        if self.fail_prepare {
            return Err(EngineError::Decode {
                path: self.item.as_ref().map(Locator::to_path).unwrap_or_default(),
                reason: "scripted failure".into(),
            });
        }
        Ok(())
    }

    fn play(&mut self) {
        self.commands.push(Command::Play);
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    fn stop(&mut self) {
        self.commands.push(Command::Stop);
    }

    fn clear_items(&mut self) {
        self.item = None;
        self.commands.push(Command::ClearItems);
    }

    fn seek_to(&mut self, position_ms: u64) {
        self.commands.push(Command::SeekTo(position_ms));
    }

    fn current_position_ms(&self) -> i64 {
        self.position_ms
    }

    fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.commands.push(Command::SetRepeatMode(mode));
        if self.repeat != mode {
            self.repeat = mode;
            self.listeners.emit(EngineEvent::RepeatModeChanged(mode));
        }
    }

    fn add_listener(&mut self, tx: Sender<EngineEvent>) -> ListenerId {
        self.listeners.add(tx)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }
}
