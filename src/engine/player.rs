use std::sync::mpsc::Sender;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder};
use tracing::{debug, warn};

use crate::library::Locator;

use super::sink::{PreparedItem, open_paused};
use super::transport::{DrainAction, Transport};
use super::types::{
    EngineError, EngineEvent, ListenerId, Listeners, PlaybackEngine, RepeatMode, TIME_UNSET,
};

/// `PlaybackEngine` on top of a `rodio` output stream.
///
/// rodio has no end-of-stream callback, so the end of an item is noticed in
/// `dispatch_pending` by looking at the sink. State and events live in a
/// [`Transport`]; this type only keeps the sink in line with it.
pub struct RodioEngine {
    stream: OutputStream,
    item: Option<Locator>,
    prepared: Option<PreparedItem>,
    transport: Transport,
    listeners: Listeners,
}

impl RodioEngine {
    pub fn new() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which garbles the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            item: None,
            prepared: None,
            transport: Transport::default(),
            listeners: Listeners::default(),
        })
    }

    fn emit(&mut self, events: Vec<EngineEvent>) {
        for event in events {
            self.listeners.emit(event);
        }
    }

    /// Drop the sink and report the unload.
    fn unload(&mut self) {
        self.release();
        let events = self.transport.unload();
        self.emit(events);
    }

    fn finish_item(&mut self) {
        self.release();
        let events = self.transport.end();
        self.emit(events);
    }

    fn release(&mut self) {
        if let Some(p) = self.prepared.take() {
            p.sink.stop();
        }
    }

    /// Rebuild the sink for the current item; `prepare` resumes it since `play_when_ready` is set.
    fn restart_item(&mut self) -> Result<(), EngineError> {
        self.release();
        self.prepare()
    }
}

impl PlaybackEngine for RodioEngine {
    fn set_item(&mut self, locator: &Locator) {
        self.item = Some(locator.clone());
        self.unload();
    }

    fn prepare(&mut self) -> Result<(), EngineError> {
        let Some(item) = self.item.clone() else {
            return Err(EngineError::NoItem);
        };
        let path = item.to_path();
        self.release();

        let prepared = open_paused(&self.stream, &path)?;
        debug!(item = %item, duration = ?prepared.duration, "prepared item");
        if self.transport.play_when_ready() {
            prepared.sink.play();
        }
        self.prepared = Some(prepared);
        let events = self.transport.load();
        self.emit(events);
        Ok(())
    }

    fn play(&mut self) {
        if let Some(p) = &self.prepared {
            p.sink.play();
        }
        let events = self.transport.set_play_when_ready(true);
        self.emit(events);
    }

    fn pause(&mut self) {
        if let Some(p) = &self.prepared {
            p.sink.pause();
        }
        let events = self.transport.set_play_when_ready(false);
        self.emit(events);
    }

    fn stop(&mut self) {
        self.unload();
    }

    fn clear_items(&mut self) {
        self.item = None;
        self.unload();
    }

    fn seek_to(&mut self, position_ms: u64) {
        let Some(p) = &self.prepared else {
            return;
        };
        if let Err(e) = p.sink.try_seek(Duration::from_millis(position_ms)) {
            warn!(error = %e, position_ms, "seek rejected by decoder");
        }
    }

    fn current_position_ms(&self) -> i64 {
        self.prepared
            .as_ref()
            .map_or(0, |p| i64::try_from(p.sink.get_pos().as_millis()).unwrap_or(i64::MAX))
    }

    fn duration_ms(&self) -> i64 {
        self.prepared
            .as_ref()
            .and_then(|p| p.duration)
            .map_or(TIME_UNSET, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }

    fn repeat_mode(&self) -> RepeatMode {
        self.transport.repeat()
    }

    fn set_repeat_mode(&mut self, mode: RepeatMode) {
        let events = self.transport.set_repeat(mode);
        self.emit(events);
    }

    fn add_listener(&mut self, tx: Sender<EngineEvent>) -> ListenerId {
        self.listeners.add(tx)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        if self.listeners.remove(id) {
            debug!(remaining = self.listeners.len(), "listener removed");
        }
    }

    fn dispatch_pending(&mut self) {
        let sink_empty = self.prepared.as_ref().is_some_and(|p| p.sink.empty());
        match self.transport.on_drained(sink_empty) {
            DrainAction::Keep => {}
            DrainAction::Restart => {
                if let Err(e) = self.restart_item() {
                    warn!(error = %e, "cannot restart item for repeat-one");
                    self.finish_item();
                }
            }
            DrainAction::End => self.finish_item(),
        }
    }
}
