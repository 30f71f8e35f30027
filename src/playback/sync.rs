use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, info, warn};

use crate::engine::{EngineError, EngineEvent, EngineState, ListenerId, PlaybackEngine, RepeatMode};
use crate::library::Track;

use super::snapshot::{PlaybackSnapshot, sanitize_ms};

/// Keeps a [`PlaybackSnapshot`] in step with the engine.
///
/// Position and duration are polled through [`Synchronizer::tick`]; play/pause
/// and end-of-track arrive as engine events and are applied as soon as they
/// are pumped. The synchronizer is the only thing that issues engine commands.
pub struct Synchronizer<E> {
    engine: E,
    snapshot: PlaybackSnapshot,
    looping: bool,
    subscribers: Vec<Sender<PlaybackSnapshot>>,
    listener: Option<(ListenerId, Receiver<EngineEvent>)>,
}

impl<E: PlaybackEngine> Synchronizer<E> {
    pub fn new(engine: E) -> Self {
        let looping = engine.repeat_mode() == RepeatMode::One;
        Self {
            engine,
            snapshot: PlaybackSnapshot::idle(),
            looping,
            subscribers: Vec::new(),
            listener: None,
        }
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    #[cfg(test)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Receive every snapshot published from now on.
    pub fn subscribe(&mut self) -> Receiver<PlaybackSnapshot> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Register with the engine for events. Idempotent.
    pub fn attach(&mut self) {
        if self.listener.is_none() {
            let (tx, rx) = mpsc::channel();
            let id = self.engine.add_listener(tx);
            self.listener = Some((id, rx));
        }
    }

    /// Stop listening to the engine. Playback itself is left alone.
    pub fn detach(&mut self) {
        if let Some((id, _)) = self.listener.take() {
            self.engine.remove_listener(id);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    fn publish(&mut self, next: PlaybackSnapshot) -> bool {
        if next == self.snapshot {
            return false;
        }
        debug!(
            playing = next.is_playing,
            position_ms = next.position_ms,
            duration_ms = next.duration_ms,
            "publish snapshot"
        );
        self.snapshot = next;
        let snapshot = &self.snapshot;
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
        true
    }

    /// Read position and duration and publish if either moved. Returns whether a snapshot went out.
    pub fn tick(&mut self) -> bool {
        let duration_ms = sanitize_ms(self.engine.duration_ms());
        let position_ms = sanitize_ms(self.engine.current_position_ms());

        if duration_ms == self.snapshot.duration_ms && position_ms == self.snapshot.position_ms {
            return false;
        }
        let next = PlaybackSnapshot {
            duration_ms,
            position_ms,
            ..self.snapshot.clone()
        };
        self.publish(next)
    }

    pub fn on_engine_event(&mut self, event: EngineEvent) {
        debug!(?event, "engine event");
        match event {
            EngineEvent::IsPlayingChanged(is_playing) => {
                let next = PlaybackSnapshot {
                    is_playing,
                    ..self.snapshot.clone()
                };
                self.publish(next);
            }
            EngineEvent::StateChanged(EngineState::Ended) => {
                self.publish(PlaybackSnapshot::idle());
                self.engine.clear_items();
            }
            EngineEvent::StateChanged(_) => {}
            EngineEvent::RepeatModeChanged(mode) => {
                self.looping = mode == RepeatMode::One;
            }
        }
    }

    /// Let the engine report lazily-detected changes, then apply every queued event.
    pub fn pump(&mut self) {
        self.engine.dispatch_pending();
        let pending: Vec<EngineEvent> = match &self.listener {
            Some((_, rx)) => rx.try_iter().collect(),
            None => Vec::new(),
        };
        for event in pending {
            self.on_engine_event(event);
        }
    }

    /// Send a finished seek gesture to the engine.
    ///
    /// Clamped to the last known duration; with no duration yet the seek goes
    /// through unbounded rather than being dropped.
    pub fn commit_seek(&mut self, position_ms: i64) -> u64 {
        let upper = if self.snapshot.duration_ms > 0 {
            self.snapshot.duration_ms
        } else {
            i64::MAX
        };
        let target = position_ms.clamp(0, upper) as u64;
        self.engine.seek_to(target);
        target
    }

    /// Replace whatever is loaded with `track` and start it.
    ///
    /// The snapshot is published optimistically (playing, zero duration) and
    /// corrected by the next tick once the engine knows the duration.
    pub fn load_and_play(&mut self, track: &Track) -> Result<(), EngineError> {
        // Apply anything the previous item still has queued (e.g. its end)
        // so it cannot clobber the new snapshot afterwards.
        self.pump();

        self.engine.stop();
        self.engine.clear_items();
        self.engine.set_item(&track.locator);
        if let Err(e) = self.engine.prepare() {
            warn!(track = %track.name, error = %e, "cannot prepare track");
            self.engine.clear_items();
            self.publish(PlaybackSnapshot::idle());
            return Err(e);
        }
        self.engine.play();

        info!(
            track = %track.name,
            folder = %track.folder_path,
            locator = track.locator.as_str(),
            "playing"
        );
        self.publish(PlaybackSnapshot::loading(track.clone()));
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        if self.snapshot.is_playing {
            self.engine.pause();
        } else {
            self.engine.play();
        }
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        self.engine.clear_items();
        self.publish(PlaybackSnapshot::idle());
    }

    /// Jump relative to the engine's current position; returns the target.
    pub fn skip(&mut self, delta_ms: i64) -> u64 {
        let current = sanitize_ms(self.engine.current_position_ms());
        let engine_duration = self.engine.duration_ms();
        let duration = if engine_duration > 0 {
            engine_duration
        } else {
            self.snapshot.duration_ms
        };
        let upper = if duration > 0 { duration } else { i64::MAX };

        let target = current.saturating_add(delta_ms).clamp(0, upper) as u64;
        self.engine.seek_to(target);
        target
    }

    /// Flip repeat-one on or off. Returns the new looping flag.
    pub fn toggle_loop(&mut self) -> bool {
        let mode = self.engine.repeat_mode().toggled();
        self.engine.set_repeat_mode(mode);
        self.looping = mode == RepeatMode::One;
        self.looping
    }
}
