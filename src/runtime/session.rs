use std::sync::mpsc::Receiver;

use tracing::debug;

use crate::app::App;
use crate::engine::PlaybackEngine;
use crate::playback::{PlaybackSnapshot, Synchronizer};

/// The synchronizer plus the UI's subscription to it.
pub struct Session<E: PlaybackEngine> {
    pub sync: Synchronizer<E>,
    snapshots: Receiver<PlaybackSnapshot>,
}

impl<E: PlaybackEngine> Session<E> {
    /// Subscribe and attach to `engine` right away.
    pub fn new(engine: E) -> Self {
        let mut sync = Synchronizer::new(engine);
        let snapshots = sync.subscribe();
        sync.attach();
        Self { sync, snapshots }
    }

    /// Hand every snapshot published since the last call to `app`.
    pub fn sync_into(&self, app: &mut App) {
        for snapshot in self.snapshots.try_iter() {
            app.apply_snapshot(snapshot);
        }
        app.looping = self.sync.is_looping();
    }

    /// Stop observing the engine; dropping the session afterwards releases it.
    pub fn shutdown(&mut self) {
        if self.sync.is_attached() {
            debug!("detaching from engine");
            self.sync.detach();
        }
    }
}
