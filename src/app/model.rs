//! Application model types: `App`, `Screen` and the commands the model hands
//! back to the runtime.
//!
//! The model never talks to the engine. It holds the library view, the
//! navigation stack, the latest published playback snapshot and the local
//! seek preview, and turns seek-ring gestures into `Command`s.

use crate::config::SeekSettings;
use crate::library::{Library, LibraryError, Track, folder_label};
use crate::playback::PlaybackSnapshot;
use crate::seek::{ArcSeekControl, SeekEvent, SeekUiState};

/// A page of the UI. The navigation stack always starts at `Folders`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Folders,
    Tracks { folder: String },
    NowPlaying,
}

/// Something the runtime has to forward to the synchronizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    CommitSeek(i64),
    TogglePlayback,
}

/// The main application model.
pub struct App {
    library: Result<Library, LibraryError>,
    stack: Vec<Screen>,

    pub folder_selected: usize,
    pub track_selected: usize,

    pub search_mode: bool,
    pub search_query: String,

    playback: PlaybackSnapshot,
    pub looping: bool,

    seek: SeekUiState,
    seek_control: ArcSeekControl,

    status: Option<String>,
}

impl App {
    pub fn new(library: Result<Library, LibraryError>, seek_settings: &SeekSettings) -> Self {
        Self {
            library,
            stack: vec![Screen::Folders],
            folder_selected: 0,
            track_selected: 0,
            search_mode: false,
            search_query: String::new(),
            playback: PlaybackSnapshot::idle(),
            looping: false,
            seek: SeekUiState::default(),
            seek_control: ArcSeekControl::from_settings(seek_settings),
            status: None,
        }
    }

    pub fn library(&self) -> Result<&Library, &LibraryError> {
        self.library.as_ref()
    }

    /// Swap in a freshly loaded library (e.g. after a retry) and go back to the folder list.
    pub fn set_library(&mut self, library: Result<Library, LibraryError>) {
        self.library = library;
        self.stack.truncate(1);
        self.folder_selected = 0;
        self.clear_search();
    }

    pub fn screen(&self) -> &Screen {
        self.stack.last().unwrap_or(&Screen::Folders)
    }

    /// The screen shown underneath the player.
    pub fn browse_screen(&self) -> &Screen {
        self.stack
            .iter()
            .rev()
            .find(|s| **s != Screen::NowPlaying)
            .unwrap_or(&Screen::Folders)
    }

    pub fn playback(&self) -> &PlaybackSnapshot {
        &self.playback
    }

    pub fn seek(&self) -> &SeekUiState {
        &self.seek
    }

    pub fn seek_control(&self) -> &ArcSeekControl {
        &self.seek_control
    }

    pub fn seek_control_mut(&mut self) -> &mut ArcSeekControl {
        &mut self.seek_control
    }

    /// Fraction of the track the seek ring should show.
    pub fn seek_fraction(&self) -> f64 {
        self.seek.fraction(self.playback.duration_ms)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn folders(&self) -> Vec<&str> {
        match &self.library {
            Ok(lib) => lib.folders(),
            Err(_) => Vec::new(),
        }
    }

    pub fn current_folder(&self) -> Option<&str> {
        match self.browse_screen() {
            Screen::Tracks { folder } => Some(folder),
            _ => None,
        }
    }

    /// Tracks of the open folder that match the search query.
    pub fn visible_tracks(&self) -> Vec<&Track> {
        match (&self.library, self.current_folder()) {
            (Ok(lib), Some(folder)) => lib.search(folder, &self.search_query),
            _ => Vec::new(),
        }
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.visible_tracks().get(self.track_selected).copied()
    }

    pub fn title(&self) -> String {
        match self.screen() {
            Screen::Folders => "Folders".to_string(),
            Screen::Tracks { folder } => folder_label(folder).to_string(),
            Screen::NowPlaying => "Player".to_string(),
        }
    }

    /// Move the cursor of the current list down, wrapping to the top.
    pub fn next(&mut self) {
        match self.screen() {
            Screen::Folders => {
                let len = self.folders().len();
                if len > 0 {
                    self.folder_selected = (self.folder_selected + 1) % len;
                }
            }
            Screen::Tracks { .. } => {
                let len = self.visible_tracks().len();
                if len > 0 {
                    self.track_selected = (self.track_selected + 1) % len;
                }
            }
            Screen::NowPlaying => {}
        }
    }

    /// Move the cursor of the current list up, wrapping to the bottom.
    pub fn prev(&mut self) {
        match self.screen() {
            Screen::Folders => {
                let len = self.folders().len();
                if len > 0 {
                    self.folder_selected = (self.folder_selected + len - 1) % len;
                }
            }
            Screen::Tracks { .. } => {
                let len = self.visible_tracks().len();
                if len > 0 {
                    self.track_selected = (self.track_selected + len - 1) % len;
                }
            }
            Screen::NowPlaying => {}
        }
    }

    /// Open the folder under the cursor. Returns false when there is none.
    pub fn open_selected_folder(&mut self) -> bool {
        let Some(folder) = self.folders().get(self.folder_selected).map(|f| f.to_string()) else {
            return false;
        };
        self.clear_search();
        self.stack.push(Screen::Tracks { folder });
        true
    }

    /// Show the player. Only possible while something is loaded.
    pub fn open_now_playing(&mut self) -> bool {
        if self.playback.now_playing.is_none() {
            return false;
        }
        if *self.screen() != Screen::NowPlaying {
            self.stack.push(Screen::NowPlaying);
        }
        true
    }

    /// Go back one level. Search mode is left first; leaving a folder drops its query.
    pub fn back(&mut self) {
        if self.search_mode {
            self.search_mode = false;
            return;
        }
        if self.stack.len() <= 1 {
            return;
        }
        match self.stack.pop() {
            Some(Screen::NowPlaying) => self.cancel_seek(),
            Some(Screen::Tracks { .. }) => self.clear_search(),
            _ => {}
        }
    }

    /// Abandon any seek gesture without committing; the preview snaps back to playback.
    pub fn cancel_seek(&mut self) {
        self.seek_control.cancel();
        self.seek.reset();
        self.seek.follow(self.playback.position_ms);
    }

    pub fn enter_search(&mut self) {
        if matches!(self.screen(), Screen::Tracks { .. }) {
            self.search_mode = true;
        }
    }

    /// Keep the query but stop editing it.
    pub fn exit_search(&mut self) {
        self.search_mode = false;
    }

    pub fn clear_search(&mut self) {
        self.search_mode = false;
        self.search_query.clear();
        self.track_selected = 0;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.track_selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.track_selected = 0;
    }

    /// Take in a snapshot published by the synchronizer.
    ///
    /// The seek preview follows the position unless a gesture owns it, and
    /// starts over when the track changes. When playback ends the player
    /// screen closes itself.
    pub fn apply_snapshot(&mut self, snapshot: PlaybackSnapshot) {
        let track_changed = snapshot.now_playing != self.playback.now_playing;
        if track_changed {
            self.seek_control.cancel();
            self.seek.reset();
        }
        self.seek.follow(snapshot.position_ms);
        self.playback = snapshot;

        if self.playback.now_playing.is_none() && *self.screen() == Screen::NowPlaying {
            self.stack.pop();
            self.cancel_seek();
        }
    }

    /// Turn a seek-ring event into a preview update or a command for the runtime.
    pub fn on_seek_event(&mut self, event: SeekEvent) -> Option<Command> {
        match event {
            SeekEvent::Progress(p) => {
                self.seek.preview(p, self.playback.duration_ms);
                None
            }
            SeekEvent::Commit => Some(Command::CommitSeek(self.seek.finish())),
            SeekEvent::TogglePlayback => Some(Command::TogglePlayback),
        }
    }
}
