use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{debug, info, warn};

use crate::app::{App, Command, Screen};
use crate::config;
use crate::engine::PlaybackEngine;
use crate::library::{Library, MediaIndex};
use crate::playback::PollTimer;
use crate::runtime::session::Session;
use crate::ui;

/// Longest wait for input while the poll timer is suspended.
const IDLE_WAIT: Duration = Duration::from_millis(500);
/// Redraw interval while the center pulse is animating.
const FRAME: Duration = Duration::from_millis(33);

/// Main terminal event loop: handles input, UI drawing and the position poll.
/// Returns `Ok(())` when shutdown is requested.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<E>,
    index: &dyn MediaIndex,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut timer = PollTimer::new(Duration::from_millis(settings.playback.poll_interval_ms));
    timer.resume(Instant::now());

    loop {
        session.sync.pump();
        let now = Instant::now();
        if timer.fire(now) {
            session.sync.tick();
        }
        session.sync_into(app);

        let mut ring = Rect::default();
        terminal.draw(|f| {
            ring = ui::ring_area(f.area());
            let (width, height) = ui::ring_extent(ring);
            app.seek_control_mut().resize(width, height);
            ui::draw(f, app, settings, now);
        })?;

        let mut wait = timer.time_until_due(now).unwrap_or(IDLE_WAIT);
        if app.seek_control().pulse().is_active(now) {
            wait = wait.min(FRAME);
        }

        if event::poll(wait)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, app, session, index) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, ring, app, session),
                Event::FocusLost => {
                    debug!("focus lost, polling suspended");
                    timer.suspend();
                    app.cancel_seek();
                }
                Event::FocusGained if !timer.is_running() => {
                    debug!(period = ?timer.period(), "focus gained, polling resumed");
                    timer.resume(Instant::now());
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn run_command<E: PlaybackEngine>(cmd: Command, session: &mut Session<E>) {
    match cmd {
        Command::CommitSeek(ms) => {
            session.sync.commit_seek(ms);
        }
        Command::TogglePlayback => session.sync.toggle_play_pause(),
    }
}

/// Load the track under the cursor and switch to the player.
fn play_selected<E: PlaybackEngine>(app: &mut App, session: &mut Session<E>) {
    let Some(track) = app.selected_track().cloned() else {
        return;
    };
    match session.sync.load_and_play(&track) {
        Ok(()) => {
            app.clear_status();
            session.sync_into(app);
            app.open_now_playing();
        }
        Err(e) => {
            session.sync_into(app);
            app.set_status(format!("Cannot play {}: {e}", track.name));
        }
    }
}

fn reload_library(app: &mut App, index: &dyn MediaIndex) {
    let library = Library::load(index);
    match &library {
        Ok(_) => info!("library reloaded"),
        Err(e) => warn!(error = %e, "library reload failed"),
    }
    app.set_library(library);
}

pub(super) fn handle_mouse_event<E: PlaybackEngine>(
    mouse: MouseEvent,
    ring: Rect,
    app: &mut App,
    session: &mut Session<E>,
) {
    if *app.screen() != Screen::NowPlaying {
        return;
    }
    let control = app.seek_control_mut();
    let event = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => ui::cell_to_ring(ring, mouse.column, mouse.row)
            .and_then(|at| control.pointer_down(at)),
        MouseEventKind::Drag(MouseButton::Left) => {
            control.pointer_move(ui::cell_to_ring_clamped(ring, mouse.column, mouse.row))
        }
        MouseEventKind::Up(MouseButton::Left) => {
            control.pointer_up(ui::cell_to_ring_clamped(ring, mouse.column, mouse.row))
        }
        _ => None,
    };

    if let Some(cmd) = event.and_then(|e| app.on_seek_event(e)) {
        run_command(cmd, session);
    }
}

/// Returns `true` when the app should quit.
pub(super) fn handle_key_event<E: PlaybackEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<E>,
    index: &dyn MediaIndex,
) -> bool {
    if app.search_mode {
        match key.code {
            KeyCode::Esc => app.exit_search(),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Down => app.next(),
            KeyCode::Up => app.prev(),
            KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => app.next(),
            KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => app.prev(),
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_search_char(c);
                }
            }
            KeyCode::Enter => {
                app.exit_search();
                play_selected(app, session);
            }
            _ => {}
        }
        return false;
    }

    let has_track = app.playback().now_playing.is_some();
    let skip_ms = settings.playback.skip_ms.min(i64::MAX as u64) as i64;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Esc | KeyCode::Backspace => app.back(),
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Enter => match app.screen() {
            Screen::Folders => {
                app.open_selected_folder();
            }
            Screen::Tracks { .. } => play_selected(app, session),
            Screen::NowPlaying => session.sync.toggle_play_pause(),
        },
        KeyCode::Char(' ') | KeyCode::Char('p') if has_track => session.sync.toggle_play_pause(),
        KeyCode::Char('s') if has_track => session.sync.stop(),
        KeyCode::Char('h') | KeyCode::Left if has_track => {
            session.sync.skip(-skip_ms);
        }
        KeyCode::Char('l') | KeyCode::Right if has_track => {
            session.sync.skip(skip_ms);
        }
        KeyCode::Char('r') => {
            session.sync.toggle_loop();
        }
        KeyCode::Char('n') => {
            if !app.open_now_playing() {
                app.set_status("Nothing is playing");
            }
        }
        KeyCode::Char('R') => reload_library(app, index),
        _ => {}
    }

    session.sync_into(app);
    false
}
