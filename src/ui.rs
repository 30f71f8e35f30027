//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`, plus the
//! mapping between terminal cells and seek-ring coordinates that the event
//! loop uses for mouse input.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::Line,
    widgets::{
        Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap,
        canvas::{Canvas, Circle, Context, Points},
    },
};
use std::{collections::BTreeMap, sync::LazyLock, time::Instant};

use crate::app::{App, Screen};
use crate::config::Settings;
use crate::library::{LibraryError, folder_label};
use crate::playback::{format_elapsed, format_remaining};
use crate::seek::{ArcSeekControl, GestureState, Point};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("enter", "open/play");
    map.insert("esc", "back");
    map.insert("/", "search");
    map.insert("space", "play/pause");
    map.insert("s", "stop");
    map.insert("n", "now playing");
    map.insert("r", "loop");
    map.insert("R", "reload library");
    map.insert("mouse", "drag ring to seek, click center to play/pause");
    map.insert("q", "quit");
    map
});

/// Render the controls help text for `screen`, incorporating the skip distance.
fn controls_text(screen: &Screen, skip_ms: u64) -> String {
    let order: &[&str] = match screen {
        Screen::Folders => &["j/k", "enter", "space", "s", "n", "R", "q"],
        Screen::Tracks { .. } => &["j/k", "enter", "/", "esc", "space", "s", "n", "q"],
        Screen::NowPlaying => &["space", "h/l", "r", "s", "mouse", "esc", "q"],
    };
    order
        .iter()
        .filter_map(|k| {
            if *k == "h/l" {
                Some(format!("[h/l] skip -/+{}s", skip_ms / 1000))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Areas of the top-level layout.
struct Chunks {
    header: Rect,
    status: Rect,
    body: Rect,
    footer: Rect,
}

fn chunks(area: Rect) -> Chunks {
    let c = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(area);
    Chunks {
        header: c[0],
        status: c[1],
        body: c[2],
        footer: c[3],
    }
}

/// Split the player body into title, times, ring and mode lines.
fn player_rows(body: Rect) -> [Rect; 4] {
    let c = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(body);
    [c[0], c[1], c[2], c[3]]
}

/// The cells the seek ring is drawn into, for a frame of size `area`.
pub fn ring_area(area: Rect) -> Rect {
    player_rows(chunks(area).body)[2]
}

/// Size of `ring` in ring units: one per column, two per row.
pub fn ring_extent(ring: Rect) -> (f64, f64) {
    (ring.width as f64, ring.height as f64 * 2.0)
}

/// Center of the terminal cell at `column`/`row` in ring units, or `None`
/// when the cell lies outside `ring`.
pub fn cell_to_ring(ring: Rect, column: u16, row: u16) -> Option<Point> {
    if column < ring.x || row < ring.y || column >= ring.right() || row >= ring.bottom() {
        return None;
    }
    Some(Point::new(
        (column - ring.x) as f64 + 0.5,
        ((row - ring.y) as f64 + 0.5) * 2.0,
    ))
}

/// Same as [`cell_to_ring`] but clamps cells outside `ring` onto its edge,
/// so a drag keeps tracking after leaving the ring area.
pub fn cell_to_ring_clamped(ring: Rect, column: u16, row: u16) -> Point {
    let col = column.clamp(ring.x, ring.right().saturating_sub(1).max(ring.x));
    let row = row.clamp(ring.y, ring.bottom().saturating_sub(1).max(ring.y));
    cell_to_ring(ring, col, row).unwrap_or_default()
}

/// Pick the slice of a `total`-long list to show in `height` rows, keeping the
/// selection centered when possible. Returns `(start, end, selected_in_window)`.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    let selected = selected.min(total.saturating_sub(1));
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, settings: &Settings, now: Instant) {
    let chunks = chunks(frame.area());

    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" arcplay · {} ", app.title()))
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks.header);

    frame.render_widget(
        Paragraph::new(status_text(app)).block(bordered(" status ")),
        chunks.status,
    );

    match app.screen() {
        Screen::Folders => draw_folders(frame, app, chunks.body),
        Screen::Tracks { .. } => draw_tracks(frame, app, chunks.body),
        Screen::NowPlaying => draw_player(frame, app, chunks.body, now),
    }

    let footer = Paragraph::new(controls_text(app.screen(), settings.playback.skip_ms))
        .block(bordered(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks.footer);
}

/// Mini-player line shown on every screen.
fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();
    let snap = app.playback();

    match &snap.now_playing {
        Some(track) => {
            parts.push(format!(
                "Playing: {} [{} / {}] {:.0}%",
                track.name,
                format_elapsed(snap.position_ms),
                format_remaining(snap.position_ms, snap.duration_ms),
                snap.progress() * 100.0
            ));
            parts.push(if snap.is_playing { "▶" } else { "⏸" }.to_string());
        }
        None => parts.push("Stopped".to_string()),
    }
    parts.push(format!("Loop: {}", if app.looping { "ON" } else { "OFF" }));
    if let Some(msg) = app.status() {
        parts.push(msg.to_string());
    }
    parts.join(" • ")
}

fn library_error_text(err: &LibraryError) -> String {
    match err {
        LibraryError::PermissionDenied(path) => format!(
            "No permission to read {}.\nGrant read access, then press R to retry.",
            path.display()
        ),
        LibraryError::EmptyResult => "MP3 not found.\nPress R to refresh.".to_string(),
        other => format!("{other}\nPress R to retry."),
    }
}

fn draw_folders(frame: &mut Frame, app: &App, area: Rect) {
    let lib = match app.library() {
        Ok(lib) => lib,
        Err(e) => {
            let p = Paragraph::new(library_error_text(e))
                .block(bordered(" library "))
                .wrap(Wrap { trim: true });
            frame.render_widget(p, area);
            return;
        }
    };

    let folders = lib.folders();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end, sel) = visible_window(folders.len(), height, app.folder_selected);

    let items: Vec<ListItem> = folders[start..end]
        .iter()
        .map(|f| {
            let n = lib.folder_len(f);
            ListItem::new(format!("{}  ({} file{})", folder_label(f), n, if n == 1 { "" } else { "s" }))
        })
        .collect();

    let title = format!(" folders ({} tracks) ", lib.tracks().len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !folders.is_empty() {
        state.select(Some(sel));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_tracks(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let search_title = if app.search_mode { " search (enter/esc to finish) " } else { " search " };
    let mut search = Paragraph::new(app.search_query.as_str()).block(bordered(search_title));
    if app.search_mode {
        search = search.yellow();
    }
    frame.render_widget(search, rows[0]);

    let tracks = app.visible_tracks();
    if tracks.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing found").block(bordered(" tracks ")),
            rows[1],
        );
        return;
    }

    let playing = app.playback().now_playing.as_ref();
    let height = rows[1].height.saturating_sub(2) as usize;
    let (start, end, sel) = visible_window(tracks.len(), height, app.track_selected);
    let items: Vec<ListItem> = tracks[start..end]
        .iter()
        .map(|t| {
            if Some(*t) == playing {
                ListItem::new(format!("♪ {}", t.name)).bold()
            } else {
                ListItem::new(t.name.as_str())
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(sel));
    frame.render_stateful_widget(list, rows[1], &mut state);
}

fn draw_player(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let [title, times, ring, mode] = player_rows(area);
    let snap = app.playback();

    let name = snap
        .now_playing
        .as_ref()
        .map(|t| t.name.as_str())
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Line::from(name).bold()).alignment(Alignment::Center),
        title,
    );

    let preview = app.seek().preview_ms;
    let times_line = format!(
        "{}   {}",
        format_elapsed(preview),
        format_remaining(preview, snap.duration_ms)
    );
    frame.render_widget(
        Paragraph::new(times_line).alignment(Alignment::Center),
        times,
    );

    draw_ring(frame, app.seek_control(), app.seek_fraction(), snap.is_playing, ring, now);

    let mode_line = format!(
        "{}  ·  loop {}",
        if snap.is_playing { "playing" } else { "paused" },
        if app.looping { "on" } else { "off" }
    );
    frame.render_widget(
        Paragraph::new(mode_line).alignment(Alignment::Center).dim(),
        mode,
    );
}

/// Sample the ring from `from` to `to` (progress fractions) as canvas points.
fn arc_points(control: &ArcSeekControl, from: f64, to: f64, height: f64) -> Vec<(f64, f64)> {
    let layout = control.layout();
    let geometry = control.geometry();
    let span = (to - from).max(0.0) * geometry.sweep_total();
    // roughly one sample per braille dot along the circumference
    let steps = ((span.to_radians() * layout.radius * 4.0).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| {
            let p = from + (to - from) * i as f64 / steps as f64;
            let pt = layout.knob(geometry, p);
            (pt.x, height - pt.y)
        })
        .collect()
}

fn draw_ring(
    frame: &mut Frame,
    control: &ArcSeekControl,
    fraction: f64,
    is_playing: bool,
    area: Rect,
    now: Instant,
) {
    let (width, height) = ring_extent(area);
    let layout = *control.layout();
    let track = arc_points(control, fraction, 1.0, height);
    let progress = arc_points(control, 0.0, fraction, height);
    let knob = layout.knob(control.geometry(), fraction);
    let knob_color = match control.state() {
        GestureState::Dragging => Color::Yellow,
        _ => Color::White,
    };

    let pulse = control.pulse();
    let alpha = pulse.flash_alpha(now);
    let wave = pulse.wave_phase(now);
    let center_radius = control.center_hit_radius();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx: &mut Context| {
            ctx.draw(&Points {
                coords: &track,
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &progress,
                color: Color::Cyan,
            });
            ctx.draw(&Circle {
                x: knob.x,
                y: height - knob.y,
                radius: 1.0,
                color: knob_color,
            });
            if alpha > 0.05 {
                ctx.draw(&Circle {
                    x: layout.center.x,
                    y: height - layout.center.y,
                    radius: (center_radius * wave).max(1.0),
                    color: if alpha > 0.5 { Color::Magenta } else { Color::DarkGray },
                });
            }
            ctx.print(
                layout.center.x - 1.0,
                height - layout.center.y,
                if is_playing { "⏸" } else { "▶" },
            );
        });
    frame.render_widget(canvas, area);
}
