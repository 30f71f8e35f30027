use std::time::{Duration, Instant};

use super::*;

const EPS: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn arc() -> ArcGeometry {
    ArcGeometry::new(125.0, 70.0)
}

fn control() -> ArcSeekControl {
    let config = SeekControlConfig {
        geometry: arc(),
        stroke_width: 2.0,
        ring_tolerance: 3.0,
        center_inset: 6.0,
        touch_slop: 1.5,
    };
    let layout = ArcLayout {
        center: Point::new(50.0, 50.0),
        radius: 40.0,
    };
    let pulse = CenterPulse::new(Duration::from_millis(260), Duration::from_millis(420));
    ArcSeekControl::new(config, layout, pulse)
}

fn on_ring(c: &ArcSeekControl, angle: f64) -> Point {
    c.layout().point_at_angle(angle)
}

fn progress_of(event: Option<SeekEvent>) -> f64 {
    match event {
        Some(SeekEvent::Progress(p)) => p,
        other => panic!("expected a progress event, got {other:?}"),
    }
}

#[test]
fn worked_angles_for_default_ring() {
    let g = arc();
    assert!(approx(g.sweep_total(), 290.0));
    assert!(approx(g.progress_at_angle(125.0), 0.0));
    assert!(approx(g.progress_at_angle(55.0), 1.0));
    assert!(approx(g.progress_at_angle(270.0), 0.5));
    assert!(approx(g.progress_at_angle(415.0), 1.0));
    assert!(approx(g.progress_at_angle(-235.0), 0.0));
}

#[test]
fn progress_to_angle_spans_the_arc() {
    let g = arc();
    assert!(approx(g.progress_to_angle(0.0), 125.0));
    assert!(approx(g.progress_to_angle(1.0), 415.0));
    assert!(approx(g.progress_to_angle(0.5), 270.0));
    // out of range is clamped
    assert!(approx(g.progress_to_angle(-3.0), 125.0));
    assert!(approx(g.progress_to_angle(7.0), 415.0));
}

#[test]
fn angle_and_progress_round_trip() {
    let g = arc();
    let center = Point::new(0.0, 0.0);
    let layout = ArcLayout { center, radius: 10.0 };
    for i in 0..=20 {
        let p = i as f64 / 20.0;
        assert!(approx(g.progress_at_angle(g.progress_to_angle(p)), p), "p={p}");
        let knob = layout.knob(&g, p);
        assert!((g.angle_to_progress(knob, center) - p).abs() < 1e-6, "pointer p={p}");
    }
}

#[test]
fn gap_snaps_to_nearest_end() {
    let g = arc();
    // gap runs clockwise from 55° to 125°
    assert_eq!(g.progress_at_angle(60.0), 1.0);
    assert_eq!(g.progress_at_angle(120.0), 0.0);
    // dead middle of the gap
    assert_eq!(g.progress_at_angle(90.0), 0.0);
    for a in 56..125 {
        let p = g.progress_at_angle(a as f64);
        assert!(p == 0.0 || p == 1.0, "angle {a} gave {p}");
    }
}

#[test]
fn pointer_angle_uses_screen_axes() {
    let c = Point::new(0.0, 0.0);
    assert!(approx(pointer_angle(Point::new(1.0, 0.0), c), 0.0));
    assert!(approx(pointer_angle(Point::new(0.0, 1.0), c), 90.0));
    assert!(approx(pointer_angle(Point::new(-1.0, 0.0), c), 180.0));
    assert!(approx(pointer_angle(Point::new(0.0, -1.0), c), 270.0));
}

#[test]
fn layout_fits_smaller_side_inside_stroke() {
    let layout = ArcLayout::fit(100.0, 40.0, 2.0);
    assert_eq!(layout.center, Point::new(50.0, 20.0));
    assert!(approx(layout.radius, 19.0));
    assert_eq!(ArcLayout::fit(1.0, 1.0, 4.0).radius, 0.0);
}

#[test]
fn tap_on_ring_previews_once_then_commits() {
    let mut c = control();
    let at = on_ring(&c, 270.0);

    let p = progress_of(c.pointer_down(at));
    assert!((p - 0.5).abs() < 1e-6);
    assert!(c.is_engaged());

    // jitter within slop is not a drag
    assert_eq!(c.pointer_move(Point::new(at.x + 1.0, at.y)), None);
    assert!(matches!(c.state(), GestureState::ArmedTap { .. }));

    assert_eq!(c.pointer_up(at), Some(SeekEvent::Commit));
    assert!(!c.is_engaged());
}

#[test]
fn drag_emits_progress_per_move_then_one_commit() {
    let mut c = control();
    let mut events = vec![c.pointer_down(on_ring(&c, 200.0))];
    for step in 1..=5 {
        events.push(c.pointer_move(on_ring(&c, 200.0 + 10.0 * step as f64)));
    }
    events.push(c.pointer_up(on_ring(&c, 250.0)));

    let progress: Vec<f64> = events
        .iter()
        .filter_map(|e| match e {
            Some(SeekEvent::Progress(p)) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 6);
    assert!(progress.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(
        events.iter().filter(|e| **e == Some(SeekEvent::Commit)).count(),
        1
    );
    assert_eq!(events.last(), Some(&Some(SeekEvent::Commit)));
}

#[test]
fn drag_keeps_tracking_off_the_ring_and_into_the_gap() {
    let mut c = control();
    c.pointer_down(on_ring(&c, 30.0));
    c.pointer_move(on_ring(&c, 45.0));

    // near the far end of the gap, well inside the ring
    let inner = Point::new(50.0 + 10.0 * 60f64.to_radians().cos(), 50.0 + 10.0 * 60f64.to_radians().sin());
    assert_eq!(c.pointer_move(inner), Some(SeekEvent::Progress(1.0)));
    assert_eq!(c.pointer_up(inner), Some(SeekEvent::Commit));
}

#[test]
fn presses_off_target_are_ignored() {
    let mut c = control();
    // beyond the outer tolerance
    assert_eq!(c.pointer_down(Point::new(50.0 + 48.0, 50.0)), None);
    // between the center area and the ring band
    assert_eq!(c.pointer_down(Point::new(50.0 + 35.0, 50.0)), None);
    assert!(!c.is_engaged());
    assert_eq!(c.pointer_move(Point::new(60.0, 60.0)), None);
    assert_eq!(c.pointer_up(Point::new(60.0, 60.0)), None);
}

#[test]
fn ring_band_respects_tolerance() {
    let c = control();
    assert!(c.on_ring(Point::new(50.0 + 37.0, 50.0)));
    assert!(c.on_ring(Point::new(50.0 + 43.0, 50.0)));
    assert!(!c.on_ring(Point::new(50.0 + 43.5, 50.0)));
    assert!(approx(c.center_hit_radius(), 34.0));
    assert!(c.in_center(Point::new(50.0, 50.0 + 34.0)));
}

#[test]
fn center_tap_toggles_and_pulses() {
    let mut c = control();
    let center = c.layout().center;
    assert!(!c.pulse().is_active(Instant::now()));

    assert_eq!(c.pointer_down(center), None);
    assert_eq!(c.state(), GestureState::CenterPressed);
    assert_eq!(c.pointer_up(center), Some(SeekEvent::TogglePlayback));
    assert!(c.pulse().is_active(Instant::now()));
}

#[test]
fn center_press_released_outside_does_nothing() {
    let mut c = control();
    c.pointer_down(c.layout().center);
    assert_eq!(c.pointer_up(Point::new(0.0, 0.0)), None);
    assert!(!c.is_engaged());
}

#[test]
fn cancel_abandons_without_commit() {
    let mut c = control();
    c.pointer_down(on_ring(&c, 180.0));
    c.pointer_move(on_ring(&c, 200.0));
    c.cancel();
    assert_eq!(c.state(), GestureState::Idle);
    assert_eq!(c.pointer_up(on_ring(&c, 200.0)), None);
}

#[test]
fn second_press_during_gesture_is_ignored() {
    let mut c = control();
    c.pointer_down(on_ring(&c, 180.0));
    assert_eq!(c.pointer_down(c.layout().center), None);
    assert!(matches!(c.state(), GestureState::ArmedTap { .. }));
}

#[test]
fn pulse_fades_and_restarts() {
    let t0 = Instant::now();
    let mut pulse = CenterPulse::new(Duration::from_millis(260), Duration::from_millis(420));
    assert_eq!(pulse.flash_alpha(t0), 0.0);
    assert_eq!(pulse.wave_phase(t0), 1.0);

    pulse.trigger(t0);
    assert_eq!(pulse.flash_alpha(t0), 1.0);
    assert_eq!(pulse.wave_phase(t0), 0.0);
    let mid = pulse.flash_alpha(t0 + Duration::from_millis(100));
    assert!(mid > 0.0 && mid < 1.0);
    assert_eq!(pulse.flash_alpha(t0 + Duration::from_millis(260)), 0.0);
    assert_eq!(pulse.wave_phase(t0 + Duration::from_millis(420)), 1.0);
    assert!(!pulse.is_active(t0 + Duration::from_millis(420)));

    let t1 = t0 + Duration::from_millis(300);
    pulse.trigger(t1);
    assert_eq!(pulse.flash_alpha(t1), 1.0);
    assert!(pulse.is_active(t1 + Duration::from_millis(400)));
}

#[test]
fn preview_follows_playback_until_dragged() {
    let mut ui = SeekUiState::default();
    ui.follow(1_000);
    assert_eq!(ui.preview_ms, 1_000);

    ui.preview(0.5, 10_000);
    assert!(ui.is_dragging);
    assert_eq!(ui.preview_ms, 5_000);
    ui.follow(1_250);
    assert_eq!(ui.preview_ms, 5_000);
    assert_eq!(ui.fraction(10_000), 0.5);

    assert_eq!(ui.finish(), 5_000);
    assert!(!ui.is_dragging);
    ui.follow(5_010);
    assert_eq!(ui.preview_ms, 5_010);

    ui.reset();
    assert_eq!(ui, SeekUiState::default());
}

#[test]
fn preview_with_unknown_duration_stays_tiny() {
    let mut ui = SeekUiState::default();
    assert_eq!(safe_duration(0), 1);
    ui.preview(1.0, 0);
    assert_eq!(ui.preview_ms, 1);
    ui.preview(0.4, -1);
    assert_eq!(ui.preview_ms, 0);
    assert_eq!(ui.fraction(0), 0.0);
}
