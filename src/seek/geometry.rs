//! Angles on the seek ring.
//!
//! Screen convention throughout: 0° points right and angles grow clockwise,
//! because y grows downwards.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Map any angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if a >= 360.0 { 0.0 } else { a }
}

/// Angle of `pointer` seen from `center`, in `[0, 360)`.
pub fn pointer_angle(pointer: Point, center: Point) -> f64 {
    let dy = pointer.y - center.y;
    let dx = pointer.x - center.x;
    normalize_degrees(dy.atan2(dx).to_degrees())
}

/// An open ring: the arc starts at `start_angle_degrees` and runs clockwise
/// for `360 - gap_degrees`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub start_angle_degrees: f64,
    pub gap_degrees: f64,
}

impl ArcGeometry {
    pub fn new(start_angle_degrees: f64, gap_degrees: f64) -> Self {
        Self {
            start_angle_degrees,
            gap_degrees,
        }
    }

    pub fn sweep_total(&self) -> f64 {
        360.0 - self.gap_degrees
    }

    pub fn progress_to_angle(&self, progress: f64) -> f64 {
        self.start_angle_degrees + self.sweep_total() * clamp01(progress)
    }

    pub fn angle_to_progress(&self, pointer: Point, center: Point) -> f64 {
        self.progress_at_angle(pointer_angle(pointer, center))
    }

    /// Progress for a pointer at `angle_degrees`.
    ///
    /// Inside the gap the result snaps to whichever arc end is nearer going
    /// round the short way: the far end gives 1, the start gives 0, a tie gives 0.
    pub fn progress_at_angle(&self, angle_degrees: f64) -> f64 {
        let sweep = self.sweep_total();
        let rel = normalize_degrees(angle_degrees - self.start_angle_degrees);

        if rel <= sweep {
            return if sweep > 0.0 { clamp01(rel / sweep) } else { 0.0 };
        }

        let past_end = rel - sweep;
        let before_start = 360.0 - rel;
        if past_end < before_start { 1.0 } else { 0.0 }
    }
}

/// Where the ring sits inside a widget of the given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcLayout {
    pub center: Point,
    pub radius: f64,
}

impl ArcLayout {
    /// Largest ring that fits `width` x `height` with its stroke fully inside.
    pub fn fit(width: f64, height: f64, stroke_width: f64) -> Self {
        let radius = (width.min(height) / 2.0 - stroke_width / 2.0).max(0.0);
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            radius,
        }
    }

    pub fn point_at_angle(&self, angle_degrees: f64) -> Point {
        let rad = angle_degrees.to_radians();
        Point::new(
            self.center.x + rad.cos() * self.radius,
            self.center.y + rad.sin() * self.radius,
        )
    }

    /// Position of the knob for `progress`.
    pub fn knob(&self, geometry: &ArcGeometry, progress: f64) -> Point {
        self.point_at_angle(geometry.progress_to_angle(progress))
    }
}
