//! Circular touch zones and their angular sectors
//!
//! A zone is the bounding rect of an overlay image. Touch points are mapped
//! into the zone's unit circle (x right, y up) and the angle from the center
//! picks which buttons are pressed.

use macroquad::math::{Rect, Vec2};
use super::gamepad_state::button;

/// Angular range in degrees, as produced by `atan2` (-180..=180)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arc {
    /// lo < angle < hi
    Open(f32, f32),
    /// |angle| <= limit
    AbsAtMost(f32),
    /// |angle| >= limit
    AbsAtLeast(f32),
}

impl Arc {
    pub fn contains(&self, angle: f32) -> bool {
        match *self {
            Arc::Open(lo, hi) => angle > lo && angle < hi,
            Arc::AbsAtMost(limit) => angle.abs() <= limit,
            Arc::AbsAtLeast(limit) => angle.abs() >= limit,
        }
    }
}

/// A button and the arc that presses it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub button: usize,
    pub arc: Arc,
}

/// D-pad sectors. Up/Down and Left/Right overlap, so diagonals press two buttons.
pub const DPAD_SECTORS: [Sector; 4] = [
    Sector { button: button::DPAD_UP, arc: Arc::Open(22.5, 157.5) },
    Sector { button: button::DPAD_DOWN, arc: Arc::Open(-157.5, -22.5) },
    Sector { button: button::DPAD_RIGHT, arc: Arc::AbsAtMost(67.5) },
    Sector { button: button::DPAD_LEFT, arc: Arc::AbsAtLeast(112.5) },
];

/// Face button sectors, one quadrant each
pub const FACE_SECTORS: [Sector; 4] = [
    Sector { button: button::A, arc: Arc::Open(-135.0, -45.0) },
    Sector { button: button::B, arc: Arc::AbsAtMost(45.0) },
    Sector { button: button::X, arc: Arc::AbsAtLeast(135.0) },
    Sector { button: button::Y, arc: Arc::Open(45.0, 135.0) },
];

/// Fixed circular hit region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchZone {
    pub bounds: Rect,
    pub sectors: &'static [Sector],
}

impl TouchZone {
    pub fn dpad(bounds: Rect) -> Self {
        Self { bounds, sectors: &DPAD_SECTORS }
    }

    pub fn face(bounds: Rect) -> Self {
        Self { bounds, sectors: &FACE_SECTORS }
    }

    /// Map a screen point into the zone's unit circle, y pointing up.
    ///
    /// Scaled by half the zone width. Returns `None` for a degenerate zone
    /// (zero, negative or non-finite width), e.g. when the overlay image never
    /// got a size.
    pub fn normalize(&self, point: Vec2) -> Option<Vec2> {
        let radius = self.bounds.w * 0.5;
        if !radius.is_finite() || radius <= f32::EPSILON {
            return None;
        }
        let center = self.bounds.center();
        Some(Vec2::new(
            (point.x - center.x) / radius,
            -(point.y - center.y) / radius,
        ))
    }

    /// Angle of the point from the zone center in degrees, if it lies inside the circle
    pub fn hit_angle(&self, point: Vec2) -> Option<f32> {
        let p = self.normalize(point)?;
        if p.length_squared() > 1.0 {
            return None;
        }
        // atan2(0, 0) is 0, so the exact center reads as pointing right
        Some(p.y.atan2(p.x).to_degrees())
    }

    /// Buttons pressed by a touch at `point` (empty when outside)
    pub fn buttons_at(&self, point: Vec2) -> Vec<usize> {
        match self.hit_angle(point) {
            Some(angle) => self
                .sectors
                .iter()
                .filter(|s| s.arc.contains(angle))
                .map(|s| s.button)
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> TouchZone {
        TouchZone::dpad(Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    /// Screen point for a normalized (x right, y up) offset inside `zone()`
    fn at(dx: f32, dy: f32) -> Vec2 {
        Vec2::new(50.0 + dx * 50.0, 50.0 - dy * 50.0)
    }

    #[test]
    fn test_normalize_flips_y() {
        let p = zone().normalize(Vec2::new(75.0, 25.0)).unwrap();
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_outside_circle_misses() {
        // Corner of the bounding rect is outside the inscribed circle
        assert_eq!(zone().hit_angle(Vec2::new(2.0, 2.0)), None);
        assert!(zone().buttons_at(Vec2::new(500.0, 500.0)).is_empty());
    }

    #[test]
    fn test_rim_is_inside() {
        assert!(zone().hit_angle(at(1.0, 0.0)).is_some());
    }

    #[test]
    fn test_center_presses_right() {
        assert_eq!(zone().hit_angle(at(0.0, 0.0)), Some(0.0));
        assert_eq!(zone().buttons_at(at(0.0, 0.0)), vec![button::DPAD_RIGHT]);
    }

    #[test]
    fn test_diagonal_presses_two() {
        let buttons = zone().buttons_at(at(0.5, 0.5));
        assert_eq!(buttons, vec![button::DPAD_UP, button::DPAD_RIGHT]);
    }

    #[test]
    fn test_up_left_scenario() {
        let angle = zone().hit_angle(at(-0.3, 0.4)).unwrap();
        assert!((angle - 126.87).abs() < 0.01);
        // Left's arc is |angle| >= 112.5, which 126.87 satisfies
        assert_eq!(zone().buttons_at(at(-0.3, 0.4)), vec![button::DPAD_UP, button::DPAD_LEFT]);
    }

    #[test]
    fn test_cardinal_directions() {
        assert_eq!(zone().buttons_at(at(0.0, 0.8)), vec![button::DPAD_UP]);
        assert_eq!(zone().buttons_at(at(0.0, -0.8)), vec![button::DPAD_DOWN]);
        assert_eq!(zone().buttons_at(at(-0.8, 0.0)), vec![button::DPAD_LEFT]);
        assert_eq!(zone().buttons_at(at(0.8, 0.0)), vec![button::DPAD_RIGHT]);
    }

    #[test]
    fn test_face_quadrants_do_not_overlap() {
        let face = TouchZone::face(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(face.buttons_at(at(0.0, -0.8)), vec![button::A]);
        assert_eq!(face.buttons_at(at(0.8, 0.0)), vec![button::B]);
        assert_eq!(face.buttons_at(at(-0.8, 0.0)), vec![button::X]);
        assert_eq!(face.buttons_at(at(0.0, 0.8)), vec![button::Y]);
        assert_eq!(face.buttons_at(at(0.5, 0.2)), vec![button::B]);
    }

    #[test]
    fn test_degenerate_zone_never_hits() {
        let empty = TouchZone::dpad(Rect::new(10.0, 10.0, 0.0, 0.0));
        assert_eq!(empty.normalize(Vec2::new(10.0, 10.0)), None);
        assert!(empty.buttons_at(Vec2::new(10.0, 10.0)).is_empty());

        let nan = TouchZone::face(Rect::new(0.0, 0.0, f32::NAN, 10.0));
        assert_eq!(nan.hit_angle(Vec2::ZERO), None);
    }

    #[test]
    fn test_arc_bounds() {
        assert!(!Arc::Open(22.5, 157.5).contains(22.5));
        assert!(Arc::AbsAtMost(67.5).contains(-67.5));
        assert!(Arc::AbsAtLeast(112.5).contains(180.0));
    }
}
