//! Continuous 2D geometry used by ranking and navigation.

use serde::Serialize;

/// Radius of every unit on the map.
pub const UNIT_RADIUS: f64 = 0.5;

/// Extra distance beyond a node's radius within which a unit may claim it.
pub const CLAIM_RADIUS: f64 = 4.0;

/// Maximum thrust magnitude the engine accepts in one turn.
pub const MAX_SPEED: f64 = 7.0;

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    #[must_use]
    #[inline]
    pub fn distance_to(self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Bearing towards another position in degrees, normalised to `[0, 360)`.
    #[must_use]
    pub fn angle_to(self, other: Position) -> f64 {
        (other.y - self.y)
            .atan2(other.x - self.x)
            .to_degrees()
            .rem_euclid(360.0)
    }

    /// The position `distance` away along the bearing `degrees`.
    #[must_use]
    pub fn offset(self, degrees: f64, distance: f64) -> Position {
        let radians = degrees.to_radians();
        Position::new(
            self.x + radians.cos() * distance,
            self.y + radians.sin() * distance,
        )
    }
}

/// The point on the circle of `radius + standoff` around `center` that faces `from`.
///
/// Used to approach an entity without overlapping it.
#[must_use]
pub fn closest_point_to(from: Position, center: Position, radius: f64, standoff: f64) -> Position {
    center.offset(center.angle_to(from), radius + standoff)
}

/// Whether the segment `start..end` passes within `radius + fudge` of `center`.
///
/// A zero-length segment degenerates to a point-in-circle test on `start`.
#[must_use]
pub fn segment_intersects_circle(
    start: Position,
    end: Position,
    center: Position,
    radius: f64,
    fudge: f64,
) -> bool {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx * dx + dy * dy;
    let reach = radius + fudge;

    if length_sq <= f64::EPSILON {
        return start.distance_to(center) <= reach;
    }

    // Projection of the circle center onto the segment, clamped at the end point.
    let t = (((center.x - start.x) * dx + (center.y - start.y) * dy) / length_sq).min(1.0);
    if t < 0.0 {
        return false;
    }

    let closest = Position::new(start.x + dx * t, start.y + dy * t);
    closest.distance_to(center) <= reach
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!(approx(a.distance_to(b), 5.0));
        assert!(approx(b.distance_to(a), 5.0));
    }

    #[test]
    fn test_angle_normalised() {
        let origin = Position::new(10.0, 10.0);
        assert!(approx(origin.angle_to(Position::new(20.0, 10.0)), 0.0));
        assert!(approx(origin.angle_to(Position::new(10.0, 20.0)), 90.0));
        assert!(approx(origin.angle_to(Position::new(0.0, 10.0)), 180.0));
        assert!(approx(origin.angle_to(Position::new(10.0, 0.0)), 270.0));
    }

    #[test]
    fn test_closest_point_faces_origin() {
        let from = Position::new(0.0, 0.0);
        let center = Position::new(20.0, 0.0);
        let point = closest_point_to(from, center, 3.0, 4.0);
        assert!(approx(point.x, 13.0));
        assert!(approx(point.y, 0.0));
    }

    #[test]
    fn test_segment_hits_circle_in_the_middle() {
        let start = Position::new(0.0, 0.0);
        let end = Position::new(10.0, 0.0);
        assert!(segment_intersects_circle(start, end, Position::new(5.0, 1.0), 1.0, 0.0));
        assert!(!segment_intersects_circle(start, end, Position::new(5.0, 3.0), 1.0, 0.5));
    }

    #[test]
    fn test_segment_ignores_circle_behind_start() {
        let start = Position::new(0.0, 0.0);
        let end = Position::new(10.0, 0.0);
        assert!(!segment_intersects_circle(start, end, Position::new(-5.0, 0.0), 1.0, 0.0));
    }

    #[test]
    fn test_segment_clamps_past_end() {
        let start = Position::new(0.0, 0.0);
        let end = Position::new(10.0, 0.0);
        assert!(segment_intersects_circle(start, end, Position::new(11.0, 0.0), 1.5, 0.0));
        assert!(!segment_intersects_circle(start, end, Position::new(13.0, 0.0), 1.5, 0.0));
    }

    #[test]
    fn test_zero_length_segment() {
        let point = Position::new(1.0, 1.0);
        assert!(segment_intersects_circle(point, point, Position::new(1.5, 1.0), 0.5, 0.0));
        assert!(!segment_intersects_circle(point, point, Position::new(5.0, 1.0), 0.5, 0.0));
    }
}
