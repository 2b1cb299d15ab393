//! 2D value types shared by map records

use serde::Serialize;
use std::fmt;

/// A point in map space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point2 {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point2 {
    /// Create a new point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A line segment between two absolute points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Line {
    /// Start point
    pub start: Point2,
    /// End point
    pub end: Point2,
}

impl Line {
    /// Create a line from two points
    pub const fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Create a line from a start point and a delta
    pub fn from_delta(start: Point2, dx: f32, dy: f32) -> Self {
        Self {
            start,
            end: Point2::new(start.x + dx, start.y + dy),
        }
    }

    /// Length of the segment
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Intersection point of the two infinite lines through both segments
    ///
    /// Returns `None` for parallel or coincident lines.
    pub fn intersection(&self, other: &Self) -> Option<Point2> {
        let a1 = self.end.y - self.start.y;
        let b1 = self.start.x - self.end.x;
        let c1 = a1 * self.start.x + b1 * self.start.y;

        let a2 = other.end.y - other.start.y;
        let b2 = other.start.x - other.end.x;
        let c2 = a2 * other.start.x + b2 * other.start.y;

        let delta = a1 * b2 - a2 * b1;
        if delta == 0.0 {
            return None;
        }

        Some(Point2::new(
            (b2 * c1 - b1 * c2) / delta,
            (a1 * c2 - a2 * c1) / delta,
        ))
    }

    /// Closest point on the segment to `point`
    pub fn closest_point(&self, point: Point2) -> Point2 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let length_sq = dx * dx + dy * dy;
        if length_sq == 0.0 {
            return self.start;
        }

        let t = ((point.x - self.start.x) * dx + (point.y - self.start.y) * dy) / length_sq;
        if t <= 0.0 {
            self.start
        } else if t >= 1.0 {
            self.end
        } else {
            Point2::new(self.start.x + t * dx, self.start.y + t * dy)
        }
    }

    /// Distance from `point` to the nearest point of the segment
    pub fn distance_to(&self, point: Point2) -> f32 {
        self.closest_point(point).distance(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn test_line_from_delta() {
        let line = Line::from_delta(Point2::new(10.0, -4.0), 6.0, 8.0);
        assert_eq!(line.end, Point2::new(16.0, 4.0));
        assert_eq!(line.length(), 10.0);
    }

    #[test]
    fn test_intersection() {
        let horizontal = Line::new(Point2::new(-2.0, 0.0), Point2::new(2.0, 0.0));
        let vertical = Line::new(Point2::new(1.0, -2.0), Point2::new(1.0, 2.0));
        assert_eq!(horizontal.intersection(&vertical), Some(Point2::new(1.0, 0.0)));

        let parallel = Line::new(Point2::new(-2.0, 1.0), Point2::new(2.0, 1.0));
        assert_eq!(horizontal.intersection(&parallel), None);
    }

    #[test]
    fn test_distance_to_segment() {
        let line = Line::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));

        // Projects onto the interior
        assert_eq!(line.distance_to(Point2::new(5.0, 3.0)), 3.0);
        // Clamps to the endpoints
        assert_eq!(line.distance_to(Point2::new(-3.0, 4.0)), 5.0);
        assert_eq!(line.distance_to(Point2::new(13.0, -4.0)), 5.0);

        // Degenerate segment behaves like a point
        let point = Line::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0));
        assert_eq!(point.distance_to(Point2::new(4.0, 5.0)), 5.0);
    }
}
