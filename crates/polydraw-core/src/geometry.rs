//! Geometry helpers shared by shapes, snapping and hit testing.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Region used to decide whether a pointer targets a visual.
///
/// Coordinates are in the visual's local frame, the same frame its texture
/// path is expressed in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum HitArea {
    /// Closed polygon over the given vertices.
    Polygon(Vec<Point>),
    /// Disc around `center`.
    Circle { center: Point, radius: f64 },
    /// Matches nothing.
    #[default]
    Empty,
}

impl HitArea {
    /// Check whether a local-space point lies inside the area.
    pub fn contains(&self, point: Point) -> bool {
        match self {
            HitArea::Polygon(points) => polygon_contains(points, point),
            HitArea::Circle { center, radius } => circle_contains(*center, *radius, point),
            HitArea::Empty => false,
        }
    }

    /// Check whether the area can match any point at all.
    pub fn is_empty(&self) -> bool {
        match self {
            HitArea::Polygon(points) => points.len() < 3,
            HitArea::Circle { radius, .. } => *radius <= 0.0,
            HitArea::Empty => true,
        }
    }
}

/// Closed-disc containment; a non-positive radius contains nothing.
pub fn circle_contains(center: Point, radius: f64, point: Point) -> bool {
    if radius <= 0.0 {
        return false;
    }
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    dx * dx + dy * dy <= radius * radius
}

/// Even-odd point-in-polygon test.
pub fn polygon_contains(points: &[Point], point: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        let crosses = (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Euclidean distance between two points.
pub fn segment_length(from: Point, to: Point) -> f64 {
    (to - from).hypot()
}

/// Format a length for display with two decimals.
pub fn format_length(length: f64) -> String {
    format!("{:.2}", length)
}

/// Component-wise minimum over a point set, or `None` when empty.
pub fn min_corner(points: &[Point]) -> Option<Point> {
    points.iter().copied().reduce(|acc, p| Point::new(acc.x.min(p.x), acc.y.min(p.y)))
}

/// Offset of a normalized anchor within a rectangle, relative to its origin.
pub fn anchor_offset(bounds: Rect, anchor: Vec2) -> Vec2 {
    Vec2::new(
        bounds.x0 + bounds.width() * anchor.x,
        bounds.y0 + bounds.height() * anchor.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]
    }

    #[test]
    fn test_polygon_contains() {
        let area = HitArea::Polygon(square());
        assert!(area.contains(Point::new(50.0, 50.0)));
        assert!(!area.contains(Point::new(150.0, 50.0)));
        assert!(!area.contains(Point::new(-1.0, 50.0)));
    }

    #[test]
    fn test_triangle_contains() {
        let area = HitArea::Polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ]);
        assert!(area.contains(Point::new(90.0, 10.0)));
        assert!(!area.contains(Point::new(10.0, 90.0)));
    }

    #[test]
    fn test_degenerate_polygon_contains_nothing() {
        let area = HitArea::Polygon(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
        assert!(area.is_empty());
        assert!(!area.contains(Point::new(5.0, 5.0)));
        assert!(!HitArea::Polygon(Vec::new()).contains(Point::ZERO));
    }

    #[test]
    fn test_circle_contains_boundary() {
        let area = HitArea::Circle { center: Point::new(10.0, 10.0), radius: 5.0 };
        assert!(area.contains(Point::new(15.0, 10.0)));
        assert!(area.contains(Point::new(12.0, 12.0)));
        assert!(!area.contains(Point::new(10.0, 17.0)));
    }

    #[test]
    fn test_zero_radius_circle_contains_nothing() {
        assert!(!circle_contains(Point::ZERO, 0.0, Point::ZERO));
    }

    #[test]
    fn test_empty_contains_nothing() {
        assert!(HitArea::Empty.is_empty());
        assert!(!HitArea::Empty.contains(Point::ZERO));
    }

    #[test]
    fn test_format_length() {
        assert_eq!(format_length(segment_length(Point::ZERO, Point::new(3.0, 4.0))), "5.00");
        assert_eq!(format_length(2.0_f64.sqrt()), "1.41");
    }

    #[test]
    fn test_min_corner() {
        let points = [Point::new(110.0, 10.0), Point::new(10.0, 110.0), Point::new(50.0, 50.0)];
        assert_eq!(min_corner(&points), Some(Point::new(10.0, 10.0)));
        assert_eq!(min_corner(&[]), None);
    }

    #[test]
    fn test_anchor_offset() {
        let bounds = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert_eq!(anchor_offset(bounds, Vec2::new(0.5, 0.5)), Vec2::new(10.0, 10.0));
        assert_eq!(anchor_offset(bounds, Vec2::ZERO), Vec2::new(5.0, 5.0));
    }
}
