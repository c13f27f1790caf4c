//! Polygon shape.

use super::{Appearance, Rgba, ShapeTrait};
use crate::geometry::HitArea;
use crate::surface::VectorPath;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// A filled polygon.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    /// Vertices relative to the shape origin, without a repeated closing vertex.
    pub points: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from local-space vertices.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Closed outline through all vertices.
    pub fn outline(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some((first, rest)) = self.points.split_first() else {
            return path;
        };
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
        path
    }
}

impl ShapeTrait for Polygon {
    fn texture_path(&self, appearance: &Appearance) -> VectorPath {
        VectorPath::new(self.outline())
            .with_fill(Rgba::from_hex(appearance.background))
            .with_stroke(
                appearance.line_style.width,
                Rgba::from_hex(appearance.line_style.color),
            )
            .with_alpha(appearance.alpha)
    }

    fn hit_area(&self, _appearance: &Appearance) -> HitArea {
        HitArea::Polygon(self.points.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::LineStyle;
    use kurbo::Rect;

    fn appearance() -> Appearance {
        Appearance {
            origin: Point::new(10.0, 10.0),
            background: 0x697075,
            line_style: LineStyle::hairline(0x697075),
            alpha: 1.0,
        }
    }

    fn triangle() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ])
    }

    #[test]
    fn test_texture_covers_points() {
        let polygon = triangle();
        let path = polygon.texture_path(&appearance());
        assert_eq!(path.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(path.fill, Some(Rgba::from_hex(0x697075)));
        assert_eq!(path.stroke.map(|s| s.width), Some(1.0));
    }

    #[test]
    fn test_hit_area_matches_points() {
        let polygon = triangle();
        let area = polygon.hit_area(&appearance());
        assert_eq!(area, HitArea::Polygon(polygon.points.clone()));
        assert!(area.contains(Point::new(90.0, 10.0)));
    }

    #[test]
    fn test_empty_polygon_is_degenerate() {
        let polygon = Polygon::default();
        let path = polygon.texture_path(&appearance());
        assert!(path.path.elements().is_empty());
        assert_eq!(path.bounds(), Rect::ZERO);
        assert!(polygon.hit_area(&appearance()).is_empty());
    }
}
