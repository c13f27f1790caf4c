//! Line segment shape with an optional length label.

use super::{Appearance, Rgba, ShapeTrait};
use crate::geometry::{format_length, segment_length, HitArea};
use crate::surface::VectorPath;
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};

/// A stroked segment between two world-space endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Whether the segment length is drawn over it.
    #[serde(default)]
    pub label: bool,
}

impl Line {
    /// Create an unlabeled line.
    pub fn new(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            label: false,
        }
    }

    /// Create a line that displays its length.
    pub fn labeled(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            label: true,
        }
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        segment_length(self.from, self.to)
    }
}

impl ShapeTrait for Line {
    fn texture_path(&self, appearance: &Appearance) -> VectorPath {
        let mut path = BezPath::new();
        path.move_to(Point::ZERO);
        path.line_to((self.from - self.to).to_point());
        VectorPath::new(path)
            .with_stroke(
                appearance.line_style.width,
                Rgba::from_hex(appearance.line_style.color),
            )
            .with_alpha(appearance.alpha)
    }

    /// Lines never capture the pointer.
    fn hit_area(&self, _appearance: &Appearance) -> HitArea {
        HitArea::Empty
    }

    /// The texture's top-left lands on the smaller coordinate of each axis,
    /// whichever endpoint it belongs to.
    fn placement(&self, _appearance: &Appearance) -> Point {
        Point::new(self.from.x.min(self.to.x), self.from.y.min(self.to.y))
    }

    fn label(&self) -> Option<String> {
        self.label.then(|| format_length(self.length()))
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn translate(&mut self, delta: Vec2) {
        self.from += delta;
        self.to += delta;
    }
}
