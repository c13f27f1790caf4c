//! Circle shape.

use super::{Appearance, Rgba, ShapeTrait};
use crate::geometry::HitArea;
use crate::surface::VectorPath;
use kurbo::{Circle as KurboCircle, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// A filled disc centered on the shape origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Disc radius.
    pub radius: f64,
}

impl Circle {
    /// Create a circle with the given radius.
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl ShapeTrait for Circle {
    fn texture_path(&self, appearance: &Appearance) -> VectorPath {
        let path = if self.radius > 0.0 {
            KurboCircle::new(appearance.origin, self.radius).to_path(0.1)
        } else {
            kurbo::BezPath::new()
        };
        VectorPath::new(path)
            .with_fill(Rgba::from_hex(appearance.background))
            .with_stroke(
                appearance.line_style.width,
                Rgba::from_hex(appearance.line_style.color),
            )
            .with_alpha(appearance.alpha)
    }

    fn hit_area(&self, appearance: &Appearance) -> HitArea {
        HitArea::Circle {
            center: appearance.origin,
            radius: self.radius,
        }
    }

    fn anchor(&self) -> Vec2 {
        Vec2::new(0.5, 0.5)
    }
}
