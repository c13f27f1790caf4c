//! Shape variants drawn by scene objects.

mod circle;
mod line;
mod polygon;

pub use circle::Circle;
pub use line::Line;
pub use polygon::Polygon;

use crate::geometry::HitArea;
use crate::surface::VectorPath;
use kurbo::{Point, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Outline stroke of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Stroke width.
    pub width: f64,
    /// Stroke color (0xRRGGBB).
    pub color: u32,
}

impl LineStyle {
    /// One-unit stroke in the given color, the default outline of every shape.
    pub fn hairline(color: u32) -> Self {
        Self { width: 1.0, color }
    }
}

/// Appearance shared by every shape variant when it is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Origin offset of the shape.
    pub origin: Point,
    /// Fill color (0xRRGGBB).
    pub background: u32,
    /// Outline stroke.
    pub line_style: LineStyle,
    /// Opacity of the generated texture.
    pub alpha: f64,
}

/// Capabilities every shape variant provides to its scene object.
///
/// Paths and hit areas are in the visual's local frame. The texture is placed
/// so that the point selected by [`ShapeTrait::anchor`] within the path bounds
/// sits at [`ShapeTrait::placement`].
pub trait ShapeTrait {
    /// Styled path rasterized into the texture.
    fn texture_path(&self, appearance: &Appearance) -> VectorPath;

    /// Region tested against pointer events.
    fn hit_area(&self, appearance: &Appearance) -> HitArea;

    /// Normalized texture anchor (0,0 = top-left, 0.5,0.5 = center).
    fn anchor(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// World position of the anchor.
    fn placement(&self, appearance: &Appearance) -> Point {
        appearance.origin
    }

    /// Text drawn centered over the texture.
    fn label(&self) -> Option<String> {
        None
    }

    /// Whether the shape takes part in pointer routing.
    fn is_interactive(&self) -> bool {
        true
    }

    /// Move geometry stored in world coordinates.
    fn translate(&mut self, _delta: Vec2) {}
}

/// Tagged shape variant carried by a [`crate::config::ShapeConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Polygon(Polygon),
    Circle(Circle),
    Line(Line),
}

impl Shape {
    /// Variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Polygon(_) => "polygon",
            Shape::Circle(_) => "circle",
            Shape::Line(_) => "line",
        }
    }

    pub fn texture_path(&self, appearance: &Appearance) -> VectorPath {
        match self {
            Shape::Polygon(s) => s.texture_path(appearance),
            Shape::Circle(s) => s.texture_path(appearance),
            Shape::Line(s) => s.texture_path(appearance),
        }
    }

    pub fn hit_area(&self, appearance: &Appearance) -> HitArea {
        match self {
            Shape::Polygon(s) => s.hit_area(appearance),
            Shape::Circle(s) => s.hit_area(appearance),
            Shape::Line(s) => s.hit_area(appearance),
        }
    }

    pub fn anchor(&self) -> Vec2 {
        match self {
            Shape::Polygon(s) => s.anchor(),
            Shape::Circle(s) => s.anchor(),
            Shape::Line(s) => s.anchor(),
        }
    }

    pub fn placement(&self, appearance: &Appearance) -> Point {
        match self {
            Shape::Polygon(s) => s.placement(appearance),
            Shape::Circle(s) => s.placement(appearance),
            Shape::Line(s) => s.placement(appearance),
        }
    }

    pub fn label(&self) -> Option<String> {
        match self {
            Shape::Polygon(s) => s.label(),
            Shape::Circle(s) => s.label(),
            Shape::Line(s) => s.label(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        match self {
            Shape::Polygon(s) => s.is_interactive(),
            Shape::Circle(s) => s.is_interactive(),
            Shape::Line(s) => s.is_interactive(),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Polygon(s) => s.translate(delta),
            Shape::Circle(s) => s.translate(delta),
            Shape::Line(s) => s.translate(delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_is_opaque() {
        let color = Rgba::from_hex(0x697075);
        assert_eq!(color, Rgba::new(0x69, 0x70, 0x75, 255));
    }

    #[test]
    fn test_peniko_conversion() {
        let color: Color = Rgba::new(10, 20, 30, 40).into();
        assert_eq!(Rgba::from(color), Rgba::new(10, 20, 30, 40));
    }

    #[test]
    fn test_shape_serde_is_tagged() {
        let shape = Shape::Circle(Circle::new(4.0));
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains(r#""kind":"circle""#));
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
    }
}
