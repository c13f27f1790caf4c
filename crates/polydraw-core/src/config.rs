//! Shape configuration and default resolution.

use crate::shapes::{Appearance, Circle, Line, LineStyle, Polygon, Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fill color used when a config does not name one.
pub const DEFAULT_BACKGROUND: u32 = 0x697075;

/// Fully resolved configuration of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// Unique identifier.
    pub id: ShapeId,
    /// Origin offset (x, y).
    pub origin: Point,
    /// Fill color (0xRRGGBB).
    pub background_color: u32,
    /// Outline stroke.
    pub line_style: LineStyle,
    /// Whether the object receives pointer events (and can be dragged).
    pub interactive: bool,
    /// Variant-specific geometry.
    pub shape: Shape,
}

impl ShapeConfig {
    /// Start a builder for the given shape variant.
    pub fn builder(shape: Shape) -> ShapeConfigBuilder {
        ShapeConfigBuilder::new(shape)
    }

    /// Polygon over local-space points with every other field defaulted.
    pub fn polygon(points: Vec<Point>) -> ShapeConfigBuilder {
        ShapeConfigBuilder::new(Shape::Polygon(Polygon::new(points)))
    }

    /// Circle of the given radius with every other field defaulted.
    pub fn circle(radius: f64) -> ShapeConfigBuilder {
        ShapeConfigBuilder::new(Shape::Circle(Circle::new(radius)))
    }

    /// Line between two world points with every other field defaulted.
    pub fn line(from: Point, to: Point) -> ShapeConfigBuilder {
        ShapeConfigBuilder::new(Shape::Line(Line::new(from, to)))
    }

    /// Appearance handed to the shape variant, with the given opacity.
    pub fn appearance(&self, alpha: f64) -> Appearance {
        Appearance {
            origin: self.origin,
            background: self.background_color,
            line_style: self.line_style,
            alpha,
        }
    }
}

/// Partially specified shape configuration.
///
/// Unset fields are filled in by [`ShapeConfigBuilder::resolve`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeConfigBuilder {
    pub id: Option<ShapeId>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub background_color: Option<u32>,
    pub line_style: Option<LineStyle>,
    pub interactive: Option<bool>,
    pub shape: Option<Shape>,
}

impl ShapeConfigBuilder {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: ShapeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn origin(mut self, origin: Point) -> Self {
        self.x = Some(origin.x);
        self.y = Some(origin.y);
        self
    }

    pub fn background_color(mut self, color: u32) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = Some(interactive);
        self
    }

    /// Fill in defaults using the standard background color.
    pub fn resolve(self) -> ShapeConfig {
        self.resolve_with(DEFAULT_BACKGROUND)
    }

    /// Fill in defaults, using `default_background` when no color was given.
    ///
    /// A missing shape resolves to an empty polygon, which renders as a
    /// degenerate visual.
    pub fn resolve_with(self, default_background: u32) -> ShapeConfig {
        let background_color = self.background_color.unwrap_or(default_background);
        let shape = self.shape.unwrap_or_else(|| Shape::Polygon(Polygon::default()));
        ShapeConfig {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            origin: Point::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0)),
            background_color,
            line_style: self
                .line_style
                .unwrap_or_else(|| LineStyle::hairline(background_color)),
            interactive: self.interactive.unwrap_or_else(|| shape.is_interactive()),
            shape,
        }
    }
}
