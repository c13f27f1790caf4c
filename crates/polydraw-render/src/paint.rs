//! Placement and color helpers shared by rendering backends.

use kurbo::Affine;
use peniko::Color;
use polydraw_core::{Rgba, Viewport, Visual};

/// Screen-space transform of a visual's local frame.
pub fn visual_transform(visual: &Visual, viewport: &impl Viewport) -> Affine {
    viewport.transform() * visual.transform()
}

/// Color with an extra opacity factor applied.
pub fn paint_color(color: Rgba, alpha: f64) -> Color {
    Color::from(color).multiply_alpha(alpha.clamp(0.0, 1.0) as f32)
}
