//! Rendering surface abstraction.
//!
//! The core never rasterizes anything itself: shapes describe a [`VectorPath`]
//! and a [`RenderingSurface`] turns it into an opaque [`TextureHandle`].

use crate::shapes::Rgba;
use kurbo::{BezPath, Rect, Shape as KurboShape, Size};
use std::collections::HashMap;

/// Stroke applied along a vector path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSpec {
    pub width: f64,
    pub color: Rgba,
}

/// A styled vector path ready to be rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPath {
    /// Outline in the owning visual's local coordinates.
    pub path: BezPath,
    /// Fill color (None = no fill).
    pub fill: Option<Rgba>,
    /// Stroke (None = no stroke).
    pub stroke: Option<StrokeSpec>,
    /// Overall opacity.
    pub alpha: f64,
}

impl VectorPath {
    /// Create an unstyled, fully opaque path.
    pub fn new(path: BezPath) -> Self {
        Self {
            path,
            fill: None,
            stroke: None,
            alpha: 1.0,
        }
    }

    pub fn with_fill(mut self, color: Rgba) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_stroke(mut self, width: f64, color: Rgba) -> Self {
        self.stroke = Some(StrokeSpec { width, color });
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Local bounds of the path geometry; zero for an empty path.
    pub fn bounds(&self) -> Rect {
        if self.path.elements().is_empty() {
            return Rect::ZERO;
        }
        self.path.bounding_box()
    }
}

/// Opaque reference to a rasterized texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureHandle {
    /// Surface-assigned identifier.
    pub id: u64,
    /// Local bounds the texture covers.
    pub bounds: Rect,
}

/// Style for measured and rendered text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub color: Rgba,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            color: Rgba::white(),
        }
    }
}

/// Rasterization service used by scene objects.
///
/// Calls are assumed to succeed; backend failures belong to the host that
/// created the surface.
pub trait RenderingSurface {
    /// Rasterize a vector path into a texture.
    fn generate_texture(&mut self, path: &VectorPath) -> TextureHandle;

    /// Release a texture that is no longer displayed.
    fn release_texture(&mut self, texture: TextureHandle);

    /// Measure the laid-out size of a single line of text.
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Size;
}

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f64 = 0.5;
/// Line height as a multiple of the font size.
const LINE_HEIGHT: f64 = 1.2;

/// Headless surface that records generated paths instead of rasterizing them.
#[derive(Debug, Default)]
pub struct MemorySurface {
    textures: HashMap<u64, VectorPath>,
    next_id: u64,
    generated: usize,
    released: usize,
}

impl MemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Path recorded for a live texture.
    pub fn texture(&self, handle: TextureHandle) -> Option<&VectorPath> {
        self.textures.get(&handle.id)
    }

    /// Number of textures currently alive.
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    /// Total number of textures generated so far.
    pub fn generated_count(&self) -> usize {
        self.generated
    }

    /// Total number of textures released so far.
    pub fn released_count(&self) -> usize {
        self.released
    }
}

impl RenderingSurface for MemorySurface {
    fn generate_texture(&mut self, path: &VectorPath) -> TextureHandle {
        self.next_id += 1;
        self.generated += 1;
        let handle = TextureHandle {
            id: self.next_id,
            bounds: path.bounds(),
        };
        self.textures.insert(handle.id, path.clone());
        handle
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        if self.textures.remove(&texture.id).is_some() {
            self.released += 1;
        } else {
            log::warn!("Released unknown texture {}", texture.id);
        }
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Size {
        let width = text.chars().count() as f64 * style.font_size * GLYPH_ADVANCE;
        Size::new(width, style.font_size * LINE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn triangle() -> BezPath {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(40.0, 0.0));
        path.line_to(Point::new(40.0, 30.0));
        path.close_path();
        path
    }

    #[test]
    fn test_bounds_of_path() {
        let bounds = VectorPath::new(triangle()).bounds();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 40.0, 30.0));
    }

    #[test]
    fn test_empty_path_has_zero_bounds() {
        assert_eq!(VectorPath::new(BezPath::new()).bounds(), Rect::ZERO);
    }

    #[test]
    fn test_generate_and_release() {
        let mut surface = MemorySurface::new();
        let path = VectorPath::new(triangle()).with_fill(Rgba::black());
        let handle = surface.generate_texture(&path);

        assert_eq!(surface.texture(handle), Some(&path));
        assert_eq!(surface.live_textures(), 1);

        surface.release_texture(handle);
        assert_eq!(surface.live_textures(), 0);
        assert_eq!(surface.released_count(), 1);
        assert_eq!(surface.generated_count(), 1);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut surface = MemorySurface::new();
        let path = VectorPath::new(triangle());
        let a = surface.generate_texture(&path);
        let b = surface.generate_texture(&path);
        assert_ne!(a.id, b.id);
        assert_eq!(a.bounds, b.bounds);
    }

    #[test]
    fn test_measure_text() {
        let mut surface = MemorySurface::new();
        let size = surface.measure_text("100.00", &TextStyle::default());
        assert!((size.width - 36.0).abs() < f64::EPSILON);
        assert!((size.height - 14.4).abs() < 1e-9);
    }
}
