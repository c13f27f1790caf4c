//! Viewport: pan/zoom transform and the pan-enable gate.

use crate::settings::CanvasSettings;
use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Pannable, zoomable view onto the world.
///
/// `pause_drag`/`resume_drag` gate viewport panning and are idempotent.
pub trait Viewport {
    /// Convert a screen point to world coordinates.
    fn to_world(&self, screen_point: Point) -> Point;

    /// Convert a world point to screen coordinates.
    fn to_screen(&self, world_point: Point) -> Point;

    /// World-to-screen transform for rendering.
    fn transform(&self) -> Affine;

    /// Disable viewport panning.
    fn pause_drag(&mut self);

    /// Re-enable viewport panning.
    fn resume_drag(&mut self);

    /// Whether viewport panning is enabled.
    fn is_drag_enabled(&self) -> bool;

    /// Pan by a screen-space delta. Returns false when panning is paused.
    fn pan(&mut self, delta: Vec2) -> bool;

    /// Zoom keeping `screen_point` fixed. Returns true if the zoom changed.
    fn zoom_at(&mut self, screen_point: Point, factor: f64) -> bool;

    /// Viewport width in screen pixels.
    fn width(&self) -> f64;

    /// Viewport height in screen pixels.
    fn height(&self) -> f64;

    /// Current zoom scale.
    fn zoom_scale(&self) -> f64;
}

/// Camera-style viewport with a translation offset and clamped zoom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraViewport {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
    /// Viewport size in screen pixels
    pub size: Size,
    drag_enabled: bool,
}

impl Default for CameraViewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            size: Size::new(800.0, 600.0),
            drag_enabled: true,
        }
    }
}

impl CameraViewport {
    /// Create a viewport of the given screen size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Create a viewport using the zoom range from canvas settings.
    pub fn from_settings(size: Size, settings: &CanvasSettings) -> Self {
        Self::new(size).with_zoom_range(settings.min_zoom, settings.max_zoom)
    }

    /// Set the zoom clamp range.
    pub fn with_zoom_range(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        self
    }

    /// Get the inverse transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Reset to the origin at unit zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
    }
}

impl Viewport for CameraViewport {
    fn to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    fn to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    fn pause_drag(&mut self) {
        if self.drag_enabled {
            log::debug!("Viewport panning paused");
        }
        self.drag_enabled = false;
    }

    fn resume_drag(&mut self) {
        if !self.drag_enabled {
            log::debug!("Viewport panning resumed");
        }
        self.drag_enabled = true;
    }

    fn is_drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    fn pan(&mut self, delta: Vec2) -> bool {
        if !self.drag_enabled {
            return false;
        }
        self.offset += delta;
        true
    }

    fn zoom_at(&mut self, screen_point: Point, factor: f64) -> bool {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }

        // Keep the world point under the cursor fixed
        let world_point = self.to_world(screen_point);
        self.zoom = new_zoom;
        let new_screen = self.to_screen(world_point);
        self.offset += screen_point - new_screen;
        true
    }

    fn width(&self) -> f64 {
        self.size.width
    }

    fn height(&self) -> f64 {
        self.size.height
    }

    fn zoom_scale(&self) -> f64 {
        self.zoom
    }
}
