//! Interactive tools driven by canvas input.

mod polygon;

pub use polygon::{CaptureSession, PolygonCaptureTool};
