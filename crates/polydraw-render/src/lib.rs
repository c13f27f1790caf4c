//! PolyDraw Render Library
//!
//! Rendering surfaces for PolyDraw. The default implementation records one
//! Vello scene fragment per texture and composes frames from them.

mod paint;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use paint::{paint_color, visual_transform};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloSurface;
