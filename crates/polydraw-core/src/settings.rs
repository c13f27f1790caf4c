//! Canvas settings.

use crate::config::DEFAULT_BACKGROUND;
use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};

/// Tunable behavior of the canvas and its polygon capture tool.
///
/// Missing fields fall back to their defaults when loading from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Radius (world units) around the first committed point that snaps the cursor onto it.
    pub closing_snap_radius: f64,
    /// Radius of the marker drawn at each committed point.
    pub marker_radius: f64,
    /// Fill color used when a shape config omits one (0xRRGGBB).
    pub default_background: u32,
    /// Opacity applied to an object while it is dragged.
    pub drag_alpha: f64,
    /// Key that enables axis-constrained snapping while held.
    pub constraint_key: String,
    /// Key that aborts an open capture session.
    pub cancel_key: String,
    /// Font size of segment length labels.
    pub label_font_size: f64,
    /// Zoom factor applied per scroll notch.
    pub zoom_step: f64,
    /// Minimum viewport zoom.
    pub min_zoom: f64,
    /// Maximum viewport zoom.
    pub max_zoom: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            closing_snap_radius: 5.0,
            marker_radius: 5.0,
            default_background: DEFAULT_BACKGROUND,
            drag_alpha: 0.5,
            constraint_key: "Shift".to_string(),
            cancel_key: "Escape".to_string(),
            label_font_size: 12.0,
            zoom_step: 1.1,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl CanvasSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to pretty-printed JSON.
    pub fn to_json(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is within its usable range.
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.closing_snap_radius >= 0.0) {
            return Err(SettingsError::Invalid(format!(
                "closing_snap_radius must be non-negative, got {}",
                self.closing_snap_radius
            )));
        }
        if !(self.marker_radius >= 0.0) {
            return Err(SettingsError::Invalid(format!(
                "marker_radius must be non-negative, got {}",
                self.marker_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.drag_alpha) {
            return Err(SettingsError::Invalid(format!(
                "drag_alpha must be within [0, 1], got {}",
                self.drag_alpha
            )));
        }
        if !(self.zoom_step > 1.0) {
            return Err(SettingsError::Invalid(format!(
                "zoom_step must be greater than 1, got {}",
                self.zoom_step
            )));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(SettingsError::Invalid(format!(
                "zoom range [{}, {}] is empty or non-positive",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.constraint_key == self.cancel_key {
            return Err(SettingsError::Invalid(format!(
                "constraint_key and cancel_key must differ, both are {:?}",
                self.cancel_key
            )));
        }
        Ok(())
    }
}
