//! Error types.

use crate::shapes::ShapeId;
use thiserror::Error;

/// Interaction requests that conflict with the current canvas state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("Object {0} is being dragged")]
    DragInProgress(ShapeId),
    #[error("A polygon capture session is open")]
    CaptureInProgress,
    #[error("Unknown object: {0}")]
    UnknownObject(ShapeId),
}

/// Settings loading and validation errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Result type for interaction requests.
pub type InteractionResult<T> = Result<T, InteractionError>;

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
