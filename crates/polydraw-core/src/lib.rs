//! PolyDraw Core Library
//!
//! Platform-agnostic core of the PolyDraw canvas: interactive polygon capture
//! and draggable, texture-backed scene objects. Rendering, windowing and the
//! scene graph are reached through the collaborator traits in [`surface`],
//! [`viewport`] and [`host`].

pub mod canvas;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod host;
pub mod input;
pub mod object;
pub mod settings;
pub mod shapes;
pub mod snap;
pub mod surface;
pub mod tools;
pub mod viewport;

pub use canvas::Canvas;
pub use config::{ShapeConfig, ShapeConfigBuilder, DEFAULT_BACKGROUND};
pub use error::{InteractionError, SettingsError};
pub use events::{EventHub, PointerKind, Subscription, SubscriptionId};
pub use geometry::HitArea;
pub use host::{DESTROYED_HISTORY, NodeId, SceneGraph, SceneHost};
pub use input::{KeyEvent, MouseButton, PointerEvent};
pub use object::{DragState, SceneContext, SceneObject, Visual};
pub use settings::CanvasSettings;
pub use shapes::{Circle, Line, LineStyle, Polygon, Rgba, Shape, ShapeId, ShapeTrait};
pub use snap::{AxisLock, SnapResult};
pub use surface::{MemorySurface, RenderingSurface, TextStyle, TextureHandle, VectorPath};
pub use tools::{CaptureSession, PolygonCaptureTool};
pub use viewport::{CameraViewport, Viewport};
