//! Scribble Core Library
//!
//! Platform-agnostic geometry, hit-testing and history for the Scribble
//! whiteboard. Rendering and raw input wiring live outside this crate.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod render;
pub mod selection;
pub mod shapes;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument};
pub use config::{EngineConfig, Tolerances};
pub use error::{CoreError, CoreResult};
pub use geometry::Anchors;
pub use history::HistoryStore;
pub use input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent, Shortcut};
pub use render::ShapeRenderer;
pub use selection::{CursorIcon, Hit, Zone, apply_resize, resolve, zone_to_cursor};
pub use shapes::{Shape, ShapeId, ShapeKind, append_point, create_shape, normalize_corners, rescale_stroke};
pub use tools::{Gesture, ToolKind, ToolManager};
