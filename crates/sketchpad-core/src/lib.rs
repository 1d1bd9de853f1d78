//! Sketchpad Core Library
//!
//! Shape registry, hit-testing, selection, grouping and XML persistence for
//! the sketchpad drawing surface.

pub mod canvas;
pub mod config;
pub mod error;
pub mod grouping;
pub mod hit;
pub mod notification;
pub mod registry;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use canvas::Canvas;
pub use config::CanvasConfig;
pub use error::{CanvasError, CanvasResult};
pub use hit::{
    HitTolerance, Hits, hits_with, point_near_rectangle_border, point_near_segment, resolve, resolve_with,
};
pub use notification::{Notification, NotificationLevel};
pub use registry::ShapeRegistry;
pub use selection::{SelectionManager, SelectionMode};
pub use shapes::{Appearance, CanvasPoint, CornerStyle, Dash, Shape, ShapeId, StrokeColor};
pub use storage::{DrawingFile, FileStorage, MemoryStorage, Storage, StorageError};
pub use tools::{InteractionMode, ToolKind, ToolManager};
