//! Canvas-level errors.

use crate::shapes::ShapeId;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors raised by registry, grouping and persistence operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Grouping needs at least two distinct entries.
    #[error("Select at least two objects to group (got {0})")]
    InsufficientSelection(usize),
    /// The identity is not a current top-level entry.
    #[error("Shape not found: {0}")]
    NotFound(ShapeId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
