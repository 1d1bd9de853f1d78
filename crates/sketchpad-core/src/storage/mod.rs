//! Storage abstraction for persistence.

mod file;
mod memory;
mod xml;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use xml::{DrawingFile, Element, LineElement, RectangleElement, XmlPoint};

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Drawing not found: {0}")]
    NotFound(String),
    /// The document could not be encoded or is not well-formed XML.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The document parsed but an element carries unusable content.
    #[error("Format error: {0}")]
    Format(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for drawing storage backends.
///
/// Keys are backend specific: a path relative to the base directory for
/// [`FileStorage`], an arbitrary name for [`MemoryStorage`].
pub trait Storage: Send + Sync {
    /// Save a drawing. Nothing is written unless the whole document encodes.
    fn save(&self, key: &str, drawing: &DrawingFile) -> StorageResult<()>;

    /// Load and parse a drawing.
    fn load(&self, key: &str) -> StorageResult<DrawingFile>;

    /// Check if a drawing exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}
