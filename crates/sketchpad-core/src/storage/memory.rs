//! In-memory storage implementation.

use super::{DrawingFile, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Drawings are kept as XML text, so a save/load cycle goes through the same
/// codec as the file backend.
#[derive(Default)]
pub struct MemoryStorage {
    drawings: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw XML text under `key`.
    pub fn insert_raw(&self, key: &str, xml: impl Into<String>) -> StorageResult<()> {
        let mut drawings = self
            .drawings
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        drawings.insert(key.to_string(), xml.into());
        Ok(())
    }

    /// Stored XML text for `key`.
    pub fn raw(&self, key: &str) -> StorageResult<String> {
        let drawings = self
            .drawings
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        drawings
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, drawing: &DrawingFile) -> StorageResult<()> {
        let xml = drawing.to_xml()?;
        self.insert_raw(key, xml)
    }

    fn load(&self, key: &str) -> StorageResult<DrawingFile> {
        DrawingFile::from_xml(&self.raw(key)?)
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let drawings = self
            .drawings
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(drawings.contains_key(key))
    }
}
