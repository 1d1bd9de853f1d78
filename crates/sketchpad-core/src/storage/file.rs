//! File-based storage.

use super::{DrawingFile, Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage.
///
/// Stores drawings as XML files. Keys are paths resolved against the base
/// directory (absolute keys are used as is); `.xml` is appended to keys
/// without an extension.
pub struct FileStorage {
    /// Base directory for relative keys.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Resolve a key to the file it is stored in.
    pub fn drawing_path(&self, key: &str) -> PathBuf {
        let mut path = self.base_path.join(key);
        if path.extension().is_none() {
            path.set_extension("xml");
        }
        path
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

/// Sibling file used to stage a write before it replaces the target.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

impl Storage for FileStorage {
    fn save(&self, key: &str, drawing: &DrawingFile) -> StorageResult<()> {
        let path = self.drawing_path(key);
        let xml = drawing.to_xml()?;

        let staging = staging_path(&path);
        fs::write(&staging, xml).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", staging.display(), e))
        })?;
        fs::rename(&staging, &path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            StorageError::Io(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        log::info!("saved {} elements to {}", drawing.len(), path.display());
        Ok(())
    }

    fn load(&self, key: &str) -> StorageResult<DrawingFile> {
        let path = self.drawing_path(key);
        if !path.exists() {
            return Err(StorageError::NotFound(path.display().to_string()));
        }

        let xml = fs::read_to_string(&path).map_err(|e| {
            StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let drawing = DrawingFile::from_xml(&xml).map_err(|e| match e {
            StorageError::Serialization(msg) => {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), msg))
            }
            other => other,
        })?;
        log::info!("read {} elements from {}", drawing.len(), path.display());
        Ok(drawing)
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.drawing_path(key).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ShapeRegistry;
    use crate::shapes::{CanvasPoint, CornerStyle};
    use tempfile::tempdir;

    fn sample() -> DrawingFile {
        let mut registry = ShapeRegistry::new();
        registry.add_line(CanvasPoint::new(10, 10), CanvasPoint::new(100, 100));
        registry.add_rectangle(CanvasPoint::new(0, 0), CanvasPoint::new(20, 20), CornerStyle::Rounded);
        DrawingFile::from_registry(&registry)
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        let drawing = sample();

        storage.save("scene", &drawing).unwrap();
        assert!(dir.path().join("scene.xml").exists());

        let loaded = storage.load("scene").unwrap();
        assert_eq!(loaded, drawing);
    }

    #[test]
    fn test_file_storage_keeps_extension() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.save("scene.drawing", &sample()).unwrap();
        assert!(dir.path().join("scene.drawing").exists());
        assert!(storage.exists("scene.drawing").unwrap());
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        let result = storage.load("nonexistent");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert!(!storage.exists("nonexistent").unwrap());
    }

    #[test]
    fn test_file_storage_malformed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.xml"), "<drawing><line>").unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        let result = storage.load("broken");
        assert!(matches!(result, Err(StorageError::Serialization(msg)) if msg.contains("broken.xml")));
    }

    #[test]
    fn test_failed_save_leaves_target_intact() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        storage.save("scene", &sample()).unwrap();
        let before = fs::read_to_string(dir.path().join("scene.xml")).unwrap();

        // Staging into a missing directory fails before the target is touched.
        let result = storage.save("missing/scene", &DrawingFile::default());
        assert!(matches!(result, Err(StorageError::Io(_))));

        let after = fs::read_to_string(dir.path().join("scene.xml")).unwrap();
        assert_eq!(before, after);
        assert!(!staging_path(&dir.path().join("scene.xml")).exists());
    }

    #[test]
    fn test_creates_base_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }
}
