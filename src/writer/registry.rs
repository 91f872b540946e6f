use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::{DrawingWriter, DxfWriter, JsonWriter};
use crate::error::{Error, Result};

/// Registry for drawing writers.
///
/// Maps output file extensions to writers, so the destination path picks
/// the output format.
pub struct WriterRegistry {
    writers: HashMap<String, Arc<dyn DrawingWriter>>,
}

impl WriterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            writers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in writers (DXF, JSON).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DxfWriter::new()));
        registry.register(Arc::new(JsonWriter::new()));
        registry
    }

    /// Register a writer for all its supported extensions.
    pub fn register(&mut self, writer: Arc<dyn DrawingWriter>) {
        for ext in writer.supported_extensions() {
            self.writers.insert(ext.to_lowercase(), writer.clone());
        }
    }

    /// Get a writer by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DrawingWriter>> {
        self.writers.get(&ext.to_lowercase()).cloned()
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.writers.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Pick the writer for an output path by its extension.
    pub fn for_path(&self, path: &Path) -> Result<Arc<dyn DrawingWriter>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::NoWriter(format!("{} has no extension", path.display())))?;

        self.get_by_extension(ext).ok_or_else(|| {
            Error::NoWriter(format!(
                "no writer for extension: {} (supported: {})",
                ext,
                self.supported_extensions().join(", ")
            ))
        })
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
