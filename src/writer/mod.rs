//! Drawing writers that persist planned output files.
//!
//! A writer renders one [`OutputFile`] into bytes. Persisting is shared:
//! the bytes go to a hidden sibling file first and are renamed into place,
//! so a failed write never leaves a truncated drawing behind.
//!
//! # Example
//!
//! ```no_run
//! use pdf2dxf::writer::WriterRegistry;
//! use std::path::Path;
//!
//! let registry = WriterRegistry::with_defaults();
//! let writer = registry.for_path(Path::new("drawing.dxf"))?;
//! assert_eq!(writer.name(), "dxf");
//! # Ok::<(), pdf2dxf::Error>(())
//! ```

mod dxf;
mod json;
mod registry;

pub use self::dxf::DxfWriter;
pub use self::json::{to_json, JsonFormat, JsonWriter};
pub use self::registry::WriterRegistry;

use std::fs;
use std::path::{Path, PathBuf};

use crate::convert::OutputFile;
use crate::error::Result;

/// Trait for output drawing writers.
///
/// Implement this trait to add support for a new output format.
pub trait DrawingWriter: Send + Sync {
    /// Get the supported file extensions for this writer.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["dxf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this writer.
    fn name(&self) -> &str;

    /// Render a planned file into its serialized form.
    fn render(&self, file: &OutputFile) -> Result<Vec<u8>>;

    /// Render and persist a planned file at its path.
    fn write(&self, file: &OutputFile) -> Result<()> {
        let bytes = self.render(file)?;
        write_atomic(&file.path, &bytes)
    }

    /// Check if this writer supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Write `bytes` to `path` through a temporary sibling and a rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = partial_path(path);
    if let Err(e) = fs::write(&tmp, bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.partial", name))
}
