//! JSON dump of planned output files.

use super::DrawingWriter;
use crate::convert::OutputFile;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a planned file, layers and entities included.
pub fn to_json(file: &OutputFile, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(file),
        JsonFormat::Compact => serde_json::to_string(file),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Writes planned files as JSON, for inspection and diffing.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    format: JsonFormat,
}

impl JsonWriter {
    /// Create a pretty-printing JSON writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl DrawingWriter for JsonWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, file: &OutputFile) -> Result<Vec<u8>> {
        to_json(file, self.format).map(String::into_bytes)
    }
}
