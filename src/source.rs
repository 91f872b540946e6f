//! Loading decoded page dumps.
//!
//! The page-content decoder runs outside this crate and hands over its
//! result as JSON: either a full [`Document`] object or a bare array of
//! pages. Raw PDF input is recognized and rejected with a descriptive
//! error.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Document, Page};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Kind of input handed to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// A decoded page dump (JSON object or array)
    PageDump,
    /// A raw PDF file
    Pdf,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::PageDump => write!(f, "decoded page dump"),
            SourceFormat::Pdf => write!(f, "PDF"),
        }
    }
}

/// Detect the source format from the leading bytes.
///
/// Leading whitespace and a UTF-8 BOM are skipped before looking for a
/// JSON opener.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SourceFormat> {
    if data.starts_with(PDF_MAGIC) {
        return Ok(SourceFormat::Pdf);
    }

    let data = data.strip_prefix(b"\xef\xbb\xbf").unwrap_or(data);
    match data.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') | Some(b'[') => Ok(SourceFormat::PageDump),
        _ => Err(Error::UnknownFormat),
    }
}

/// Load a decoded document from a file.
///
/// # Example
///
/// ```no_run
/// let doc = pdf2dxf::source::load_document("pages.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let doc = load_reader(BufReader::new(file))?;
    log::info!(
        "Loaded {} page(s) from {}",
        doc.page_count(),
        path.display()
    );
    Ok(doc)
}

/// Load a decoded document from a reader.
pub fn load_reader<R: Read>(mut reader: R) -> Result<Document> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    from_bytes(&data)
}

/// Load a decoded document from bytes.
pub fn from_bytes(data: &[u8]) -> Result<Document> {
    match detect_format_from_bytes(data)? {
        SourceFormat::Pdf => {
            return Err(Error::UnsupportedSource(
                "raw PDF input; decode its pages to a JSON page dump first".into(),
            ))
        }
        SourceFormat::PageDump => {}
    }

    let data = data.strip_prefix(b"\xef\xbb\xbf").unwrap_or(data);
    let value: serde_json::Value = serde_json::from_slice(data)?;
    let mut doc = if value.is_array() {
        Document::from_pages(serde_json::from_value::<Vec<Page>>(value)?)
    } else {
        serde_json::from_value::<Document>(value)?
    };

    normalize(&mut doc)?;
    Ok(doc)
}

/// Re-index pages to their position and validate page dimensions.
fn normalize(doc: &mut Document) -> Result<()> {
    for (position, page) in doc.pages.iter_mut().enumerate() {
        if page.index != position {
            log::debug!(
                "Page at position {} declared index {}, re-indexed",
                position,
                page.index
            );
            page.index = position;
        }

        for (name, value) in [("width", page.width), ("height", page.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Decode(format!(
                    "page {} has invalid {}: {}",
                    position, name, value
                )));
            }
        }
    }
    Ok(())
}
