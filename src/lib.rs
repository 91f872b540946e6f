//! # pdf2dxf
//!
//! Conversion of decoded PDF vector pages into layered DXF drawings.
//!
//! The crate takes pages already decoded into drawing commands and text
//! spans, flips them from page-local coordinates (origin top-left, Y down)
//! into drawing coordinates (origin bottom-left, Y up), classifies every
//! entity onto a geometry or text layer, and writes one drawing per page
//! or a single merged drawing with pages side by side.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf2dxf::{convert_file, ConvertOptions};
//!
//! fn main() -> pdf2dxf::Result<()> {
//!     let options = ConvertOptions::new().merged();
//!     let report = convert_file("pages.json", "drawing.dxf", &options)?;
//!     for path in &report.files {
//!         println!("wrote {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layered output**: geometry on `PDF_GEOMETRY`, text on `PDF_TEXT`
//! - **Split or merged layout**: one file per page, or all pages in a row
//! - **Exact curves**: cubic Beziers written as clamped degree-3 splines
//! - **Parallel processing**: uses Rayon to translate pages concurrently
//! - **Pluggable writers**: DXF and JSON built in, selected by extension

pub mod convert;
pub mod error;
pub mod model;
pub mod source;
pub mod writer;

// Re-export commonly used types
pub use convert::{
    ConversionReport, ConversionStats, ConvertOptions, DocumentAssembler, LayoutMode, OutputFile,
    OutputPlan, PageSelection, Pipeline, Warning,
};
pub use error::{Error, Result};
pub use model::{
    AnchorCorner, Document, DrawingCommand, EntityBatch, EntityKind, LayerId, OutputEntity, Page,
    Point, TextSpan,
};
pub use source::load_document;
pub use writer::{DrawingWriter, DxfWriter, JsonWriter, WriterRegistry};

use std::path::Path;

/// Convert a decoded page dump into drawing files.
///
/// The output format is chosen by the extension of `output`; in split
/// layout it also serves as the template for per-page file names.
///
/// # Example
///
/// ```no_run
/// use pdf2dxf::{convert_file, ConvertOptions, PageSelection};
///
/// let options = ConvertOptions::new().with_pages(PageSelection::parse("0-2").unwrap());
/// let report = convert_file("pages.json", "out/plan.dxf", &options).unwrap();
/// assert!(report.is_success());
/// ```
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let doc = load_document(input)?;
    convert_document(&doc, output, options)
}

/// Convert an already loaded document into drawing files.
pub fn convert_document<Q: AsRef<Path>>(
    doc: &Document,
    output: Q,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let output = output.as_ref();
    let writer = WriterRegistry::with_defaults().for_path(output)?;
    Pipeline::new(writer)
        .with_options(options.clone())
        .run(doc, output)
}

/// Plan the output of a conversion without writing anything.
pub fn plan_document<Q: AsRef<Path>>(
    doc: &Document,
    output: Q,
    options: &ConvertOptions,
) -> Result<(OutputPlan, Vec<Warning>)> {
    let output = output.as_ref();
    let writer = WriterRegistry::with_defaults().for_path(output)?;
    Pipeline::new(writer)
        .with_options(options.clone())
        .plan(doc, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_page_doc() -> Document {
        let mut doc = Document::new();
        doc.add_page(
            Page::new(0, 100.0, 100.0).with_command(DrawingCommand::line((0.0, 0.0), (10.0, 10.0))),
        );
        doc.add_page(Page::new(0, 100.0, 100.0).with_span(TextSpan::new("B", 8.0, (1.0, 2.0))));
        doc
    }

    #[test]
    fn test_convert_document_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.dxf");
        let report = convert_document(&two_page_doc(), &output, &ConvertOptions::new()).unwrap();
        assert_eq!(report.mode, LayoutMode::PerPage);
        assert_eq!(report.files.len(), 2);
        assert!(dir.path().join("out_page_1.dxf").exists());
        assert!(dir.path().join("out_page_2.dxf").exists());
        assert!(!output.exists());
    }

    #[test]
    fn test_plan_document_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let (plan, warnings) =
            plan_document(&two_page_doc(), &output, &ConvertOptions::new().merged()).unwrap();
        assert_eq!(plan.files.len(), 1);
        assert!(warnings.is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn test_unknown_output_extension() {
        let result = convert_document(&two_page_doc(), "out.svg", &ConvertOptions::new());
        assert!(matches!(result, Err(Error::NoWriter(_))));
    }

    #[test]
    fn test_convert_missing_input() {
        let result = convert_file("no/such/pages.json", "out.dxf", &ConvertOptions::new());
        assert!(matches!(result, Err(Error::SourceNotFound(_))));
    }
}
