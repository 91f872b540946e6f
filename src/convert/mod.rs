//! Conversion of decoded pages into planned output drawings.
//!
//! The pieces, leaf first:
//!
//! - [`transform`] maps a page-local point into output space.
//! - [`translate_command`] and [`translate_span`] turn one source primitive
//!   into at most one output entity.
//! - [`process_page`] drives both over a page into an [`EntityBatch`].
//! - [`DocumentAssembler`] decides merged vs split output and builds the
//!   [`OutputPlan`].
//! - [`Pipeline`] resolves the page selection, plans, and writes.
//!
//! # Example
//!
//! ```
//! use pdf2dxf::convert::{DocumentAssembler, LayoutMode};
//! use pdf2dxf::model::{DrawingCommand, Page};
//!
//! let page = Page::new(0, 100.0, 100.0)
//!     .with_command(DrawingCommand::line((0.0, 0.0), (10.0, 10.0)));
//! let plan = DocumentAssembler::new()
//!     .assemble("out.dxf", &[&page], LayoutMode::Merged)
//!     .unwrap();
//! assert_eq!(plan.files.len(), 1);
//! assert_eq!(plan.files[0].entity_count(), 1);
//! ```
//!
//! [`EntityBatch`]: crate::model::EntityBatch

mod assemble;
mod options;
mod page;
mod pipeline;
mod stats;
mod translate;

pub use assemble::{page_output_path, DocumentAssembler, OutputFile, OutputPlan, Placement};
pub use options::{ConvertOptions, LayoutMode, PageSelection, DEFAULT_PAGE_GAP};
pub use page::{process_page, process_page_with_stats};
pub use pipeline::{resolve_pages, ConversionReport, Pipeline, ResolvedPages, Warning};
pub use stats::ConversionStats;
pub use translate::{transform, translate_command, translate_span};
