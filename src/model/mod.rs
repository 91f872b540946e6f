//! Document model types for source pages and output drawings.
//!
//! The source side (`Document`, `Page`, `DrawingCommand`, `TextSpan`) is
//! what the page-content decoder hands over, in page-local coordinates.
//! The output side (`OutputEntity`, `EntityBatch`, `LayerSet`) is what the
//! drawing writers consume, in output coordinates.

mod document;
mod entity;
mod geometry;
mod page;

pub use document::{Document, Metadata};
pub use entity::{
    AnchorCorner, EntityBatch, EntityKind, Layer, LayerId, LayerSet, OutputEntity,
};
pub use geometry::{Bounds, Point};
pub use page::{DrawingCommand, Page, TextSpan};
