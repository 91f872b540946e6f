//! Conversion statistics.

use crate::model::EntityKind;
use serde::{Deserialize, Serialize};

/// Counts collected while translating pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Total number of pages processed
    pub page_count: u32,

    /// Line entities produced
    pub line_count: u32,

    /// Polyline entities produced
    pub polyline_count: u32,

    /// Curve entities produced
    pub curve_count: u32,

    /// Text entities produced
    pub text_count: u32,

    /// Drawing commands without an output mapping
    pub skipped_commands: u32,

    /// Whitespace-only text spans
    pub skipped_spans: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment page count.
    pub fn add_page(&mut self) {
        self.page_count += 1;
    }

    /// Count a produced entity.
    pub fn add_entity(&mut self, kind: &EntityKind) {
        match kind {
            EntityKind::Line { .. } => self.line_count += 1,
            EntityKind::Polyline { .. } => self.polyline_count += 1,
            EntityKind::Curve { .. } => self.curve_count += 1,
            EntityKind::Text { .. } => self.text_count += 1,
        }
    }

    /// Count a dropped drawing command.
    pub fn skip_command(&mut self) {
        self.skipped_commands += 1;
    }

    /// Count a dropped text span.
    pub fn skip_span(&mut self) {
        self.skipped_spans += 1;
    }

    /// Total entities produced.
    pub fn entity_count(&self) -> u32 {
        self.line_count + self.polyline_count + self.curve_count + self.text_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ConversionStats) {
        self.page_count += other.page_count;
        self.line_count += other.line_count;
        self.polyline_count += other.polyline_count;
        self.curve_count += other.curve_count;
        self.text_count += other.text_count;
        self.skipped_commands += other.skipped_commands;
        self.skipped_spans += other.skipped_spans;
    }
}
