//! Page-level types as delivered by the page-content decoder.

use super::Point;
use serde::{Deserialize, Serialize};

/// A single decoded source page.
///
/// Coordinates of every command and span are page-local: origin at the
/// top-left corner, Y growing downward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page index in the source document (0-indexed)
    #[serde(default)]
    pub index: usize,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f64,

    /// Page height in points
    pub height: f64,

    /// Drawing commands in paint order
    #[serde(default)]
    pub commands: Vec<DrawingCommand>,

    /// Text spans in reading order
    #[serde(default)]
    pub spans: Vec<TextSpan>,
}

impl Page {
    /// Create a new empty page with the given dimensions.
    pub fn new(index: usize, width: f64, height: f64) -> Self {
        Self {
            index,
            width,
            height,
            commands: Vec::new(),
            spans: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(index: usize) -> Self {
        Self::new(index, 612.0, 792.0)
    }

    /// Create a new page with standard A4 size (210 x 297 mm).
    pub fn a4(index: usize) -> Self {
        Self::new(index, 595.0, 842.0)
    }

    /// Add a drawing command.
    pub fn add_command(&mut self, command: DrawingCommand) {
        self.commands.push(command);
    }

    /// Add a text span.
    pub fn add_span(&mut self, span: TextSpan) {
        self.spans.push(span);
    }

    /// Builder form of [`Page::add_command`].
    pub fn with_command(mut self, command: DrawingCommand) -> Self {
        self.add_command(command);
        self
    }

    /// Builder form of [`Page::add_span`].
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.add_span(span);
        self
    }

    /// Check if the page carries neither drawings nor text.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.spans.is_empty()
    }

    /// 1-based ordinal of the page in its source document.
    pub fn ordinal(&self) -> usize {
        self.index + 1
    }
}

/// One decoded drawing primitive.
///
/// Decoders may emit kinds this crate does not know; they deserialize
/// into [`DrawingCommand::Unsupported`] and are skipped during translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawingCommand {
    /// Straight segment
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
    },

    /// Cubic Bezier segment, given by its four control points
    Curve {
        /// Start point
        p0: Point,
        /// First control point
        p1: Point,
        /// Second control point
        p2: Point,
        /// End point
        p3: Point,
    },

    /// Axis-aligned rectangle
    Rect {
        /// Left edge
        x0: f64,
        /// Top edge
        y0: f64,
        /// Right edge
        x1: f64,
        /// Bottom edge
        y1: f64,
    },

    /// Any primitive the decoder produced that has no output mapping
    #[serde(other)]
    Unsupported,
}

impl DrawingCommand {
    /// Create a line segment.
    pub fn line(from: impl Into<Point>, to: impl Into<Point>) -> Self {
        DrawingCommand::Line {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a cubic Bezier segment.
    pub fn curve(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        DrawingCommand::Curve {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Create a rectangle from two opposite corners.
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        DrawingCommand::Rect { x0, y0, x1, y1 }
    }
}

/// A run of text sharing one font size and baseline origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// Text content, possibly whitespace only
    pub text: String,

    /// Font size in points
    pub font_size: f64,

    /// Baseline-left origin in page-local coordinates
    pub origin: Point,
}

impl TextSpan {
    /// Create a new text span.
    pub fn new(text: impl Into<String>, font_size: f64, origin: impl Into<Point>) -> Self {
        Self {
            text: text.into(),
            font_size,
            origin: origin.into(),
        }
    }

    /// Check if the span carries visible content.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
