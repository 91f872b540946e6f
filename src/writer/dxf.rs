//! DXF output through the `dxf` crate.

use ::dxf::entities::{Entity, EntityType, Line, LwPolyline, MText, Spline};
use ::dxf::enums::{AcadVersion, AttachmentPoint};
use ::dxf::tables::Layer as DxfLayer;
use ::dxf::{Color, Drawing, LwPolylineVertex};

use super::DrawingWriter;
use crate::convert::OutputFile;
use crate::error::Result;
use crate::model::{AnchorCorner, EntityKind, OutputEntity, Point};

/// Knot vector of a clamped cubic with four control points: the curve
/// is exactly the cubic Bezier through those points.
const BEZIER_KNOTS: [f64; 8] = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];

/// Longest value written to a single MTEXT string group, in bytes.
const MTEXT_CHUNK_LEN: usize = 250;

/// Writes planned files as AutoCAD R2000 ASCII DXF.
#[derive(Debug, Clone)]
pub struct DxfWriter {
    version: AcadVersion,
}

impl DxfWriter {
    /// Create a DXF writer targeting R2000.
    pub fn new() -> Self {
        Self {
            version: AcadVersion::R2000,
        }
    }

    /// Target a different DXF version.
    ///
    /// LWPOLYLINE, SPLINE and MTEXT need R13 or later.
    pub fn with_version(mut self, version: AcadVersion) -> Self {
        self.version = version;
        self
    }

    /// Build the in-memory drawing for a planned file.
    pub fn to_drawing(&self, file: &OutputFile) -> Drawing {
        let mut drawing = Drawing::new();
        drawing.header.version = self.version;

        for layer in file.layers.iter() {
            let mut dxf_layer = DxfLayer::default();
            dxf_layer.name = layer.name.clone();
            dxf_layer.color = Color::from_index(layer.color);
            drawing.add_layer(dxf_layer);
        }

        for entity in file.entities() {
            let layer_name = file
                .layers
                .get(entity.layer)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| entity.layer.name().to_string());
            let mut dxf_entity = Entity::new(convert_entity(entity));
            dxf_entity.common.layer = layer_name;
            drawing.add_entity(dxf_entity);
        }

        if let Some(bounds) = file.bounds() {
            drawing.header.minimum_drawing_extents = to_dxf_point(bounds.min);
            drawing.header.maximum_drawing_extents = to_dxf_point(bounds.max);
        }

        drawing
    }
}

impl Default for DxfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingWriter for DxfWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["dxf"]
    }

    fn name(&self) -> &str {
        "dxf"
    }

    fn render(&self, file: &OutputFile) -> Result<Vec<u8>> {
        let drawing = self.to_drawing(file);
        let mut buf = Vec::new();
        drawing.save(&mut buf)?;
        Ok(buf)
    }
}

fn to_dxf_point(p: Point) -> ::dxf::Point {
    ::dxf::Point::new(p.x, p.y, 0.0)
}

fn convert_entity(entity: &OutputEntity) -> EntityType {
    match &entity.kind {
        EntityKind::Line { start, end } => {
            let mut line = Line::default();
            line.p1 = to_dxf_point(*start);
            line.p2 = to_dxf_point(*end);
            EntityType::Line(line)
        }

        EntityKind::Polyline { points, closed } => {
            let mut lwpoly = LwPolyline::default();
            lwpoly.set_is_closed(*closed);
            lwpoly.vertices = points
                .iter()
                .map(|p| {
                    let mut vertex = LwPolylineVertex::default();
                    vertex.x = p.x;
                    vertex.y = p.y;
                    vertex
                })
                .collect();
            EntityType::LwPolyline(lwpoly)
        }

        EntityKind::Curve {
            control_points,
            degree,
        } => {
            let mut spline = Spline::default();
            spline.degree_of_curve = i32::from(*degree);
            spline.knot_values = BEZIER_KNOTS.to_vec();
            spline.control_points = control_points.iter().copied().map(to_dxf_point).collect();
            EntityType::Spline(spline)
        }

        EntityKind::Text {
            content,
            height,
            anchor,
            anchor_corner,
        } => {
            let mut mtext = MText::default();
            mtext.insertion_point = to_dxf_point(*anchor);
            mtext.initial_text_height = *height;
            mtext.attachment_point = match anchor_corner {
                AnchorCorner::BottomLeft => AttachmentPoint::BottomLeft,
            };
            // Leading chunks go to group 3, the tail to group 1.
            let mut chunks = mtext_chunks(content);
            mtext.text = chunks.pop().unwrap_or_default();
            mtext.extended_text = chunks;
            EntityType::MText(mtext)
        }
    }
}

/// Escape MTEXT control characters and split the result into string
/// groups of at most [`MTEXT_CHUNK_LEN`] bytes.
///
/// Escape sequences are never split across chunks. Always returns at
/// least one chunk.
fn mtext_chunks(s: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut buf = [0u8; 4];
    for c in s.chars() {
        let token: &str = match c {
            '\\' => "\\\\",
            '{' => "\\{",
            '}' => "\\}",
            '\n' => "\\P",
            '\r' => continue,
            _ => c.encode_utf8(&mut buf),
        };
        if current.len() + token.len() > MTEXT_CHUNK_LEN {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(token);
    }
    chunks.push(current);
    chunks
}
