//! Output-side entity and layer types.
//!
//! Entities are expressed in output space: origin bottom-left, Y up.

use super::{Bounds, Point};
use serde::{Deserialize, Serialize};

/// Semantic layer an entity is classified onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerId {
    /// Vector geometry (lines, rectangles, curves)
    Geometry,
    /// Text annotations
    Text,
}

impl LayerId {
    /// All layers, in table order.
    pub const ALL: [LayerId; 2] = [LayerId::Geometry, LayerId::Text];

    /// Layer name written to the output drawing.
    pub fn name(self) -> &'static str {
        match self {
            LayerId::Geometry => "PDF_GEOMETRY",
            LayerId::Text => "PDF_TEXT",
        }
    }

    /// Default AutoCAD color index of the layer.
    pub fn default_color(self) -> u8 {
        match self {
            LayerId::Geometry => 7,
            LayerId::Text => 1,
        }
    }
}

/// A layer table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Which semantic layer this entry describes
    pub id: LayerId,

    /// Layer name
    pub name: String,

    /// AutoCAD color index (1-255)
    pub color: u8,
}

impl Layer {
    /// Create the default entry for a layer id.
    pub fn new(id: LayerId) -> Self {
        Self {
            id,
            name: id.name().to_string(),
            color: id.default_color(),
        }
    }
}

/// The layer table of one output file.
///
/// Every output file owns a fresh set; entries are never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSet {
    layers: Vec<Layer>,
}

impl LayerSet {
    /// Create the standard geometry + text layer set.
    pub fn new() -> Self {
        Self {
            layers: LayerId::ALL.iter().copied().map(Layer::new).collect(),
        }
    }

    /// Look up a layer entry.
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Iterate over layer entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if the set has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Which corner of a text box its anchor point refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorCorner {
    /// Anchor is the bottom-left corner of the text box, on the baseline
    #[default]
    BottomLeft,
}

/// Geometry of one output entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    /// Straight line
    Line {
        /// Start point
        start: Point,
        /// End point
        end: Point,
    },

    /// Lightweight polyline
    Polyline {
        /// Vertices in order
        points: Vec<Point>,
        /// Whether the polyline is flagged closed
        closed: bool,
    },

    /// Cubic curve defined by control points
    Curve {
        /// The four control points
        control_points: [Point; 4],
        /// Curve degree (always 3)
        degree: u8,
    },

    /// Text annotation
    Text {
        /// Text content, untrimmed
        content: String,
        /// Character height
        height: f64,
        /// Anchor point
        anchor: Point,
        /// Corner the anchor refers to
        anchor_corner: AnchorCorner,
    },
}

impl EntityKind {
    /// Points spanned by the entity, used for extents.
    pub fn points(&self) -> Vec<Point> {
        match self {
            EntityKind::Line { start, end } => vec![*start, *end],
            EntityKind::Polyline { points, .. } => points.clone(),
            EntityKind::Curve { control_points, .. } => control_points.to_vec(),
            EntityKind::Text { anchor, .. } => vec![*anchor],
        }
    }

    /// Short type name, e.g. for logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::Line { .. } => "line",
            EntityKind::Polyline { .. } => "polyline",
            EntityKind::Curve { .. } => "curve",
            EntityKind::Text { .. } => "text",
        }
    }
}

/// A drawable primitive tagged with its layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEntity {
    /// Layer classification
    pub layer: LayerId,

    /// Entity geometry
    #[serde(flatten)]
    pub kind: EntityKind,
}

impl OutputEntity {
    /// Create an entity on a layer.
    pub fn new(layer: LayerId, kind: EntityKind) -> Self {
        Self { layer, kind }
    }

    /// Bounds of the entity's points.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(self.kind.points())
    }
}

/// All entities produced from exactly one source page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityBatch {
    /// Index of the source page (0-indexed)
    pub page_index: usize,

    /// Horizontal offset the page was placed at
    pub x_offset: f64,

    /// Entities, geometry first then text, each in source order
    pub entities: Vec<OutputEntity>,
}

impl EntityBatch {
    /// Create an empty batch for a page placement.
    pub fn new(page_index: usize, x_offset: f64) -> Self {
        Self {
            page_index,
            x_offset,
            entities: Vec::new(),
        }
    }

    /// Number of entities in the batch.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Bounds of every entity point in the batch.
    pub fn bounds(&self) -> Option<Bounds> {
        self.entities
            .iter()
            .filter_map(OutputEntity::bounds)
            .reduce(Bounds::union)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_set_fresh() {
        let layers = LayerSet::new();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers.get(LayerId::Geometry).unwrap().name, "PDF_GEOMETRY");
        assert_eq!(layers.get(LayerId::Text).unwrap().color, 1);
        let names: Vec<_> = layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["PDF_GEOMETRY", "PDF_TEXT"]);
    }

    #[test]
    fn test_batch_bounds_and_layers() {
        let mut batch = EntityBatch::new(0, 0.0);
        batch.entities.push(OutputEntity::new(
            LayerId::Geometry,
            EntityKind::Line {
                start: Point::new(0.0, 0.0),
                end: Point::new(5.0, 2.0),
            },
        ));
        batch.entities.push(OutputEntity::new(
            LayerId::Text,
            EntityKind::Text {
                content: "A".into(),
                height: 10.0,
                anchor: Point::new(-1.0, 8.0),
                anchor_corner: AnchorCorner::BottomLeft,
            },
        ));

        let bounds = batch.bounds().unwrap();
        assert_eq!(bounds.min, Point::new(-1.0, 0.0));
        assert_eq!(bounds.max, Point::new(5.0, 8.0));
    }

    #[test]
    fn test_entity_json_shape() {
        let entity = OutputEntity::new(
            LayerId::Geometry,
            EntityKind::Line {
                start: Point::new(0.0, 100.0),
                end: Point::new(10.0, 90.0),
            },
        );
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["layer"], "geometry");
        assert_eq!(json["type"], "line");
        assert_eq!(json["end"]["y"], 90.0);
    }
}
