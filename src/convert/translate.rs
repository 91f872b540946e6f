//! Coordinate mapping and per-primitive translation.
//!
//! Source pages put the origin at the top-left with Y growing downward;
//! output drawings put it at the bottom-left with Y growing upward.

use crate::model::{
    AnchorCorner, DrawingCommand, EntityKind, LayerId, OutputEntity, Point, TextSpan,
};

/// Map a page-local point into output space.
///
/// Flips Y against `page_height` and shifts X by `x_offset`. With a zero
/// offset the mapping is its own inverse.
#[inline]
pub fn transform(point: Point, x_offset: f64, page_height: f64) -> Point {
    Point::new(point.x + x_offset, page_height - point.y)
}

/// Translate one drawing command onto the geometry layer.
///
/// Returns `None` for commands without an output mapping.
pub fn translate_command(
    command: &DrawingCommand,
    x_offset: f64,
    page_height: f64,
) -> Option<OutputEntity> {
    let map = |p: Point| transform(p, x_offset, page_height);

    let kind = match *command {
        DrawingCommand::Line { from, to } => EntityKind::Line {
            start: map(from),
            end: map(to),
        },
        DrawingCommand::Curve { p0, p1, p2, p3 } => EntityKind::Curve {
            control_points: [map(p0), map(p1), map(p2), map(p3)],
            degree: 3,
        },
        DrawingCommand::Rect { x0, y0, x1, y1 } => {
            // Closed explicitly: the first corner is repeated as the fifth vertex.
            let corners = [(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)];
            EntityKind::Polyline {
                points: corners.iter().map(|&c| map(c.into())).collect(),
                closed: true,
            }
        }
        DrawingCommand::Unsupported => return None,
    };

    Some(OutputEntity::new(LayerId::Geometry, kind))
}

/// Translate one text span onto the text layer.
///
/// Whitespace-only spans return `None`. The content is kept untrimmed.
pub fn translate_span(span: &TextSpan, x_offset: f64, page_height: f64) -> Option<OutputEntity> {
    if !span.has_content() {
        return None;
    }

    Some(OutputEntity::new(
        LayerId::Text,
        EntityKind::Text {
            content: span.text.clone(),
            height: span.font_size,
            anchor: transform(span.origin, x_offset, page_height),
            anchor_corner: AnchorCorner::BottomLeft,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_transform_flips_and_offsets() {
        let p = transform(Point::new(10.0, 25.0), 100.0, 200.0);
        assert_eq!(p, Point::new(110.0, 175.0));
    }

    #[test]
    fn test_translate_line() {
        let cmd = DrawingCommand::line((0.0, 0.0), (10.0, 10.0));
        let entity = translate_command(&cmd, 0.0, 100.0).unwrap();
        assert_eq!(entity.layer, LayerId::Geometry);
        assert_eq!(
            entity.kind,
            EntityKind::Line {
                start: Point::new(0.0, 100.0),
                end: Point::new(10.0, 90.0),
            }
        );
    }

    #[test]
    fn test_translate_curve_keeps_control_points() {
        let cmd = DrawingCommand::curve((0.0, 0.0), (1.0, 2.0), (3.0, 4.0), (5.0, 6.0));
        let entity = translate_command(&cmd, 5.0, 10.0).unwrap();
        match entity.kind {
            EntityKind::Curve {
                control_points,
                degree,
            } => {
                assert_eq!(degree, 3);
                assert_eq!(
                    control_points,
                    [
                        Point::new(5.0, 10.0),
                        Point::new(6.0, 8.0),
                        Point::new(8.0, 6.0),
                        Point::new(10.0, 4.0),
                    ]
                );
            }
            other => panic!("Expected curve, got {:?}", other),
        }
    }

    #[test]
    fn test_translate_rect() {
        let cmd = DrawingCommand::rect(10.0, 20.0, 30.0, 50.0);
        let entity = translate_command(&cmd, 0.0, 100.0).unwrap();
        match entity.kind {
            EntityKind::Polyline { points, closed } => {
                assert!(closed);
                assert_eq!(
                    points,
                    vec![
                        Point::new(10.0, 80.0),
                        Point::new(30.0, 80.0),
                        Point::new(30.0, 50.0),
                        Point::new(10.0, 50.0),
                        Point::new(10.0, 80.0),
                    ]
                );
            }
            other => panic!("Expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_translate_unsupported() {
        assert!(translate_command(&DrawingCommand::Unsupported, 0.0, 100.0).is_none());
    }

    #[test]
    fn test_translate_span() {
        let span = TextSpan::new("  Title ", 14.0, (72.0, 100.0));
        let entity = translate_span(&span, 0.0, 792.0).unwrap();
        assert_eq!(entity.layer, LayerId::Text);
        assert_eq!(
            entity.kind,
            EntityKind::Text {
                content: "  Title ".to_string(),
                height: 14.0,
                anchor: Point::new(72.0, 692.0),
                anchor_corner: AnchorCorner::BottomLeft,
            }
        );
    }

    #[test]
    fn test_translate_span_whitespace() {
        assert!(translate_span(&TextSpan::new("", 12.0, (0.0, 0.0)), 0.0, 10.0).is_none());
        assert!(translate_span(&TextSpan::new(" \u{a0}\t", 12.0, (0.0, 0.0)), 0.0, 10.0).is_none());
    }

    // Coordinates on a 1/64 grid are exactly representable, so the flip
    // round-trips bit for bit.
    fn grid_coord() -> impl Strategy<Value = f64> {
        (-1_000_000i64..1_000_000).prop_map(|v| v as f64 / 64.0)
    }

    proptest! {
        #[test]
        fn prop_flip_is_involution(x in grid_coord(), y in grid_coord(), h in grid_coord()) {
            let p = Point::new(x, y);
            let twice = transform(transform(p, 0.0, h), 0.0, h);
            prop_assert_eq!(twice, p);
        }

        #[test]
        fn prop_rect_is_closed(
            x0 in grid_coord(), y0 in grid_coord(),
            x1 in grid_coord(), y1 in grid_coord(),
            off in grid_coord(), h in grid_coord(),
        ) {
            let entity = translate_command(&DrawingCommand::rect(x0, y0, x1, y1), off, h).unwrap();
            match entity.kind {
                EntityKind::Polyline { points, closed } => {
                    prop_assert!(closed);
                    prop_assert_eq!(points.len(), 5);
                    prop_assert_eq!(points[0], points[4]);
                }
                _ => prop_assert!(false, "rectangle must become a polyline"),
            }
        }

        #[test]
        fn prop_whitespace_spans_excluded(text in "[ \t\r\n]{0,8}") {
            let span = TextSpan::new(text, 10.0, (1.0, 1.0));
            prop_assert!(translate_span(&span, 0.0, 100.0).is_none());
        }

        #[test]
        fn prop_content_spans_kept_untrimmed(
            pad in "[ \t]{0,3}",
            body in "[a-zA-Z0-9]{1,12}",
        ) {
            let text = format!("{pad}{body}{pad}");
            let entity = translate_span(&TextSpan::new(text.clone(), 10.0, (1.0, 1.0)), 0.0, 100.0);
            match entity.map(|e| e.kind) {
                Some(EntityKind::Text { content, .. }) => prop_assert_eq!(content, text),
                other => prop_assert!(false, "expected text entity, got {:?}", other),
            }
        }
    }
}
