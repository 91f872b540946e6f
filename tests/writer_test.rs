//! Integration tests for the drawing writers.

use std::fs;
use std::sync::Arc;

use dxf::entities::EntityType;
use dxf::Drawing;
use pdf2dxf::convert::{ConvertOptions, Pipeline};
use pdf2dxf::model::{Document, DrawingCommand, Page, TextSpan};
use pdf2dxf::writer::{DrawingWriter, DxfWriter, JsonWriter, WriterRegistry};
use pdf2dxf::{convert_file, Error};

fn sample_page() -> Page {
    Page::new(0, 200.0, 100.0)
        .with_command(DrawingCommand::line((0.0, 0.0), (10.0, 10.0)))
        .with_command(DrawingCommand::rect(10.0, 10.0, 50.0, 30.0))
        .with_command(DrawingCommand::curve(
            (0.0, 50.0),
            (10.0, 40.0),
            (20.0, 40.0),
            (30.0, 50.0),
        ))
        .with_span(TextSpan::new("Room {A}", 9.0, (60.0, 70.0)))
}

fn layer_colors(drawing: &Drawing) -> Vec<(String, u8)> {
    drawing
        .layers()
        .filter(|l| l.name.starts_with("PDF_"))
        .map(|l| (l.name.clone(), l.color.index().map(|i| i as u8).unwrap_or(0)))
        .collect()
}

#[test]
fn test_dxf_file_reloads_with_layers_and_entities() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("single.dxf");

    let mut doc = Document::new();
    doc.add_page(sample_page());
    let writer: Arc<dyn DrawingWriter> = Arc::new(DxfWriter::new());
    let report = Pipeline::new(writer).run(&doc, &output).unwrap();
    assert_eq!(report.files, vec![output.clone()]);

    let drawing = Drawing::load_file(&output).unwrap();
    let mut colors = layer_colors(&drawing);
    colors.sort();
    assert_eq!(
        colors,
        vec![("PDF_GEOMETRY".to_string(), 7), ("PDF_TEXT".to_string(), 1)]
    );

    let entities: Vec<_> = drawing.entities().collect();
    assert_eq!(entities.len(), 4);

    match &entities[0].specific {
        EntityType::Line(line) => {
            assert_eq!((line.p1.x, line.p1.y), (0.0, 100.0));
            assert_eq!((line.p2.x, line.p2.y), (10.0, 90.0));
        }
        other => panic!("Expected line, got {:?}", other),
    }
    match &entities[1].specific {
        EntityType::LwPolyline(poly) => {
            assert!(poly.is_closed());
            assert_eq!(poly.vertices.len(), 5);
            assert_eq!((poly.vertices[2].x, poly.vertices[2].y), (50.0, 70.0));
        }
        other => panic!("Expected polyline, got {:?}", other),
    }
    match &entities[2].specific {
        EntityType::Spline(spline) => {
            assert_eq!(spline.degree_of_curve, 3);
            assert_eq!(spline.control_points.len(), 4);
            assert_eq!(spline.control_points[1].y, 60.0);
        }
        other => panic!("Expected spline, got {:?}", other),
    }
    match &entities[3].specific {
        EntityType::MText(mtext) => {
            assert_eq!(entities[3].common.layer, "PDF_TEXT");
            assert_eq!(mtext.text, "Room \\{A\\}");
            assert_eq!(mtext.initial_text_height, 9.0);
            assert_eq!(
                (mtext.insertion_point.x, mtext.insertion_point.y),
                (60.0, 30.0)
            );
        }
        other => panic!("Expected mtext, got {:?}", other),
    }
    assert!(entities[..3]
        .iter()
        .all(|e| e.common.layer == "PDF_GEOMETRY"));
}

#[test]
fn test_long_text_is_split_into_string_groups() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("long.dxf");
    let content = format!("{}{{\\}}\n{}", "Note ".repeat(60), "y".repeat(200));
    let escaped = format!("{}\\{{\\\\\\}}\\P{}", "Note ".repeat(60), "y".repeat(200));

    let mut doc = Document::new();
    doc.add_page(Page::new(0, 200.0, 100.0).with_span(TextSpan::new(content, 9.0, (5.0, 5.0))));
    let writer: Arc<dyn DrawingWriter> = Arc::new(DxfWriter::new());
    Pipeline::new(writer).run(&doc, &output).unwrap();

    // Raw group pairs of the MTEXT entity, up to the next entity.
    let raw = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = raw.lines().map(str::trim_end).collect();
    let start = lines
        .chunks(2)
        .position(|pair| pair[0].trim() == "0" && pair.get(1) == Some(&"MTEXT"))
        .unwrap();
    let mut string_groups = Vec::new();
    for pair in lines.chunks(2).skip(start + 1) {
        match pair[0].trim() {
            "0" => break,
            code @ ("1" | "3") => string_groups.push((code.to_string(), pair[1].to_string())),
            _ => {}
        }
    }
    assert!(string_groups.iter().any(|(code, _)| code == "3"));
    assert!(string_groups.iter().all(|(_, value)| value.len() <= 250));
    assert_eq!(string_groups.last().map(|(code, _)| code.as_str()), Some("1"));

    let drawing = Drawing::load_file(&output).unwrap();
    match &drawing.entities().next().unwrap().specific {
        EntityType::MText(mtext) => {
            assert!(!mtext.extended_text.is_empty());
            assert_eq!(format!("{}{}", mtext.extended_text.concat(), mtext.text), escaped);
        }
        other => panic!("Expected mtext, got {:?}", other),
    };
}

#[test]
fn test_each_split_file_owns_its_layers() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pages.json");
    let mut doc = Document::new();
    doc.add_page(sample_page());
    doc.add_page(sample_page());
    fs::write(&input, serde_json::to_vec(&doc).unwrap()).unwrap();

    let output = dir.path().join("split.dxf");
    let report = convert_file(&input, &output, &ConvertOptions::new()).unwrap();
    assert_eq!(report.files.len(), 2);

    for path in &report.files {
        let drawing = Drawing::load_file(path).unwrap();
        assert_eq!(layer_colors(&drawing).len(), 2);
        assert_eq!(drawing.entities().count(), 4);
    }
}

#[test]
fn test_merged_extents_cover_all_pages() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("merged.dxf");
    let mut doc = Document::new();
    doc.add_page(sample_page());
    doc.add_page(sample_page());

    let writer: Arc<dyn DrawingWriter> = Arc::new(DxfWriter::new());
    Pipeline::new(writer)
        .with_options(ConvertOptions::new().merged())
        .run(&doc, &output)
        .unwrap();

    let drawing = Drawing::load_file(&output).unwrap();
    assert_eq!(drawing.entities().count(), 8);
    // Second page starts at 200 + 50; its text anchor sits at x = 310.
    assert_eq!(drawing.header.maximum_drawing_extents.x, 310.0);
    assert_eq!(drawing.header.minimum_drawing_extents.x, 0.0);
}

#[test]
fn test_json_output_selected_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("dump.json");
    let mut doc = Document::new();
    doc.add_page(sample_page());

    let writer = WriterRegistry::with_defaults().for_path(&output).unwrap();
    assert_eq!(writer.name(), JsonWriter::new().name());
    Pipeline::new(writer).run(&doc, &output).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
    let entities = value["batches"][0]["entities"].as_array().unwrap();
    assert_eq!(entities.len(), 4);
    assert_eq!(entities[0]["type"], "line");
    assert_eq!(entities[3]["layer"], "text");
}

#[test]
fn test_failed_write_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("out.dxf");
    let mut doc = Document::new();
    doc.add_page(sample_page());

    let writer: Arc<dyn DrawingWriter> = Arc::new(DxfWriter::new());
    let result = Pipeline::new(writer).run(&doc, &output);
    assert!(matches!(result, Err(Error::Write { .. })));
    assert!(!output.exists());
}
