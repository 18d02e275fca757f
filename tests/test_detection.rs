mod common;

use common::*;
use cutout_editor::detection::json::parse_detections;
use cutout_editor::detection::{DEFAULT_CONFIDENCE_THRESHOLD, annotate, label_text, load_font};
use cutout_editor::{DetectionSet, JsonDetector};

const DETECTIONS_JSON: &str = r#"[
    {"label": "cat", "score": 0.92, "box": [10, 20, 60, 70], "mask": [[1.0, 1.0], [1.0, 0.0]]},
    {"label": "dog", "score": 0.5, "box": [0, 0, 30, 30], "mask": [[0.9]]},
    {"label": "person", "score": 0.77, "box": [-15, 40, 140, 120], "mask": [[0.2, 0.8]]}
]"#;

#[test]
fn parses_and_clips_detections() -> anyhow::Result<()> {
    let detections = parse_detections(DETECTIONS_JSON, 100, 100)?;

    assert_eq!(detections.len(), 3);
    assert_eq!(detections[0].label, "cat");
    assert_eq!(detections[0].bbox, BoundingBox { x0: 10, y0: 20, x1: 60, y1: 70 });
    assert_eq!(detections[0].mask.width(), 2);
    assert_eq!(detections[0].mask.get(1, 1), 0.0);
    assert_eq!(detections[2].bbox, BoundingBox { x0: 0, y0: 40, x1: 100, y1: 100 });
    Ok(())
}

#[test]
fn keeps_confident_detections_under_detector_ids() -> anyhow::Result<()> {
    let detections = parse_detections(DETECTIONS_JSON, 100, 100)?;

    let set = DetectionSet::from_detections(detections, DEFAULT_CONFIDENCE_THRESHOLD);

    // A score equal to the threshold is not enough
    assert_eq!(set.len(), 2);
    assert!(set.get(1).is_none());
    assert_eq!(set.get(2).map(|d| d.label.as_str()), Some("person"));
    let ids: Vec<usize> = set.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![0, 2]);
    Ok(())
}

#[test]
fn ragged_mask_is_rejected() {
    let json = r#"[{"label": "cat", "score": 0.9, "box": [0, 0, 5, 5], "mask": [[1.0, 1.0], [1.0]]}]"#;

    assert!(matches!(
        parse_detections(json, 10, 10),
        Err(CutoutError::InvalidMask(_))
    ));
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(
        parse_detections("{not json", 10, 10),
        Err(CutoutError::Detections(_))
    ));
}

#[test]
fn json_detector_reads_file() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("detections.json");
    std::fs::write(&path, DETECTIONS_JSON)?;
    let image = create_test_image(100, 100);

    let detector = JsonDetector::new(&path);
    let set = DetectionSet::detect(&detector, &image, 0.8)?;

    assert_eq!(set.len(), 1);
    assert_eq!(set.get(0).map(|d| d.score), Some(0.92));
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let detector = JsonDetector::new("/nonexistent/detections.json");
    let image = create_test_image(10, 10);

    assert!(matches!(
        DetectionSet::detect(&detector, &image, 0.5),
        Err(CutoutError::Io(_))
    ));
}

#[test]
fn annotation_draws_boxes() -> anyhow::Result<()> {
    let image = create_test_image(100, 100);
    let set = DetectionSet::from_detections(parse_detections(DETECTIONS_JSON, 100, 100)?, 0.5);

    let annotated = annotate(&image, &set);

    assert_eq!(annotated.dimensions(), (100, 100));
    assert_eq!(annotated.get_pixel(10, 20).0, [0, 255, 0]);
    assert_eq!(annotated.get_pixel(11, 21).0, [0, 255, 0]);
    assert_eq!(annotated.get_pixel(59, 69).0, [0, 255, 0]);
    // Interior is untouched
    assert_eq!(annotated.get_pixel(35, 45), image.to_rgb8().get_pixel(35, 45));
    Ok(())
}

#[test]
fn labels_match_listed_ids() -> anyhow::Result<()> {
    let set = DetectionSet::from_detections(parse_detections(DETECTIONS_JSON, 100, 100)?, 0.5);

    let labels: Vec<String> = set.iter().map(|(id, d)| label_text(id, d)).collect();

    assert_eq!(labels, vec!["0: cat (0.92)", "2: person (0.77)"]);
    Ok(())
}

#[test]
fn label_font_must_be_a_font() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("not_a_font.ttf");
    std::fs::write(&path, b"plain text")?;

    assert!(matches!(load_font(&path), Err(CutoutError::Font(_))));
    assert!(matches!(
        load_font(dir.path().join("missing.ttf")),
        Err(CutoutError::Io(_))
    ));
    Ok(())
}
