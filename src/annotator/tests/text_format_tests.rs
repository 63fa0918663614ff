use super::*;
use crate::format::{FormatError, LineError};

#[test]
fn test_export_reference_boxes() {
    let mut annotator = annotator();
    annotator.load_annotations(two_boxes());

    let text = annotator.export_to_normalized_text().unwrap();
    assert_eq!(
        text,
        "0 0.150000 0.150000 0.200000 0.200000\n1 0.450000 0.475000 0.300000 0.350000"
    );
}

#[test]
fn test_export_empty_is_empty_string() {
    let annotator = annotator();
    assert_eq!(annotator.export_to_normalized_text().unwrap(), "");
}

#[test]
fn test_import_reference_text() {
    let mut annotator = annotator();
    let changes = change_counter(&mut annotator);

    let summary = annotator
        .load_from_normalized_text(
            "0 0.150000 0.150000 0.200000 0.200000\n1 0.450000 0.475000 0.300000 0.350000\n",
        )
        .unwrap();

    assert_eq!(summary.loaded, 2);
    assert!(summary.skipped.is_empty());
    for (loaded, expected) in annotator.boxes().iter().zip(two_boxes()) {
        assert_eq!(loaded.class_id, expected.class_id);
        assert!((loaded.x1 - expected.x1).abs() < 1e-6);
        assert!((loaded.y1 - expected.y1).abs() < 1e-6);
        assert!((loaded.x2 - expected.x2).abs() < 1e-6);
        assert!((loaded.y2 - expected.y2).abs() < 1e-6);
    }
    assert_eq!(changes.get(), 0);
    assert!(!annotator.can_undo());
}

#[test]
fn test_import_skips_malformed_lines() {
    let mut annotator = annotator();
    let text = "0 0.5 0.5 0.2 0.2\n\
                garbage\n\
                \n\
                1 0.5 0.5 abc 0.2\n\
                1 0.25 0.25 0.1 0.1";

    let summary = annotator.load_from_normalized_text(text).unwrap();

    assert_eq!(summary.loaded, 2);
    assert_eq!(annotator.boxes().len(), 2);
    let numbers: Vec<usize> = summary.skipped.iter().map(|s| s.line_number).collect();
    assert_eq!(numbers, vec![2, 4]);
    assert_eq!(summary.skipped[0].reason, LineError::FieldCount { found: 1 });
}

#[test]
fn test_import_replaces_existing_boxes() {
    let mut annotator = annotator();
    annotator.load_annotations(two_boxes());
    annotator.load_from_normalized_text("1 0.5 0.5 0.5 0.5").unwrap();

    assert_eq!(
        annotator.boxes().as_slice(),
        &[BoundingBox::new(50.0, 50.0, 150.0, 150.0, 1)]
    );
}

#[test]
fn test_import_without_surface_size_changes_nothing() {
    let mut annotator = Annotator::new(RecordingSurface::new(0.0, 0.0), ClassList::gonopore_sex());
    annotator.load_annotations(two_boxes());

    let result = annotator.load_from_normalized_text("0 0.5 0.5 0.2 0.2");
    assert!(matches!(result, Err(FormatError::MissingDimensions { .. })));
    assert_eq!(annotator.boxes().as_slice(), two_boxes().as_slice());
    assert!(annotator.export_to_normalized_text().is_err());
}

/// Relative error, measured against one pixel for coordinates near zero.
fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-5 * expected.abs().max(1.0)
}

#[test]
fn test_roundtrip_on_thousandth_grid() {
    let (width, height) = (640.0, 480.0);
    let steps = [0u32, 1, 2, 137, 333, 500, 667, 998, 999, 1000];

    let mut boxes = Vec::new();
    for (n, &i) in steps.iter().enumerate() {
        for &j in &steps[n + 1..] {
            let x1 = f64::from(i) * width / 1000.0;
            let x2 = f64::from(j) * width / 1000.0;
            // Pair each x span with a different y span
            let (k, l) = (steps[(n + 3) % steps.len()], steps[(n + 7) % steps.len()]);
            let (k, l) = (k.min(l), k.max(l));
            let y1 = f64::from(k) * height / 1000.0;
            let y2 = f64::from(l) * height / 1000.0;
            boxes.push(BoundingBox::new(x1, y1, x2, y2, i % 2));
        }
    }

    let mut annotator = Annotator::new(
        RecordingSurface::new(width, height),
        ClassList::gonopore_sex(),
    );
    annotator.load_annotations(boxes.clone());
    let text = annotator.export_to_normalized_text().unwrap();
    let summary = annotator.load_from_normalized_text(&text).unwrap();

    assert!(summary.skipped.is_empty());
    assert_eq!(annotator.boxes().len(), boxes.len());
    for (loaded, expected) in annotator.boxes().iter().zip(&boxes) {
        assert_eq!(loaded.class_id, expected.class_id);
        assert!(close(loaded.x1, expected.x1), "x1 {:?} vs {:?}", loaded, expected);
        assert!(close(loaded.y1, expected.y1), "y1 {:?} vs {:?}", loaded, expected);
        assert!(close(loaded.x2, expected.x2), "x2 {:?} vs {:?}", loaded, expected);
        assert!(close(loaded.y2, expected.y2), "y2 {:?} vs {:?}", loaded, expected);
    }
}

#[test]
fn test_roundtrip_full_surface_box() {
    let mut annotator = annotator();
    annotator.load_annotations(vec![BoundingBox::new(0.0, 0.0, 200.0, 200.0, 1)]);

    let text = annotator.export_to_normalized_text().unwrap();
    assert_eq!(text, "1 0.500000 0.500000 1.000000 1.000000");

    annotator.load_from_normalized_text(&text).unwrap();
    assert_eq!(
        annotator.boxes().as_slice(),
        &[BoundingBox::new(0.0, 0.0, 200.0, 200.0, 1)]
    );
}

#[test]
fn test_export_to_json_uses_pixels() {
    let mut annotator = annotator();
    annotator.load_annotations(two_boxes());

    let json = annotator.export_to_json().unwrap();
    let parsed: Vec<BoundingBox> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, two_boxes());
}
