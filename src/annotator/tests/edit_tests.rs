use super::*;
use crate::annotator::DragState;
use crate::model::{CursorHint, InteractionMode};

fn edit_annotator() -> Annotator<RecordingSurface> {
    let mut annotator = annotator();
    annotator.load_annotations(two_boxes());
    annotator.set_mode(InteractionMode::Edit);
    annotator
}

#[test]
fn test_click_selects_box() {
    let mut annotator = edit_annotator();
    down(&mut annotator, 90.0, 90.0);
    up(&mut annotator, 90.0, 90.0);
    assert_eq!(annotator.selected_index(), Some(1));

    // Clicking empty space clears the selection
    down(&mut annotator, 180.0, 20.0);
    up(&mut annotator, 180.0, 20.0);
    assert_eq!(annotator.selected_index(), None);
}

#[test]
fn test_click_without_moving_does_not_record() {
    let mut annotator = edit_annotator();
    let changes = change_counter(&mut annotator);

    down(&mut annotator, 30.0, 30.0);
    up(&mut annotator, 30.0, 30.0);

    assert_eq!(changes.get(), 0);
    assert_eq!(annotator.history_len(), 1);
    assert_eq!(annotator.boxes().as_slice(), two_boxes().as_slice());
}

#[test]
fn test_hit_within_edge_tolerance() {
    let mut annotator = edit_annotator();

    // 3px left of the second box
    down(&mut annotator, 57.0, 100.0);
    up(&mut annotator, 57.0, 100.0);
    assert_eq!(annotator.selected_index(), Some(1));

    // 6px is too far
    down(&mut annotator, 54.0, 100.0);
    up(&mut annotator, 54.0, 100.0);
    assert_eq!(annotator.selected_index(), None);
}

#[test]
fn test_topmost_box_wins() {
    let mut annotator = annotator();
    annotator.load_annotations(vec![
        BoundingBox::new(10.0, 10.0, 100.0, 100.0, 0),
        BoundingBox::new(50.0, 50.0, 150.0, 150.0, 1),
    ]);
    annotator.set_mode(InteractionMode::Edit);

    down(&mut annotator, 75.0, 75.0);
    assert_eq!(annotator.selected_index(), Some(1));
}

#[test]
fn test_move_translates_box() {
    let mut annotator = edit_annotator();
    let changes = change_counter(&mut annotator);

    down(&mut annotator, 30.0, 30.0);
    assert_eq!(annotator.cursor_hint(), CursorHint::Move);
    move_to(&mut annotator, 45.0, 50.0);
    assert_eq!(
        annotator.boxes().get(0),
        Some(&BoundingBox::new(25.0, 30.0, 65.0, 70.0, 0))
    );
    assert_eq!(changes.get(), 0);

    up(&mut annotator, 60.0, 70.0);
    assert_eq!(
        annotator.boxes().get(0),
        Some(&BoundingBox::new(40.0, 50.0, 80.0, 90.0, 0))
    );
    assert_eq!(annotator.selected_index(), Some(0));
    assert_eq!(changes.get(), 1);
    assert_eq!(annotator.history_len(), 2);
    assert!(!annotator.drag_state().is_active());
}

#[test]
fn test_move_stays_inside_surface() {
    let mut annotator = edit_annotator();

    drag(&mut annotator, (30.0, 30.0), (300.0, -100.0));
    let moved = annotator.boxes().get(0).copied().unwrap();
    assert_eq!(moved, BoundingBox::new(160.0, 0.0, 200.0, 40.0, 0));
    assert_eq!(moved.width(), 40.0);
    assert_eq!(moved.height(), 40.0);

    drag(&mut annotator, (180.0, 20.0), (-500.0, 500.0));
    assert_eq!(
        annotator.boxes().get(0),
        Some(&BoundingBox::new(0.0, 160.0, 40.0, 200.0, 0))
    );
}

#[test]
fn test_move_preserves_class() {
    let mut annotator = edit_annotator();
    drag(&mut annotator, (90.0, 90.0), (100.0, 95.0));
    assert_eq!(annotator.boxes().get(1).unwrap().class_id, 1);
}

#[test]
fn test_move_disabled_only_selects() {
    let mut annotator = annotator_with(&AnnotatorConfig::basic());
    annotator.load_annotations(two_boxes());
    annotator.set_mode(InteractionMode::Edit);

    drag(&mut annotator, (30.0, 30.0), (80.0, 80.0));

    assert_eq!(annotator.selected_index(), Some(0));
    assert_eq!(annotator.boxes().as_slice(), two_boxes().as_slice());
    assert_eq!(*annotator.drag_state(), DragState::Idle);
}

#[test]
fn test_hover_cursor_hints() {
    let mut annotator = edit_annotator();
    let hints = Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = Rc::clone(&hints);
    annotator.on_cursor_hint(move |hint| sink.borrow_mut().push(hint));

    move_to(&mut annotator, 30.0, 30.0);
    move_to(&mut annotator, 35.0, 35.0);
    move_to(&mut annotator, 180.0, 20.0);

    assert_eq!(*hints.borrow(), vec![CursorHint::Move, CursorHint::Default]);
}

#[test]
fn test_mode_switch_mid_move_restores_box() {
    let mut annotator = edit_annotator();
    let changes = change_counter(&mut annotator);

    down(&mut annotator, 30.0, 30.0);
    move_to(&mut annotator, 80.0, 80.0);
    annotator.set_mode(InteractionMode::Create);

    assert_eq!(annotator.boxes().as_slice(), two_boxes().as_slice());
    assert_eq!(changes.get(), 0);
}

/// Label rounding can leave a box hanging off the left edge.
fn overflowing_annotator() -> Annotator<RecordingSurface> {
    let mut annotator = annotator();
    annotator
        .load_from_normalized_text("0 0.010000 0.500000 0.040000 0.200000")
        .unwrap();
    annotator.set_mode(InteractionMode::Edit);
    annotator
}

#[test]
fn test_click_leaves_overflowing_box_alone() {
    let mut annotator = overflowing_annotator();
    let before = annotator.boxes().get(0).copied().unwrap();
    assert!(before.x1 < 0.0);
    let changes = change_counter(&mut annotator);

    down(&mut annotator, 3.0, 100.0);
    up(&mut annotator, 3.0, 100.0);

    assert_eq!(annotator.selected_index(), Some(0));
    assert_eq!(annotator.boxes().get(0), Some(&before));
    assert_eq!(changes.get(), 0);
    assert_eq!(annotator.history_len(), 1);
}

#[test]
fn test_drag_back_to_grab_point_leaves_overflowing_box_alone() {
    let mut annotator = overflowing_annotator();
    let before = annotator.boxes().get(0).copied().unwrap();
    let changes = change_counter(&mut annotator);

    down(&mut annotator, 3.0, 100.0);
    move_to(&mut annotator, 40.0, 120.0);
    assert_ne!(annotator.boxes().get(0), Some(&before));
    move_to(&mut annotator, 3.0, 100.0);
    up(&mut annotator, 3.0, 100.0);

    assert_eq!(annotator.boxes().get(0), Some(&before));
    assert_eq!(changes.get(), 0);
    assert_eq!(annotator.history_len(), 1);
}

#[test]
fn test_real_move_of_overflowing_box_is_clamped() {
    let mut annotator = overflowing_annotator();
    let changes = change_counter(&mut annotator);

    drag(&mut annotator, (3.0, 100.0), (4.0, 100.0));

    let moved = annotator.boxes().get(0).copied().unwrap();
    assert!((moved.x1 - 0.0).abs() < 1e-9);
    assert!((moved.width() - 8.0).abs() < 1e-9);
    assert_eq!(changes.get(), 1);
    assert_eq!(annotator.history_len(), 2);
}
