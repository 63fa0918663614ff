use super::*;
use crate::config::Capabilities;
use crate::model::InteractionMode;
use urchin_canvas::{Key, Modifiers, TouchPhase, TouchPoint};

fn touch(
    annotator: &mut Annotator<RecordingSurface>,
    phase: TouchPhase,
    points: &[(f64, f64)],
) -> bool {
    let touches = points
        .iter()
        .enumerate()
        .map(|(id, &(x, y))| TouchPoint {
            id: id as i32,
            position: Point::new(x, y),
        })
        .collect();
    annotator.handle_event(&Event::Touch { phase, touches })
}

fn key(annotator: &mut Annotator<RecordingSurface>, key: Key, modifiers: Modifiers) -> bool {
    annotator.handle_event(&Event::KeyPressed { key, modifiers })
}

#[test]
fn test_single_touch_creates_box() {
    let mut annotator = annotator();
    assert!(touch(&mut annotator, TouchPhase::Start, &[(20.0, 20.0)]));
    assert!(touch(&mut annotator, TouchPhase::Move, &[(70.0, 90.0)]));
    assert!(touch(&mut annotator, TouchPhase::End, &[(70.0, 90.0)]));

    assert_eq!(
        annotator.boxes().get(0),
        Some(&BoundingBox::new(20.0, 20.0, 70.0, 90.0, 0))
    );
}

#[test]
fn test_multi_touch_ignored() {
    let mut annotator = annotator();
    assert!(!touch(
        &mut annotator,
        TouchPhase::Start,
        &[(20.0, 20.0), (80.0, 80.0)]
    ));
    assert!(!annotator.drag_state().is_active());
}

#[test]
fn test_touch_cancel_finishes_drag() {
    let mut annotator = annotator();
    touch(&mut annotator, TouchPhase::Start, &[(20.0, 20.0)]);
    touch(&mut annotator, TouchPhase::Move, &[(70.0, 90.0)]);
    touch(&mut annotator, TouchPhase::Cancel, &[(70.0, 90.0)]);

    assert!(!annotator.drag_state().is_active());
    assert_eq!(annotator.boxes().len(), 1);
}

#[test]
fn test_undo_redo_shortcuts() {
    let mut annotator = annotator();
    create_box(&mut annotator, 0, (10.0, 10.0), (50.0, 50.0));

    assert!(key(&mut annotator, Key::Char('z'), Modifiers::CTRL));
    assert!(annotator.boxes().is_empty());
    assert!(key(&mut annotator, Key::Char('y'), Modifiers::CTRL));
    assert_eq!(annotator.boxes().len(), 1);

    // Plain letters do nothing
    assert!(!key(&mut annotator, Key::Char('z'), Modifiers::NONE));
    assert_eq!(annotator.boxes().len(), 1);
}

#[test]
fn test_redo_shortcut_respects_capability() {
    let mut annotator = annotator_with(&AnnotatorConfig::classification());
    create_box(&mut annotator, 0, (10.0, 10.0), (50.0, 50.0));
    assert!(key(&mut annotator, Key::Char('z'), Modifiers::CTRL));

    assert!(!key(&mut annotator, Key::Char('y'), Modifiers::CTRL));
    assert!(annotator.boxes().is_empty());

    // The operation itself is still available to the host
    assert!(annotator.redo());
    assert_eq!(annotator.boxes().len(), 1);
}

#[test]
fn test_keyboard_can_be_disabled() {
    let config = AnnotatorConfig {
        capabilities: Capabilities {
            enable_keyboard: false,
            ..Capabilities::default()
        },
        ..AnnotatorConfig::new()
    };
    let mut annotator = annotator_with(&config);
    create_box(&mut annotator, 0, (10.0, 10.0), (50.0, 50.0));

    assert!(!key(&mut annotator, Key::Char('z'), Modifiers::CTRL));
    assert_eq!(annotator.boxes().len(), 1);
}

#[test]
fn test_escape_cancels_create() {
    let mut annotator = annotator();
    down(&mut annotator, 10.0, 10.0);
    move_to(&mut annotator, 80.0, 80.0);

    assert!(key(&mut annotator, Key::Escape, Modifiers::NONE));
    up(&mut annotator, 80.0, 80.0);

    assert!(annotator.boxes().is_empty());
    assert!(!key(&mut annotator, Key::Escape, Modifiers::NONE));
}

#[test]
fn test_escape_cancels_move() {
    let mut annotator = annotator();
    annotator.load_annotations(two_boxes());
    annotator.set_mode(InteractionMode::Edit);
    let changes = change_counter(&mut annotator);

    down(&mut annotator, 30.0, 30.0);
    move_to(&mut annotator, 100.0, 20.0);
    assert!(key(&mut annotator, Key::Escape, Modifiers::NONE));

    assert_eq!(annotator.boxes().as_slice(), two_boxes().as_slice());
    assert_eq!(annotator.selected_index(), None);
    assert_eq!(changes.get(), 0);
}
