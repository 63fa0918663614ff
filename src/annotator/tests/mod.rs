//! Scenario tests for the annotator, driven through a recording surface.

mod edit_tests;
mod input_tests;
mod text_format_tests;

use std::cell::Cell;
use std::rc::Rc;

use urchin_canvas::{Event, MouseButton, Point, RecordingSurface};

use super::Annotator;
use crate::config::AnnotatorConfig;
use crate::model::{BoundingBox, ClassList};

/// 200x200 annotator with the male/female classes.
fn annotator() -> Annotator<RecordingSurface> {
    Annotator::new(RecordingSurface::new(200.0, 200.0), ClassList::gonopore_sex())
}

fn annotator_with(config: &AnnotatorConfig) -> Annotator<RecordingSurface> {
    Annotator::with_config(RecordingSurface::new(200.0, 200.0), config)
}

/// Count change notifications.
fn change_counter(annotator: &mut Annotator<RecordingSurface>) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    annotator.on_annotations_changed(move || counter.set(counter.get() + 1));
    count
}

fn down(annotator: &mut Annotator<RecordingSurface>, x: f64, y: f64) {
    annotator.handle_event(&Event::PointerDown {
        button: MouseButton::Left,
        position: Point::new(x, y),
    });
}

fn move_to(annotator: &mut Annotator<RecordingSurface>, x: f64, y: f64) {
    annotator.handle_event(&Event::PointerMove {
        position: Point::new(x, y),
    });
}

fn up(annotator: &mut Annotator<RecordingSurface>, x: f64, y: f64) {
    annotator.handle_event(&Event::PointerUp {
        button: MouseButton::Left,
        position: Point::new(x, y),
    });
}

/// Full press-move-release gesture.
fn drag(annotator: &mut Annotator<RecordingSurface>, from: (f64, f64), to: (f64, f64)) {
    down(annotator, from.0, from.1);
    move_to(annotator, to.0, to.1);
    up(annotator, to.0, to.1);
}

/// Draw a box of the given class in create mode.
fn create_box(
    annotator: &mut Annotator<RecordingSurface>,
    class_id: u32,
    from: (f64, f64),
    to: (f64, f64),
) {
    assert!(annotator.set_current_class(class_id));
    drag(annotator, from, to);
}

/// The two boxes of the reference scenario.
fn two_boxes() -> Vec<BoundingBox> {
    vec![
        BoundingBox::new(10.0, 10.0, 50.0, 50.0, 0),
        BoundingBox::new(60.0, 60.0, 120.0, 130.0, 1),
    ]
}
