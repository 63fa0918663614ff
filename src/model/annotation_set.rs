//! The ordered collection of boxes for one image.

use serde::{Deserialize, Serialize};
use urchin_canvas::Point;

use super::BoundingBox;

/// Boxes in insertion order. Later boxes render on top, and the selection is
/// identified by index into this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSet {
    boxes: Vec<BoundingBox>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BoundingBox> {
        self.boxes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut BoundingBox> {
        self.boxes.get_mut(index)
    }

    pub fn push(&mut self, bbox: BoundingBox) {
        self.boxes.push(bbox);
    }

    /// Remove the box at `index`, shifting later boxes down.
    pub fn remove(&mut self, index: usize) -> Option<BoundingBox> {
        if index < self.boxes.len() {
            Some(self.boxes.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundingBox> {
        self.boxes.iter()
    }

    pub fn as_slice(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn into_vec(self) -> Vec<BoundingBox> {
        self.boxes
    }

    /// Index of the topmost box hit at `point`, if any.
    ///
    /// Boxes are tested from last-inserted to first; a box is hit when the
    /// point is inside it or within `tolerance` of one of its edges.
    pub fn find_box_at(&self, point: Point, tolerance: f64) -> Option<usize> {
        self.boxes
            .iter()
            .rposition(|bbox| bbox.hit(point, tolerance))
    }
}

impl From<Vec<BoundingBox>> for AnnotationSet {
    fn from(boxes: Vec<BoundingBox>) -> Self {
        Self { boxes }
    }
}

impl Extend<BoundingBox> for AnnotationSet {
    fn extend<T: IntoIterator<Item = BoundingBox>>(&mut self, iter: T) {
        self.boxes.extend(iter);
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a BoundingBox;
    type IntoIter = std::slice::Iter<'a, BoundingBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}
