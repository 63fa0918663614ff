//! Flat numeric arrays as passed across the JS boundary.
//!
//! Corners are `x1, y1, x2, y2` per box; annotations append the class id.

use crate::model::BoundingBox;

const CORNER_STRIDE: usize = 4;
const ANNOTATION_STRIDE: usize = 5;

/// Split `values` into corner quadruples. Trailing values that do not make
/// a whole box are dropped with a warning.
pub fn corners_from_flat(values: &[f64]) -> Vec<[f64; 4]> {
    let chunks = values.chunks_exact(CORNER_STRIDE);
    if !chunks.remainder().is_empty() {
        log::warn!(
            "Ignoring {} trailing values in flat box corners",
            chunks.remainder().len()
        );
    }
    chunks.map(|c| [c[0], c[1], c[2], c[3]]).collect()
}

/// Split `values` into `x1, y1, x2, y2, class` boxes, stored as given.
///
/// A class that is not a non-negative whole number within `u32` skips that
/// box. Trailing values that do not make a whole box are dropped.
pub fn boxes_from_flat(values: &[f64]) -> Vec<BoundingBox> {
    let chunks = values.chunks_exact(ANNOTATION_STRIDE);
    if !chunks.remainder().is_empty() {
        log::warn!(
            "Ignoring {} trailing values in flat annotations",
            chunks.remainder().len()
        );
    }

    chunks
        .enumerate()
        .filter_map(|(i, c)| match class_id(c[4]) {
            Some(class_id) => Some(BoundingBox::new(c[0], c[1], c[2], c[3], class_id)),
            None => {
                log::warn!("Skipping flat annotation {}: bad class id {}", i, c[4]);
                None
            }
        })
        .collect()
}

fn class_id(value: f64) -> Option<u32> {
    let whole = value.is_finite() && value >= 0.0 && value.fract() == 0.0;
    (whole && value <= f64::from(u32::MAX)).then_some(value as u32)
}
