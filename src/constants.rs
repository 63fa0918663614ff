//! Global constants for the annotator

/// A create-drag must exceed this many pixels on both axes to produce a box.
pub const MIN_DRAG_SIZE: f64 = 5.0;

/// Distance (pixels) around a box edge that still counts as a hit.
pub const HIT_TOLERANCE: f64 = 5.0;

/// Maximum number of history snapshots retained.
pub const MAX_HISTORY: usize = 20;

/// Decimal digits written for normalized coordinates.
pub const NORMALIZED_PRECISION: usize = 6;

/// Number of fields in one normalized label line.
pub const LABEL_FIELDS: usize = 5;
