//! Data models for the annotator.

mod annotation_set;
mod bbox;
mod class;
mod mode;

pub use annotation_set::AnnotationSet;
pub use bbox::BoundingBox;
pub use class::{ClassDef, ClassList};
pub use mode::{CursorHint, InteractionMode, ParseModeError};
