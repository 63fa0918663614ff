//! Urchin Annotator - bounding-box annotation for sea-urchin gonopores
//!
//! Draw, select, move and delete class-labelled boxes over an image, with
//! bounded undo/redo and YOLO normalized label import/export. The annotator
//! is generic over a [`Surface`](urchin_canvas::Surface): in the browser it
//! paints an HTML canvas, natively and in tests it records draw calls.

pub mod annotator;
pub mod color_utils;
pub mod config;
pub mod constants;
pub mod format;
pub mod history;
pub mod keybindings;
pub mod model;

pub use annotator::{Annotator, DragState, ImportSummary};
pub use config::{AnnotatorConfig, Capabilities, ConfigError, LogLevel};
pub use format::FormatError;
pub use model::{AnnotationSet, BoundingBox, ClassDef, ClassList, CursorHint, InteractionMode};

pub use urchin_canvas;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
