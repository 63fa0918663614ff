//! urchin_canvas - drawing surface and input events for the gonopore annotator.
//!
//! The annotator core only talks to the [`Surface`] trait and consumes [`Event`]s,
//! so the same logic runs against a browser canvas on wasm32 and against the
//! headless [`RecordingSurface`] everywhere else.

mod color;
mod event;
mod recording;
mod surface;

#[cfg(target_arch = "wasm32")]
mod canvas;

pub use color::{Color, ColorParseError};
pub use event::{Event, Key, Modifiers, MouseButton, Point, TouchPhase, TouchPoint};
pub use recording::{DrawCommand, ImageRef, RecordingSurface};
pub use surface::{Rect, StrokeStyle, Surface, TextStyle};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::event::{Event, Key, Modifiers, MouseButton, Point, TouchPhase, TouchPoint};
    pub use crate::surface::{Rect, StrokeStyle, Surface, TextStyle};
}
