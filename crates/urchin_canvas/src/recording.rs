//! Headless surface that records draw calls instead of rasterizing them.

use crate::{Color, Rect, StrokeStyle, Surface, TextStyle};

/// Stand-in for a raster image on the recording surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl ImageRef {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Image { name: String, x: f64, y: f64 },
    StrokeRect { rect: Rect, style: StrokeStyle },
    FillRect { rect: Rect, color: Color },
    Text { text: String, x: f64, y: f64 },
}

/// Surface that keeps a log of every draw call since the last `clear`.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Commands of the current frame (everything since the last clear).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of times the surface has been cleared, i.e. full redraws.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// All stroked rectangles of the current frame.
    pub fn stroked_rects(&self) -> impl Iterator<Item = (&Rect, &StrokeStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokeRect { rect, style } => Some((rect, style)),
            _ => None,
        })
    }

    /// All text drawn in the current frame.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    type Image = ImageRef;

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn draw_image(&mut self, image: &ImageRef, x: f64, y: f64) {
        self.commands.push(DrawCommand::Image {
            name: image.name.clone(),
            x,
            y,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            style: style.clone(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> f64 {
        // Rough average glyph advance for proportional fonts
        text.chars().count() as f64 * style.size * 0.6
    }
}
