use crate::{Color, Point};

/// An axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Grow (or shrink, for negative `by`) on every side.
    pub fn inflate(&self, by: f64) -> Self {
        Self {
            x: self.x - by,
            y: self.y - by,
            width: self.width + 2.0 * by,
            height: self.height + 2.0 * by,
        }
    }

    /// Square of side `size` centred on `center`.
    pub fn centered(center: Point, size: f64) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }
}

/// Outline style for `stroke_rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    /// Dash pattern (on, off, ...). Empty means a solid line.
    pub dash: Vec<f64>,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    pub fn dashed(color: Color, width: f64, dash: &[f64]) -> Self {
        Self {
            color,
            width,
            dash: dash.to_vec(),
        }
    }

    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }
}

/// Text style for `fill_text`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size: f64,
    pub family: String,
}

impl TextStyle {
    /// CSS font shorthand, e.g. `"14px sans-serif"`.
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.size, self.family)
    }
}

/// A 2D immediate-mode drawing target.
///
/// Coordinates are surface pixels with the origin at the top-left. Text is
/// positioned by its top-left corner.
pub trait Surface {
    /// Raster image type that can be blitted onto this surface.
    type Image;

    /// Surface width in pixels.
    fn width(&self) -> f64;

    /// Surface height in pixels.
    fn height(&self) -> f64;

    /// Clear the whole surface.
    fn clear(&mut self);

    /// Draw `image` with its top-left corner at `(x, y)`.
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64);

    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw text with its top-left corner at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);

    /// Rendered width of `text` in pixels.
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> f64;
}
