//! Browser canvas backend (wasm32 only).

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::{Color, Point, Rect, StrokeStyle, Surface, TextStyle};

/// [`Surface`] over an `HtmlCanvasElement`'s 2D context.
///
/// Canvas calls that can fail (image blits, text) are logged and skipped so a
/// broken frame never aborts the event handler that triggered it.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Bind to a canvas element, acquiring its 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Convert viewport (client) coordinates into canvas pixel coordinates,
    /// accounting for CSS scaling of the element.
    pub fn client_to_surface(&self, client_x: f64, client_y: f64) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        let scale_x = if rect.width() > 0.0 {
            self.canvas.width() as f64 / rect.width()
        } else {
            1.0
        };
        let scale_y = if rect.height() > 0.0 {
            self.canvas.height() as f64 / rect.height()
        } else {
            1.0
        };
        Point::new(
            (client_x - rect.left()) * scale_x,
            (client_y - rect.top()) * scale_y,
        )
    }

    fn set_dash(&self, dash: &[f64]) {
        let pattern = js_sys::Array::new();
        for d in dash {
            pattern.push(&JsValue::from_f64(*d));
        }
        if let Err(e) = self.ctx.set_line_dash(&pattern) {
            log::warn!("setLineDash failed: {:?}", e);
        }
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn draw_image(&mut self, image: &HtmlImageElement, x: f64, y: f64) {
        if let Err(e) = self.ctx.draw_image_with_html_image_element(image, x, y) {
            log::warn!("drawImage failed: {:?}", e);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) {
        self.ctx.save();
        self.ctx.set_stroke_style_str(&style.color.to_css());
        self.ctx.set_line_width(style.width);
        self.set_dash(&style.dash);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        self.ctx.restore();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.ctx.save();
        self.ctx.set_font(&style.css_font());
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(&style.color.to_css());
        if let Err(e) = self.ctx.fill_text(text, x, y) {
            log::warn!("fillText failed: {:?}", e);
        }
        self.ctx.restore();
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> f64 {
        self.ctx.save();
        self.ctx.set_font(&style.css_font());
        let width = match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(e) => {
                log::warn!("measureText failed: {:?}", e);
                text.chars().count() as f64 * style.size * 0.6
            }
        };
        self.ctx.restore();
        width
    }
}
