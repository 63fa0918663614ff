//! Drawing the annotation overlay.

use urchin_canvas::{Color, Point, Rect, StrokeStyle, Surface, TextStyle};

use super::{Annotator, DragState};
use crate::config::RenderStyle;
use crate::model::{BoundingBox, ClassDef};

impl<S: Surface> Annotator<S> {
    /// Repaint the whole surface: background, every box in insertion order,
    /// then the create-drag preview if one is in progress.
    pub fn redraw(&mut self) {
        self.surface.clear();

        if let Some(image) = &self.background {
            self.surface.draw_image(image, 0.0, 0.0);
        }

        for (index, bbox) in self.boxes.iter().enumerate() {
            let class = self.classes.resolve(bbox.class_id);
            if self.selected == Some(index) {
                draw_selected_box(&mut self.surface, bbox, class, &self.style);
            } else {
                draw_box(&mut self.surface, bbox, class, &self.style);
            }
        }

        if let DragState::Creating { start, current } = self.drag {
            draw_preview(&mut self.surface, start, current, &self.style);
        }
    }
}

fn text_style(style: &RenderStyle) -> TextStyle {
    TextStyle {
        color: style.label_text_color,
        size: style.label_font_size,
        family: style.label_font_family.clone(),
    }
}

fn draw_box<S: Surface>(
    surface: &mut S,
    bbox: &BoundingBox,
    class: &ClassDef,
    style: &RenderStyle,
) {
    surface.stroke_rect(bbox.rect(), &StrokeStyle::solid(class.color, style.line_width));
    if style.show_labels {
        draw_tag(surface, &class.name, class.color, Point::new(bbox.x1, bbox.y1), style);
    }
}

fn draw_selected_box<S: Surface>(
    surface: &mut S,
    bbox: &BoundingBox,
    class: &ClassDef,
    style: &RenderStyle,
) {
    let rect = bbox.rect();
    surface.fill_rect(rect, class.color.with_alpha(style.selection_fill_alpha));
    surface.stroke_rect(
        rect,
        &StrokeStyle::solid(style.selection_color, style.selected_line_width),
    );
    surface.stroke_rect(
        rect.inflate(style.selection_ring_offset),
        &StrokeStyle::dashed(style.selection_color, 1.0, &style.dash),
    );
    for corner in bbox.corners() {
        surface.fill_rect(Rect::centered(corner, style.handle_size), style.selection_color);
    }
    if style.show_labels {
        draw_tag(surface, &class.name, class.color, Point::new(bbox.x1, bbox.y1), style);
    }
}

fn draw_preview<S: Surface>(surface: &mut S, start: Point, current: Point, style: &RenderStyle) {
    let rect = Rect::from_corners(start, current);
    surface.stroke_rect(
        rect,
        &StrokeStyle::dashed(style.preview_color, style.line_width, &style.dash),
    );

    let size = format!("{:.0} × {:.0}", rect.width, rect.height);
    draw_tag(
        surface,
        &size,
        Color::BLACK.with_alpha(0.6),
        Point::new(rect.x, rect.y),
        style,
    );
}

/// Text on a filled plate sitting on top of `anchor`, or just below it when
/// there is no room above.
fn draw_tag<S: Surface>(
    surface: &mut S,
    text: &str,
    background: Color,
    anchor: Point,
    style: &RenderStyle,
) {
    let text_style = text_style(style);
    let pad = style.label_padding;
    let width = surface.measure_text(text, &text_style) + 2.0 * pad;
    let height = style.label_font_size + 2.0 * pad;

    let y = if anchor.y - height >= 0.0 {
        anchor.y - height
    } else {
        anchor.y
    };

    surface.fill_rect(Rect::new(anchor.x, y, width, height), background);
    surface.fill_text(text, anchor.x + pad, y + pad, &text_style);
}
