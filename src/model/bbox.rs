//! Bounding box geometry.

use serde::{Deserialize, Serialize};
use urchin_canvas::{Point, Rect};

/// An axis-aligned annotated region in surface pixel coordinates.
///
/// Boxes built through [`BoundingBox::from_corners`] satisfy `x1 <= x2` and
/// `y1 <= y2`. Boxes supplied by a host are stored as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Index into the annotator's class list.
    pub class_id: u32,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, class_id: u32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            class_id,
        }
    }

    /// Create a normalized box from two arbitrary corner points.
    pub fn from_corners(a: Point, b: Point, class_id: u32) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
            class_id,
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn is_normalized(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Check if a point lies inside the box (edges included).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// Check if a point lies within `tolerance` of one of the four edges.
    ///
    /// Each edge test is limited to the edge's own span widened by the
    /// tolerance, so a point far along the edge's line does not match.
    pub fn is_near_edge(&self, p: Point, tolerance: f64) -> bool {
        let within_x = p.x >= self.x1 - tolerance && p.x <= self.x2 + tolerance;
        let within_y = p.y >= self.y1 - tolerance && p.y <= self.y2 + tolerance;

        let near_top = (p.y - self.y1).abs() <= tolerance && within_x;
        let near_bottom = (p.y - self.y2).abs() <= tolerance && within_x;
        let near_left = (p.x - self.x1).abs() <= tolerance && within_y;
        let near_right = (p.x - self.x2).abs() <= tolerance && within_y;

        near_top || near_bottom || near_left || near_right
    }

    /// Hit test: inside, or near an edge. Keeps thin boxes selectable.
    pub fn hit(&self, p: Point, tolerance: f64) -> bool {
        self.contains(p) || self.is_near_edge(p, tolerance)
    }

    /// The same box moved rigidly by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
            class_id: self.class_id,
        }
    }

    /// Shift the box so it lies within `[0, width] x [0, height]`, keeping
    /// its size. A box larger than the bounds is pinned to the origin.
    pub fn clamped_within(&self, width: f64, height: f64) -> Self {
        let w = self.width();
        let h = self.height();
        let x1 = self.x1.min(width - w).max(0.0);
        let y1 = self.y1.min(height - h).max(0.0);
        Self {
            x1,
            y1,
            x2: x1 + w,
            y2: y1 + h,
            class_id: self.class_id,
        }
    }

    /// Compare geometry only, ignoring the class.
    pub fn same_corners(&self, other: &BoundingBox) -> bool {
        self.x1 == other.x1 && self.y1 == other.y1 && self.x2 == other.x2 && self.y2 == other.y2
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x1, self.y1, self.width(), self.height())
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x1, self.y1),
            Point::new(self.x2, self.y1),
            Point::new(self.x2, self.y2),
            Point::new(self.x1, self.y2),
        ]
    }
}
