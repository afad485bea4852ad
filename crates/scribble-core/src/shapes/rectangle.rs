//! Rectangle shape.

use super::{ShapeId, ShapeTrait};
use crate::config::Tolerances;
use crate::geometry::{self, Anchors};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape, Size};

/// An axis-aligned rectangle defined by two opposite corners.
///
/// While drawing, `start` stays where the pointer went down and `end` follows
/// the pointer, so the corners are only ordered after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// First corner (top-left once normalized).
    pub start: Point,
    /// Opposite corner (bottom-right once normalized).
    pub end: Point,
}

impl Rectangle {
    /// Create a rectangle from two corner points.
    pub fn from_corners(id: ShapeId, start: Point, end: Point) -> Self {
        Self { id, start, end }
    }

    /// Signed size measured from `start`, as the renderer expects it.
    pub fn signed_size(&self) -> Size {
        Size::new(self.end.x - self.start.x, self.end.y - self.start.y)
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn anchors(&self) -> Anchors {
        Anchors::from_points(self.start, self.end)
    }

    fn set_anchors(&mut self, anchors: Anchors) {
        self.start = anchors.start();
        self.end = anchors.end();
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn contains(&self, point: Point, _tolerances: &Tolerances) -> bool {
        geometry::rect_contains(self.start, self.end, point)
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn transform(&mut self, affine: Affine) {
        self.start = affine * self.start;
        self.end = affine * self.end;
    }
}
