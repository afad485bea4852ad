//! Ellipse shape (the circle tool).

use super::{ShapeId, ShapeTrait};
use crate::config::Tolerances;
use crate::geometry::{self, Anchors};
use kurbo::{Affine, BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape};

/// An ellipse inscribed in the box spanned by two anchor points.
///
/// The radii are independent, so a "circle" drawn off-square is an ellipse.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// First corner of the bounding box.
    pub start: Point,
    /// Opposite corner of the bounding box.
    pub end: Point,
}

impl Ellipse {
    /// Create an ellipse from two corners of its bounding box.
    pub fn from_corners(id: ShapeId, start: Point, end: Point) -> Self {
        Self { id, start, end }
    }

    /// Center point.
    pub fn center(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Horizontal radius.
    pub fn radius_x(&self) -> f64 {
        (self.end.x - self.start.x).abs() / 2.0
    }

    /// Vertical radius.
    pub fn radius_y(&self) -> f64 {
        (self.end.y - self.start.y).abs() / 2.0
    }

    /// Squared normalized distance from the center (`<= 1` is inside).
    pub fn normalized(&self, point: Point) -> Option<f64> {
        geometry::ellipse_norm(self.start, self.end, point)
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::new(self.center(), (self.radius_x(), self.radius_y()), 0.0)
    }
}

impl ShapeTrait for Ellipse {
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
        Rect::from_points(self.start, self.end)
    }

    fn contains(&self, point: Point, _tolerances: &Tolerances) -> bool {
        self.normalized(point).is_some_and(|n| n <= 1.0)
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn transform(&mut self, affine: Affine) {
        self.start = affine * self.start;
        self.end = affine * self.end;
    }
}
