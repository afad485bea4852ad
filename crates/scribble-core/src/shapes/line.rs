//! Line shape.

use super::{ShapeId, ShapeTrait};
use crate::config::Tolerances;
use crate::geometry::{self, Anchors};
use kurbo::{Affine, BezPath, Line as KurboLine, Point, Rect, Shape as KurboShape};

/// A straight line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line.
    pub fn new(id: ShapeId, start: Point, end: Point) -> Self {
        Self { id, start, end }
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.start, self.end)
    }
}

impl ShapeTrait for Line {
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

    fn contains(&self, point: Point, tolerances: &Tolerances) -> bool {
        geometry::on_segment(self.start, self.end, point, tolerances.line_slack)
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn transform(&mut self, affine: Affine) {
        self.start = affine * self.start;
        self.end = affine * self.end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start: Point, end: Point) -> Line {
        Line::new(ShapeId::new(0), start, end)
    }

    #[test]
    fn test_to_path_spans_endpoints() {
        let line = line(Point::new(0.0, 0.0), Point::new(100.0, 40.0));
        let path = line.to_path();
        assert_eq!(path.elements().len(), 2);
        let bbox = KurboShape::bounding_box(&path);
        assert!((bbox.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bbox.y1 - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_contains() {
        let line = line(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let tolerances = Tolerances::default();
        assert!(line.contains(Point::new(50.0, 0.0), &tolerances));
        assert!(line.contains(Point::new(0.0, 0.0), &tolerances));
        assert!(!line.contains(Point::new(50.0, 20.0), &tolerances));
    }

    #[test]
    fn test_bounds() {
        let line = line(Point::new(50.0, 80.0), Point::new(10.0, 20.0));
        let bounds = line.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate() {
        let mut line = line(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        line.transform(Affine::translate((5.0, -5.0)));
        assert_eq!(line.start, Point::new(5.0, -5.0));
        assert_eq!(line.end, Point::new(15.0, 5.0));
    }
}
