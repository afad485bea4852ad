//! Geometry kernel: distances, proximity and containment tests.
//!
//! Every function works in world space and makes no assumption about the
//! ordering of the anchor points it is given.

use kurbo::{Point, Rect, Vec2};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a - b).hypot()
}

/// Returns `tag` if `point` lies strictly within `tolerance` of `target` on both axes.
pub fn near_point<T>(point: Point, target: Point, tolerance: f64, tag: T) -> Option<T> {
    if (point.x - target.x).abs() < tolerance && (point.y - target.y).abs() < tolerance {
        Some(tag)
    } else {
        None
    }
}

/// Triangle-inequality test for a point lying on the segment `a`-`b`.
///
/// The deviation `|ab - (ac + bc)|` is compared against `max_slack`. This is
/// not a perpendicular distance: the accepted band is thin near the endpoints
/// and widens towards the middle, and it grows with the segment length.
pub fn on_segment(a: Point, b: Point, point: Point, max_slack: f64) -> bool {
    let deviation = distance(a, b) - (distance(a, point) + distance(b, point));
    deviation.abs() < max_slack
}

/// Axis-aligned containment in the box spanned by `a` and `b` (edges inclusive).
pub fn rect_contains(a: Point, b: Point, point: Point) -> bool {
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
    point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
}

/// Squared normalized radius of `point` relative to the ellipse inscribed in
/// the box spanned by `a` and `b`.
///
/// Values `<= 1` are inside the ellipse. Returns `None` when either radius is
/// zero, since the ellipse has no interior to normalize against.
pub fn ellipse_norm(a: Point, b: Point, point: Point) -> Option<f64> {
    let radius_x = (a.x - b.x).abs() / 2.0;
    let radius_y = (a.y - b.y).abs() / 2.0;
    if radius_x < f64::EPSILON || radius_y < f64::EPSILON {
        return None;
    }
    let center_x = a.x.min(b.x) + radius_x;
    let center_y = a.y.min(b.y) + radius_y;
    let nx = (point.x - center_x) / radius_x;
    let ny = (point.y - center_y) / radius_y;
    Some(nx * nx + ny * ny)
}

/// True if `point` passes [`on_segment`] for any consecutive pair of `points`.
pub fn polyline_hit(points: &[Point], point: Point, max_slack: f64) -> bool {
    points
        .windows(2)
        .any(|w| on_segment(w[0], w[1], point, max_slack))
}

/// Axis-aligned bounding box of a point sequence, `None` when empty.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let init = Rect::from_points(*first, *first);
    Some(points.iter().skip(1).fold(init, |r, p| r.union_pt(*p)))
}

/// The two defining points of a shape.
///
/// For lines these are the endpoints; for rectangles and circles, opposite
/// corners of the bounding box. The pair is not assumed to be ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Anchors {
    /// Create anchors from raw coordinates.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create anchors from two points.
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// The first anchor.
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// The second anchor.
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Normalized bounding box of both anchors.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start(), self.end())
    }

    /// Center of the anchor box.
    pub fn center(&self) -> Point {
        self.start().midpoint(self.end())
    }

    /// Width and height, as signed extents from the first anchor.
    pub fn extent(&self) -> Vec2 {
        self.end() - self.start()
    }

    /// Anchors shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::from_points(self.start() + delta, self.end() + delta)
    }

    /// Anchors reordered so the first is the min corner and the second the max corner.
    pub fn min_max(&self) -> Self {
        let bounds = self.bounds();
        Self::new(bounds.x0, bounds.y0, bounds.x1, bounds.y1)
    }

    /// Anchors reordered so the first has the smaller x (ties: smaller y).
    pub fn left_to_right(&self) -> Self {
        if self.x1 < self.x2 || (self.x1 == self.x2 && self.y1 <= self.y2) {
            *self
        } else {
            Self::new(self.x2, self.y2, self.x1, self.y1)
        }
    }
}
