//! Freehand drawing shape and stroke rescaling.

use super::{ShapeId, ShapeTrait};
use crate::config::Tolerances;
use crate::geometry::{self, Anchors};
use kurbo::{Affine, BezPath, Point, Rect};

/// A freehand stroke (series of sampled points in drawing order).
#[derive(Debug, Clone, PartialEq)]
pub struct Freehand {
    pub(crate) id: ShapeId,
    /// Points in the freehand path.
    pub points: Vec<Point>,
    /// Per-point pressure values. Empty when the input had no pressure,
    /// otherwise the same length as `points`.
    pub pressures: Vec<f64>,
}

impl Freehand {
    /// Create a stroke seeded with its first sample.
    pub fn new(id: ShapeId, first: Point) -> Self {
        Self::from_points(id, vec![first])
    }

    /// Create from existing points.
    pub fn from_points(id: ShapeId, points: Vec<Point>) -> Self {
        Self {
            id,
            points,
            pressures: Vec::new(),
        }
    }

    /// Create from existing points with pressure values.
    pub fn from_points_with_pressure(id: ShapeId, points: Vec<Point>, pressures: Vec<f64>) -> Self {
        debug_assert_eq!(points.len(), pressures.len());
        Self {
            id,
            points,
            pressures,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
        if !self.pressures.is_empty() {
            self.pressures.push(1.0);
        }
    }

    /// Add a point with an explicit pressure value.
    pub fn add_point_with_pressure(&mut self, point: Point, pressure: f64) {
        if self.pressures.is_empty() {
            self.pressures = vec![1.0; self.points.len()];
        }
        self.points.push(point);
        self.pressures.push(pressure);
    }

    /// Pressure recorded for point `index`, if any.
    pub fn pressure(&self, index: usize) -> Option<f64> {
        self.pressures.get(index).copied()
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first sampled point.
    pub fn start_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// The point used as the stroke's `end` handle: the second-to-last sample.
    ///
    /// Strokes with fewer than two points have no end handle.
    pub fn end_handle_point(&self) -> Option<Point> {
        self.points.len().checked_sub(2).map(|i| self.points[i])
    }

    /// Rescale the stroke so its bounding box spans `new_min`..`new_max`.
    pub fn rescale_to(&mut self, new_min: Point, new_max: Point) {
        self.points = rescale_stroke_to(&self.points, new_min, new_max);
    }
}

/// Rescale a stroke so its bounding box's max corner moves to `(new_max_x, new_max_y)`.
///
/// The min corner stays fixed. An axis with zero span keeps a scale of 1.
pub fn rescale_stroke(points: &[Point], new_max_x: f64, new_max_y: f64) -> Vec<Point> {
    let Some(bbox) = geometry::bounding_box(points) else {
        return Vec::new();
    };
    rescale_stroke_to(points, Point::new(bbox.x0, bbox.y0), Point::new(new_max_x, new_max_y))
}

/// Map a stroke from its current bounding box onto the box `new_min`..`new_max`.
///
/// `new_min` may lie past `new_max` on either axis, which mirrors the stroke.
pub fn rescale_stroke_to(points: &[Point], new_min: Point, new_max: Point) -> Vec<Point> {
    let Some(bbox) = geometry::bounding_box(points) else {
        return Vec::new();
    };
    let scale_x = axis_scale(bbox.x0, bbox.x1, new_min.x, new_max.x);
    let scale_y = axis_scale(bbox.y0, bbox.y1, new_min.y, new_max.y);

    // Zero-span axes keep their original coordinate.
    let origin_x = if scale_x.is_some() { new_min.x } else { bbox.x0 };
    let origin_y = if scale_y.is_some() { new_min.y } else { bbox.y0 };
    let scale_x = scale_x.unwrap_or(1.0);
    let scale_y = scale_y.unwrap_or(1.0);

    points
        .iter()
        .map(|p| {
            Point::new(
                origin_x + (p.x - bbox.x0) * scale_x,
                origin_y + (p.y - bbox.y0) * scale_y,
            )
        })
        .collect()
}

fn axis_scale(old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> Option<f64> {
    let span = old_max - old_min;
    if span.abs() < f64::EPSILON {
        return None;
    }
    Some((new_max - new_min) / span)
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn anchors(&self) -> Anchors {
        let bounds = self.bounds();
        Anchors::new(bounds.x0, bounds.y0, bounds.x1, bounds.y1)
    }

    fn set_anchors(&mut self, anchors: Anchors) {
        self.rescale_to(anchors.start(), anchors.end());
    }

    fn bounds(&self) -> Rect {
        geometry::bounding_box(&self.points).unwrap_or(Rect::ZERO)
    }

    fn contains(&self, point: Point, tolerances: &Tolerances) -> bool {
        geometry::polyline_hit(&self.points, point, tolerances.stroke_slack)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let Some(first) = self.points.first() else {
            return path;
        };

        path.move_to(*first);
        for point in self.points.iter().skip(1) {
            path.line_to(*point);
        }

        path
    }

    fn transform(&mut self, affine: Affine) {
        for point in &mut self.points {
            *point = affine * *point;
        }
    }
}
