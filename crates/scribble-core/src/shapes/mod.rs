//! Shape definitions for the whiteboard.

mod ellipse;
mod freehand;
mod line;
mod rectangle;

pub use ellipse::Ellipse;
pub use freehand::{Freehand, rescale_stroke, rescale_stroke_to};
pub use line::Line;
pub use rectangle::Rectangle;

use crate::config::Tolerances;
use crate::error::CoreError;
use crate::geometry::Anchors;
use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for shapes.
///
/// Ids are handed out in increasing order by the document and never reused
/// within a session, so a lower id always means an earlier-drawn shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(u64);

impl ShapeId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kinds of shape the factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    Freehand,
    /// Transient trail drawn under the eraser; never stored in a document.
    EraserMarker,
}

impl ShapeKind {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Freehand => "freehand",
            ShapeKind::EraserMarker => "eraser-marker",
        }
    }

    /// Whether finished shapes of this kind get their corners normalized.
    pub fn needs_normalization(self) -> bool {
        matches!(self, ShapeKind::Line | ShapeKind::Rectangle | ShapeKind::Circle)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ShapeKind::Line),
            "rectangle" => Ok(ShapeKind::Rectangle),
            "circle" | "ellipse" => Ok(ShapeKind::Circle),
            "freehand" | "pencil" => Ok(ShapeKind::Freehand),
            "eraser-marker" => Ok(ShapeKind::EraserMarker),
            other => Err(CoreError::InvalidKind(other.to_string())),
        }
    }
}

/// Kind-specific parameters handed to the external renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderParams<'a> {
    Line { start: Point, end: Point },
    /// Origin is the first anchor; the size is signed.
    Rectangle { origin: Point, size: Size },
    Ellipse { center: Point, radius_x: f64, radius_y: f64 },
    /// Input for the stroke-outline generator.
    Stroke { points: &'a [Point], pressures: &'a [f64] },
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// The two defining points of the shape.
    fn anchors(&self) -> Anchors;

    /// Replace the defining points, rebuilding derived geometry.
    fn set_anchors(&mut self, anchors: Anchors);

    /// Get the bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in world coordinates) lies on or in this shape.
    fn contains(&self, point: Point, tolerances: &Tolerances) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Apply a transform to this shape.
    fn transform(&mut self, affine: Affine);
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Freehand(Freehand),
    EraserMarker(Freehand),
}

impl Shape {
    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Line(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Freehand(s) | Shape::EraserMarker(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Line(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Freehand(s) | Shape::EraserMarker(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.as_trait().id()
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Circle,
            Shape::Freehand(_) => ShapeKind::Freehand,
            Shape::EraserMarker(_) => ShapeKind::EraserMarker,
        }
    }

    /// Defining points. For strokes this is the bounding box.
    pub fn anchors(&self) -> Anchors {
        self.as_trait().anchors()
    }

    pub fn set_anchors(&mut self, anchors: Anchors) {
        self.as_trait_mut().set_anchors(anchors);
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    /// Geometric center used to rank overlapping hits.
    pub fn center(&self) -> Point {
        self.anchors().center()
    }

    /// Point-in-shape test. The eraser trail is never hit.
    pub fn contains(&self, point: Point, tolerances: &Tolerances) -> bool {
        match self {
            Shape::EraserMarker(_) => false,
            _ => self.as_trait().contains(point, tolerances),
        }
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    pub fn transform(&mut self, affine: Affine) {
        self.as_trait_mut().transform(affine);
    }

    /// Move the whole shape by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.transform(Affine::translate(delta));
    }

    /// Parameters the external renderer needs to draw this shape.
    pub fn render_params(&self) -> RenderParams<'_> {
        match self {
            Shape::Line(line) => RenderParams::Line {
                start: line.start,
                end: line.end,
            },
            Shape::Rectangle(rect) => RenderParams::Rectangle {
                origin: rect.start,
                size: rect.signed_size(),
            },
            Shape::Ellipse(ellipse) => RenderParams::Ellipse {
                center: ellipse.center(),
                radius_x: ellipse.radius_x(),
                radius_y: ellipse.radius_y(),
            },
            Shape::Freehand(stroke) | Shape::EraserMarker(stroke) => RenderParams::Stroke {
                points: &stroke.points,
                pressures: &stroke.pressures,
            },
        }
    }

    /// Get the stroke if this shape is a freehand drawing.
    pub fn as_freehand(&self) -> Option<&Freehand> {
        match self {
            Shape::Freehand(f) => Some(f),
            _ => None,
        }
    }
}

/// Build a shape of `kind` from two anchor points.
///
/// Strokes ignore `end` and are seeded with `start` as their only sample.
pub fn create_shape(id: ShapeId, start: Point, end: Point, kind: ShapeKind) -> Shape {
    match kind {
        ShapeKind::Line => Shape::Line(Line::new(id, start, end)),
        ShapeKind::Rectangle => Shape::Rectangle(Rectangle::from_corners(id, start, end)),
        ShapeKind::Circle => Shape::Ellipse(Ellipse::from_corners(id, start, end)),
        ShapeKind::Freehand => Shape::Freehand(Freehand::new(id, start)),
        ShapeKind::EraserMarker => Shape::EraserMarker(Freehand::new(id, start)),
    }
}

/// Append a sample to a stroke. Returns false for shapes without samples.
pub fn append_point(shape: &mut Shape, point: Point) -> bool {
    match shape {
        Shape::Freehand(stroke) | Shape::EraserMarker(stroke) => {
            stroke.add_point(point);
            true
        }
        Shape::Line(_) | Shape::Rectangle(_) | Shape::Ellipse(_) => false,
    }
}

/// Canonical anchor ordering for a finished shape.
///
/// Rectangles get min/max corners; lines and circles get their leftmost
/// (then topmost) anchor first. Strokes are unchanged.
pub fn normalize_corners(shape: &Shape) -> Shape {
    let mut normalized = shape.clone();
    match &mut normalized {
        Shape::Rectangle(rect) => {
            let anchors = rect.anchors().min_max();
            rect.set_anchors(anchors);
        }
        Shape::Line(line) => {
            let anchors = line.anchors().left_to_right();
            line.set_anchors(anchors);
        }
        Shape::Ellipse(ellipse) => {
            let anchors = ellipse.anchors().left_to_right();
            ellipse.set_anchors(anchors);
        }
        Shape::Freehand(_) | Shape::EraserMarker(_) => {}
    }
    normalized
}
