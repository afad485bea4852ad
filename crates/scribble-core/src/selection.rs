//! Hit testing and manipulation handle system.

use crate::config::Tolerances;
use crate::geometry::{self, Anchors};
use crate::shapes::{Shape, ShapeId, ShapeTrait};
use kurbo::Point;
use std::fmt;

/// Corner positions, named after the anchors they sit on.
///
/// `TopLeft` is `(x1, y1)` and `BottomRight` is `(x2, y2)`; after
/// normalization those are the geometric top-left and bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Corners in hit-test precedence order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Position of this corner for the given anchors.
    pub fn position(self, anchors: &Anchors) -> Point {
        match self {
            Corner::TopLeft => Point::new(anchors.x1, anchors.y1),
            Corner::TopRight => Point::new(anchors.x2, anchors.y1),
            Corner::BottomLeft => Point::new(anchors.x1, anchors.y2),
            Corner::BottomRight => Point::new(anchors.x2, anchors.y2),
        }
    }
}

/// The semantic region of a shape under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// The body of the shape.
    Inside,
    /// A rectangle corner.
    Corner(Corner),
    /// First endpoint of a line, or first sample of a stroke.
    Start,
    /// Second endpoint of a line, or second-to-last sample of a stroke.
    End,
    /// The band just outside an ellipse.
    Border,
}

impl Zone {
    /// Short tag for the zone.
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Inside => "inside",
            Zone::Corner(Corner::TopLeft) => "tl",
            Zone::Corner(Corner::TopRight) => "tr",
            Zone::Corner(Corner::BottomLeft) => "bl",
            Zone::Corner(Corner::BottomRight) => "br",
            Zone::Start => "start",
            Zone::End => "end",
            Zone::Border => "border",
        }
    }

    /// Whether dragging this zone resizes rather than moves.
    pub fn is_handle(self) -> bool {
        !matches!(self, Zone::Inside)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving a cursor position against the shape list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// The shape under the cursor.
    pub id: ShapeId,
    /// Where on the shape the cursor is.
    pub zone: Zone,
}

/// Find which zone of `shape` (if any) contains `point`.
///
/// Handles take precedence over the body.
pub fn zone_within(shape: &Shape, point: Point, tolerances: &Tolerances) -> Option<Zone> {
    let eps = tolerances.handle;
    match shape {
        Shape::Rectangle(rect) => {
            let anchors = rect.anchors();
            Corner::ALL
                .iter()
                .find_map(|&corner| {
                    geometry::near_point(point, corner.position(&anchors), eps, Zone::Corner(corner))
                })
                .or_else(|| geometry::rect_contains(rect.start, rect.end, point).then_some(Zone::Inside))
        }
        Shape::Line(line) => geometry::near_point(point, line.start, eps, Zone::Start)
            .or_else(|| geometry::near_point(point, line.end, eps, Zone::End))
            .or_else(|| {
                geometry::on_segment(line.start, line.end, point, tolerances.line_slack)
                    .then_some(Zone::Inside)
            }),
        Shape::Ellipse(ellipse) => {
            let norm = ellipse.normalized(point)?;
            if norm <= 1.0 {
                Some(Zone::Inside)
            } else if norm <= 1.0 + tolerances.border_band {
                Some(Zone::Border)
            } else {
                None
            }
        }
        Shape::Freehand(stroke) => stroke
            .start_point()
            .and_then(|p| geometry::near_point(point, p, eps, Zone::Start))
            .or_else(|| {
                stroke
                    .end_handle_point()
                    .and_then(|p| geometry::near_point(point, p, eps, Zone::End))
            })
            .or_else(|| {
                geometry::polyline_hit(&stroke.points, point, tolerances.stroke_slack)
                    .then_some(Zone::Inside)
            }),
        Shape::EraserMarker(_) => None,
    }
}

/// Resolve the best shape under `point`.
///
/// Among all shapes with a zone at `point`, the one whose center is nearest
/// wins, so a small shape inside a larger one is preferred. Equal distances
/// go to the lowest id.
pub fn resolve<'a, I>(point: Point, shapes: I, tolerances: &Tolerances) -> Option<Hit>
where
    I: IntoIterator<Item = &'a Shape>,
{
    let best = shapes
        .into_iter()
        .filter_map(|shape| {
            let zone = zone_within(shape, point, tolerances)?;
            let dist = geometry::distance(shape.center(), point);
            Some((dist, shape.id(), zone))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, id, zone)| Hit { id, zone });

    log::trace!("resolve {:?} -> {:?}", point, best);
    best
}

/// Cursor affordance the input layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Crosshair,
    Move,
    /// Diagonal resize along the top-left/bottom-right axis.
    NwseResize,
    /// Diagonal resize along the top-right/bottom-left axis.
    NeswResize,
    /// Radial scaling of an ellipse.
    Scale,
    Grabbing,
}

/// Map a zone to its cursor affordance.
pub fn zone_to_cursor(zone: Option<Zone>) -> CursorIcon {
    match zone {
        Some(Zone::Corner(Corner::TopLeft | Corner::BottomRight)) => CursorIcon::NwseResize,
        Some(Zone::Corner(Corner::TopRight | Corner::BottomLeft)) => CursorIcon::NeswResize,
        Some(Zone::Start) => CursorIcon::NwseResize,
        Some(Zone::End) => CursorIcon::NeswResize,
        Some(Zone::Inside) => CursorIcon::Move,
        Some(Zone::Border) => CursorIcon::Scale,
        None => CursorIcon::Default,
    }
}

/// Move the anchor(s) grabbed by `zone` to `cursor`.
///
/// Returns `None` for zones that do not resize.
pub fn apply_resize(zone: Zone, cursor: Point, anchors: Anchors) -> Option<Anchors> {
    let Anchors { x1, y1, x2, y2 } = anchors;
    let resized = match zone {
        Zone::Corner(Corner::TopLeft) | Zone::Start => Anchors::new(cursor.x, cursor.y, x2, y2),
        Zone::Corner(Corner::TopRight) => Anchors::new(x1, cursor.y, cursor.x, y2),
        Zone::Corner(Corner::BottomLeft) => Anchors::new(cursor.x, y1, x2, cursor.y),
        Zone::Corner(Corner::BottomRight) | Zone::End | Zone::Border => {
            Anchors::new(x1, y1, cursor.x, cursor.y)
        }
        Zone::Inside => return None,
    };
    Some(resized)
}
