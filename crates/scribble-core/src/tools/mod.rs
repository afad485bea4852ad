//! Tool system for the whiteboard.
//!
//! The tool manager owns the gesture context: everything a drag needs to
//! remember between pointer events lives here, never on the shapes.

use crate::error::CoreError;
use crate::selection::Zone;
use crate::shapes::{Shape, ShapeId, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Selection,
    Line,
    Rectangle,
    Circle,
    Freehand,
    Eraser,
    Pan,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Selection,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Freehand,
        ToolKind::Eraser,
        ToolKind::Pan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Selection => "selection",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Freehand => "freehand",
            ToolKind::Eraser => "eraser",
            ToolKind::Pan => "pan",
        }
    }

    /// The shape kind this tool draws, if it is a drawing tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Freehand => Some(ShapeKind::Freehand),
            ToolKind::Selection | ToolKind::Eraser | ToolKind::Pan => None,
        }
    }

    pub fn is_drawing(self) -> bool {
        self.shape_kind().is_some()
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| CoreError::InvalidKind(s.to_string()))
    }
}

impl TryFrom<ToolKind> for ShapeKind {
    type Error = CoreError;

    fn try_from(tool: ToolKind) -> Result<Self, Self::Error> {
        tool.shape_kind()
            .ok_or_else(|| CoreError::InvalidKind(tool.as_str().to_string()))
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A new shape is being drawn.
    Drawing { id: ShapeId },
    /// A shape is being dragged by its body.
    Moving {
        id: ShapeId,
        /// The shape as it was when the drag started.
        original: Shape,
        /// World point where the shape was grabbed.
        grab: Point,
    },
    /// A shape is being resized by one of its handles.
    Resizing {
        id: ShapeId,
        zone: Zone,
        /// The shape as it was when the drag started.
        original: Shape,
    },
    /// The view is being dragged.
    Panning {
        /// Last pointer position in device space.
        last: Point,
    },
    /// The eraser is held down.
    Erasing {
        /// Trail of the eraser, for preview only.
        marker: Shape,
        /// Whether this gesture has already committed a removal.
        erased_any: bool,
    },
}

/// Manages the current tool and its gesture context.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: Gesture,
}

impl ToolManager {
    /// Create a tool manager with `tool` selected.
    pub fn new(tool: ToolKind) -> Self {
        Self {
            current_tool: tool,
            state: Gesture::Idle,
        }
    }

    /// Set the current tool. Any gesture in flight is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = Gesture::Idle;
    }

    /// Replace the gesture context.
    pub fn begin(&mut self, gesture: Gesture) {
        self.state = gesture;
    }

    /// End the current gesture, returning its context.
    pub fn end(&mut self) -> Gesture {
        std::mem::take(&mut self.state)
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, Gesture::Idle)
    }

    /// The eraser trail, while erasing.
    pub fn preview_shape(&self) -> Option<&Shape> {
        match &self.state {
            Gesture::Erasing { marker, .. } => Some(marker),
            _ => None,
        }
    }
}
