//! Tool modes and their gesture state.
//!
//! Each mode carries only the transient state it needs, so combinations like
//! "rounding pair selected while adding points" cannot be represented.
//! Switching modes builds a fresh [`ToolState`], which drops whatever the
//! previous mode was holding.

use crate::model::{Point, Shape};
use platekit_core::EditError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mutually exclusive editor tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ToolMode {
    /// Select and move whole shapes
    #[default]
    Select,
    SelectPoint,
    AddPoint,
    DeletePoint,
    RoundByDrag,
    PlaceHole,
}

impl ToolMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolMode::Select => "select",
            ToolMode::SelectPoint => "select-point",
            ToolMode::AddPoint => "add-point",
            ToolMode::DeletePoint => "delete-point",
            ToolMode::RoundByDrag => "round-by-drag",
            ToolMode::PlaceHole => "place-hole",
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(ToolMode::Select),
            "select-point" => Ok(ToolMode::SelectPoint),
            "add-point" => Ok(ToolMode::AddPoint),
            "delete-point" => Ok(ToolMode::DeletePoint),
            "round-by-drag" => Ok(ToolMode::RoundByDrag),
            "place-hole" => Ok(ToolMode::PlaceHole),
            other => Err(format!("Unknown tool mode: {}", other)),
        }
    }
}

/// A vertex addressed by shape index and vertex index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointRef {
    pub shape: usize,
    pub index: usize,
}

impl PointRef {
    pub fn new(shape: usize, index: usize) -> Self {
        Self { shape, index }
    }
}

/// Arrow-key nudge direction (y grows downward, as on screen)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NudgeDirection {
    /// Unit offset for this direction.
    pub fn delta(self) -> (f64, f64) {
        match self {
            NudgeDirection::Up => (0.0, -1.0),
            NudgeDirection::Down => (0.0, 1.0),
            NudgeDirection::Left => (-1.0, 0.0),
            NudgeDirection::Right => (1.0, 0.0),
        }
    }
}

/// Round-by-drag gesture progress
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RoundingState {
    #[default]
    Idle,
    OneSelected(PointRef),
    /// Two adjacent vertices chosen; the midpoint handle is armed.
    TwoSelected(PointRef, PointRef),
    Dragging {
        first: PointRef,
        second: PointRef,
        /// Signed drag distance along the edge perpendicular
        offset: f64,
        preview: Vec<Point>,
    },
}

/// What a vertex click did to the rounding selection
#[derive(Debug, Clone, PartialEq)]
pub enum RoundingClick {
    Selected,
    Deselected,
    /// A valid adjacent pair is ready for dragging
    Ready,
    Ignored,
    Rejected(EditError),
}

impl RoundingState {
    /// The vertices currently chosen, in click order.
    pub fn selected(&self) -> Vec<PointRef> {
        match self {
            RoundingState::Idle => Vec::new(),
            RoundingState::OneSelected(a) => vec![*a],
            RoundingState::TwoSelected(a, b) | RoundingState::Dragging { first: a, second: b, .. } => {
                vec![*a, *b]
            }
        }
    }

    pub fn pair(&self) -> Option<(PointRef, PointRef)> {
        match self {
            RoundingState::TwoSelected(a, b) => Some((*a, *b)),
            RoundingState::Dragging { first, second, .. } => Some((*first, *second)),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<&[Point]> {
        match self {
            RoundingState::Dragging { preview, .. } if !preview.is_empty() => Some(preview),
            _ => None,
        }
    }

    /// Apply a vertex click; `shape` is the shape the clicked vertex belongs to.
    pub fn click(&mut self, clicked: PointRef, shape: &Shape) -> RoundingClick {
        match self.clone() {
            RoundingState::Idle => {
                *self = RoundingState::OneSelected(clicked);
                RoundingClick::Selected
            }
            RoundingState::OneSelected(first) if first == clicked => {
                *self = RoundingState::Idle;
                RoundingClick::Deselected
            }
            RoundingState::OneSelected(first) if first.shape != clicked.shape => {
                RoundingClick::Rejected(EditError::CrossShapeSelection)
            }
            RoundingState::OneSelected(first) => {
                if shape.is_adjacent(first.index, clicked.index) {
                    *self = RoundingState::TwoSelected(first, clicked);
                    RoundingClick::Ready
                } else {
                    *self = RoundingState::Idle;
                    RoundingClick::Rejected(EditError::NonAdjacentPoints {
                        first: first.index,
                        second: clicked.index,
                    })
                }
            }
            RoundingState::TwoSelected(a, b) if clicked == a => {
                *self = RoundingState::OneSelected(b);
                RoundingClick::Deselected
            }
            RoundingState::TwoSelected(a, b) if clicked == b => {
                *self = RoundingState::OneSelected(a);
                RoundingClick::Deselected
            }
            RoundingState::TwoSelected(a, _) if a.shape != clicked.shape => {
                RoundingClick::Rejected(EditError::CrossShapeSelection)
            }
            RoundingState::TwoSelected(..) | RoundingState::Dragging { .. } => RoundingClick::Ignored,
        }
    }
}

/// In-progress whole-shape drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDrag {
    pub shape: usize,
    pub moved: bool,
}

/// The active tool and its gesture state
#[derive(Debug, Clone, PartialEq)]
pub enum ToolState {
    Select {
        selected: Option<usize>,
        drag: Option<ShapeDrag>,
    },
    SelectPoint {
        selected: Option<PointRef>,
        dragging: bool,
    },
    AddPoint,
    DeletePoint,
    RoundByDrag(RoundingState),
    PlaceHole,
}

impl Default for ToolState {
    fn default() -> Self {
        ToolState::for_mode(ToolMode::Select)
    }
}

impl ToolState {
    /// Fresh state for entering `mode`.
    pub fn for_mode(mode: ToolMode) -> Self {
        match mode {
            ToolMode::Select => ToolState::Select {
                selected: None,
                drag: None,
            },
            ToolMode::SelectPoint => ToolState::SelectPoint {
                selected: None,
                dragging: false,
            },
            ToolMode::AddPoint => ToolState::AddPoint,
            ToolMode::DeletePoint => ToolState::DeletePoint,
            ToolMode::RoundByDrag => ToolState::RoundByDrag(RoundingState::Idle),
            ToolMode::PlaceHole => ToolState::PlaceHole,
        }
    }

    pub fn mode(&self) -> ToolMode {
        match self {
            ToolState::Select { .. } => ToolMode::Select,
            ToolState::SelectPoint { .. } => ToolMode::SelectPoint,
            ToolState::AddPoint => ToolMode::AddPoint,
            ToolState::DeletePoint => ToolMode::DeletePoint,
            ToolState::RoundByDrag(_) => ToolMode::RoundByDrag,
            ToolState::PlaceHole => ToolMode::PlaceHole,
        }
    }

    pub fn selected_shape(&self) -> Option<usize> {
        match self {
            ToolState::Select { selected, .. } => *selected,
            _ => None,
        }
    }

    pub fn selected_point(&self) -> Option<PointRef> {
        match self {
            ToolState::SelectPoint { selected, .. } => *selected,
            _ => None,
        }
    }

    pub fn rounding(&self) -> Option<&RoundingState> {
        match self {
            ToolState::RoundByDrag(state) => Some(state),
            _ => None,
        }
    }

    pub fn is_placing_hole(&self) -> bool {
        matches!(self, ToolState::PlaceHole)
    }
}
