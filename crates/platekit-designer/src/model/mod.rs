//! Shape document model
//!
//! The editable plate: shapes made of vertices, per-vertex corner settings
//! and the drilling holes. Every vertex carries a stable [`VertexId`] and its
//! own [`CornerSetting`], so inserting or deleting vertices never needs any
//! re-keying. Index-aligned corner lists only exist at the serialization
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

mod corner;
mod document;
mod hole;
mod shape;

pub use corner::{CornerKind, CornerSetting, DEFAULT_CORNER_RADIUS};
pub use document::{DocumentMeasurements, ShapeDocument};
pub use hole::{DrillingHole, HoleClearances, HoleId};
pub use shape::{Shape, ShapeId, Vertex, MIN_VERTICES};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Stable vertex identity, never reused within an editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub u64);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Allocates vertex and shape ids for one editing session.
///
/// Lives beside the edit history rather than inside snapshots, so undoing
/// never rewinds the counter and ids are never handed out twice.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start after the highest id already in use (after loading a document).
    pub fn starting_after(document: &ShapeDocument) -> Self {
        let max_vertex = document
            .shapes
            .iter()
            .flat_map(|s| s.vertices.iter().map(|v| v.id.0))
            .max();
        let max_shape = document.shapes.iter().map(|s| s.id.0).max();
        let next = max_vertex.max(max_shape).map(|m| m + 1).unwrap_or(0);
        Self { next }
    }

    /// The next id that will be handed out.
    pub fn peek(&self) -> u64 {
        self.next
    }

    pub fn vertex_id(&mut self) -> VertexId {
        VertexId(self.bump())
    }

    pub fn shape_id(&mut self) -> ShapeId {
        ShapeId(self.bump())
    }

    fn bump(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}
