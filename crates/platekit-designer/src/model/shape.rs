use super::{CornerSetting, IdAllocator, Point, VertexId};
use crate::geometry::{self, BoundingBox};
use platekit_core::{data::ShapeTemplate, EditError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A shape can never have fewer vertices than this.
pub const MIN_VERTICES: usize = 3;

/// Shape identifier, stable for the editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape-{}", self.0)
    }
}

/// A polygon vertex and its corner finish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Point,
    #[serde(default)]
    pub corner: CornerSetting,
}

impl Vertex {
    pub fn new(id: VertexId, position: Point) -> Self {
        Self {
            id,
            position,
            corner: CornerSetting::default(),
        }
    }
}

/// An editable polygon (closed) or polyline (open)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    #[serde(default)]
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub closed: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

fn default_true() -> bool {
    true
}

impl Shape {
    /// Build a shape from raw points; every corner starts sharp.
    pub fn from_points(
        ids: &mut IdAllocator,
        name: impl Into<String>,
        points: &[Point],
        closed: bool,
    ) -> Result<Self, EditError> {
        if points.len() < MIN_VERTICES {
            return Err(EditError::MinimumVertices {
                minimum: MIN_VERTICES,
                count: points.len(),
            });
        }
        if !points.iter().all(Point::is_finite) {
            return Err(EditError::not_applicable(
                "Create shape",
                "coordinates must be finite",
            ));
        }
        Ok(Self {
            id: ids.shape_id(),
            name: name.into(),
            vertices: points
                .iter()
                .map(|&p| Vertex::new(ids.vertex_id(), p))
                .collect(),
            closed,
            visible: true,
            locked: false,
        })
    }

    /// Convert a catalog template into an editable shape.
    pub fn from_template(ids: &mut IdAllocator, template: &ShapeTemplate) -> Result<Self, EditError> {
        let points: Vec<Point> = template.points.iter().copied().map(Point::from).collect();
        Self::from_points(ids, template.name.clone(), &points, template.closed)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn points(&self) -> Vec<Point> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).map(|v| v.position)
    }

    pub fn vertex_index(&self, id: VertexId) -> Option<usize> {
        self.vertices.iter().position(|v| v.id == id)
    }

    /// Number of edges: n for a closed shape, n - 1 for an open one.
    pub fn edge_count(&self) -> usize {
        match (self.closed, self.vertices.len()) {
            (_, 0) => 0,
            (true, n) => n,
            (false, n) => n - 1,
        }
    }

    /// Endpoints of edge `index` (vertex `index` to the next one).
    pub fn edge(&self, index: usize) -> Option<(Point, Point)> {
        if index >= self.edge_count() {
            return None;
        }
        let n = self.vertices.len();
        Some((
            self.vertices[index].position,
            self.vertices[(index + 1) % n].position,
        ))
    }

    /// Lengths of the edges meeting at `index`: (incoming, outgoing).
    ///
    /// Open shapes have no incoming edge at the first vertex and no outgoing
    /// edge at the last one.
    pub fn adjacent_edge_lengths(&self, index: usize) -> (Option<f64>, Option<f64>) {
        let n = self.vertices.len();
        if index >= n {
            return (None, None);
        }
        let incoming = if index > 0 {
            self.edge(index - 1)
        } else if self.closed {
            self.edge(n - 1)
        } else {
            None
        };
        let outgoing = self.edge(index);
        (
            incoming.map(|(a, b)| geometry::distance(a, b)),
            outgoing.map(|(a, b)| geometry::distance(a, b)),
        )
    }

    /// Two vertices share an edge (including last/first on closed shapes).
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        let n = self.vertices.len();
        if a >= n || b >= n || a == b {
            return false;
        }
        a.abs_diff(b) == 1 || (self.closed && a.min(b) == 0 && a.max(b) == n - 1)
    }

    /// Area of a closed shape; open shapes have none.
    pub fn area(&self) -> f64 {
        if self.closed {
            geometry::polygon_area(&self.points())
        } else {
            0.0
        }
    }

    pub fn perimeter(&self) -> f64 {
        geometry::polygon_perimeter(&self.points(), self.closed)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        geometry::bounding_box(&self.points())
    }

    /// Interior test used for hole placement (closed shapes only).
    pub fn contains_point(&self, p: Point) -> bool {
        self.closed && geometry::point_in_polygon(p, &self.points())
    }

    pub fn corner_settings(&self) -> Vec<CornerSetting> {
        self.vertices.iter().map(|v| v.corner).collect()
    }

    pub fn rounded_corner_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.corner.is_rounded()).count()
    }

    pub(crate) fn translate(&mut self, dx: f64, dy: f64) {
        for v in &mut self.vertices {
            v.position = v.position.offset(dx, dy);
        }
    }
}
