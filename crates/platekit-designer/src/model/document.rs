use super::{
    CornerSetting, DrillingHole, HoleId, IdAllocator, Point, Shape, Vertex, VertexId,
    MIN_VERTICES,
};
use crate::geometry;
use platekit_core::{units, EditError};
use serde::{Deserialize, Serialize};

/// The editable plate: shapes plus drilling holes.
///
/// This is the unit captured by each history snapshot. Every mutation either
/// fully succeeds or returns an error with the document untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeDocument {
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub holes: Vec<DrillingHole>,
}

/// Totals over the visible shapes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentMeasurements {
    /// Area of visible closed shapes, mm²
    pub area_mm2: f64,
    /// Perimeter of visible shapes, mm
    pub perimeter_mm: f64,
    pub area_m2: f64,
    pub perimeter_m: f64,
}

impl ShapeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(shape: Shape) -> Self {
        Self {
            shapes: vec![shape],
            holes: Vec::new(),
        }
    }

    pub fn shape(&self, index: usize) -> Result<&Shape, EditError> {
        self.shapes
            .get(index)
            .ok_or(EditError::ShapeNotFound { index })
    }

    pub(crate) fn shape_mut(&mut self, index: usize) -> Result<&mut Shape, EditError> {
        self.shapes
            .get_mut(index)
            .ok_or(EditError::ShapeNotFound { index })
    }

    fn vertex_mut(&mut self, shape: usize, index: usize) -> Result<&mut Vertex, EditError> {
        self.shape_mut(shape)?
            .vertices
            .get_mut(index)
            .ok_or(EditError::PointNotFound { shape, index })
    }

    pub fn has_shape(&self) -> bool {
        self.shapes.iter().any(|s| s.len() >= MIN_VERTICES)
    }

    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Insert a vertex on edge `after_segment`, between it and the next vertex.
    pub fn insert_point(
        &mut self,
        ids: &mut IdAllocator,
        shape_index: usize,
        after_segment: usize,
        position: Point,
    ) -> Result<VertexId, EditError> {
        ensure_finite("Add point", position)?;
        let shape = self.shape_mut(shape_index)?;
        if after_segment >= shape.edge_count() {
            return Err(EditError::PointNotFound {
                shape: shape_index,
                index: after_segment,
            });
        }
        let id = ids.vertex_id();
        shape
            .vertices
            .insert(after_segment + 1, Vertex::new(id, position));
        Ok(id)
    }

    /// Remove a vertex, refusing to go below [`MIN_VERTICES`].
    pub fn delete_point(&mut self, shape_index: usize, index: usize) -> Result<Vertex, EditError> {
        let shape = self.shape_mut(shape_index)?;
        if index >= shape.len() {
            return Err(EditError::PointNotFound {
                shape: shape_index,
                index,
            });
        }
        if shape.len() <= MIN_VERTICES {
            return Err(EditError::MinimumVertices {
                minimum: MIN_VERTICES,
                count: shape.len(),
            });
        }
        Ok(shape.vertices.remove(index))
    }

    pub fn move_point(
        &mut self,
        shape_index: usize,
        index: usize,
        dx: f64,
        dy: f64,
    ) -> Result<(), EditError> {
        let vertex = self.vertex_mut(shape_index, index)?;
        let moved = vertex.position.offset(dx, dy);
        ensure_finite("Move point", moved)?;
        vertex.position = moved;
        Ok(())
    }

    /// Place a vertex at an absolute position.
    pub fn set_point(
        &mut self,
        shape_index: usize,
        index: usize,
        position: Point,
    ) -> Result<(), EditError> {
        ensure_finite("Move point", position)?;
        self.vertex_mut(shape_index, index)?.position = position;
        Ok(())
    }

    pub fn translate_shape(&mut self, shape_index: usize, dx: f64, dy: f64) -> Result<(), EditError> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(EditError::not_applicable(
                "Move shape",
                "offset must be finite",
            ));
        }
        self.shape_mut(shape_index)?.translate(dx, dy);
        Ok(())
    }

    /// Replace a closed shape with the corners of its bounding box.
    pub fn auto_square(&mut self, ids: &mut IdAllocator, shape_index: usize) -> Result<(), EditError> {
        let shape = self.shape_mut(shape_index)?;
        if !shape.closed {
            return Err(EditError::not_applicable(
                "Auto-square",
                "shape is not closed",
            ));
        }
        if shape.len() < 4 {
            return Err(EditError::not_applicable(
                "Auto-square",
                "shape needs at least 4 points",
            ));
        }
        let bb = shape
            .bounding_box()
            .ok_or_else(|| EditError::not_applicable("Auto-square", "shape has no points"))?;
        if bb.width() <= 0.0 || bb.height() <= 0.0 {
            return Err(EditError::not_applicable(
                "Auto-square",
                "shape has no width or height",
            ));
        }
        shape.vertices = bb
            .corners()
            .iter()
            .map(|&p| Vertex::new(ids.vertex_id(), p))
            .collect();
        Ok(())
    }

    /// Replace the edge between two adjacent vertices with a circular arc.
    ///
    /// `offset` is the signed drag distance measured along the perpendicular
    /// of the edge from `first` to `second`. Both original vertices are kept;
    /// the arc's interior points are spliced between them, or appended after
    /// the last vertex when the edge wraps from last to first. Returns the
    /// number of vertices inserted.
    pub fn apply_rounding(
        &mut self,
        ids: &mut IdAllocator,
        shape_index: usize,
        first: usize,
        second: usize,
        offset: f64,
        segments: usize,
    ) -> Result<usize, EditError> {
        if !offset.is_finite() {
            return Err(EditError::not_applicable("Round", "offset must be finite"));
        }
        let shape = self.shape_mut(shape_index)?;
        for index in [first, second] {
            if index >= shape.len() {
                return Err(EditError::PointNotFound {
                    shape: shape_index,
                    index,
                });
            }
        }
        if !shape.is_adjacent(first, second) {
            return Err(EditError::NonAdjacentPoints { first, second });
        }

        let n = shape.len();
        let wraps = shape.closed && first.min(second) == 0 && first.max(second) == n - 1;
        let (start, end) = if wraps {
            (n - 1, 0)
        } else {
            (first.min(second), first.max(second))
        };
        // The arc runs start -> end; flip the offset when that reverses the drag's edge.
        let offset = if (start, end) == (first, second) {
            offset
        } else {
            -offset
        };

        let arc = geometry::arc_points(
            shape.vertices[start].position,
            shape.vertices[end].position,
            offset,
            segments,
        );
        if arc.len() <= 2 {
            return Err(EditError::not_applicable(
                "Round",
                "edge is too short or the drag too small",
            ));
        }

        let interior: Vec<Vertex> = arc[1..arc.len() - 1]
            .iter()
            .map(|&p| Vertex::new(ids.vertex_id(), p))
            .collect();
        let inserted = interior.len();
        if wraps {
            shape.vertices.extend(interior);
        } else {
            shape.vertices.splice(start + 1..start + 1, interior);
        }
        Ok(inserted)
    }

    pub fn add_hole(&mut self, x: f64, y: f64, diameter: f64) -> Result<HoleId, EditError> {
        ensure_finite("Add hole", Point::new(x, y))?;
        let hole = DrillingHole::new(x, y, diameter);
        let id = hole.id;
        self.holes.push(hole);
        Ok(id)
    }

    pub fn remove_hole(&mut self, id: HoleId) -> Result<DrillingHole, EditError> {
        let index = self.hole_index(id)?;
        Ok(self.holes.remove(index))
    }

    pub fn move_hole(&mut self, id: HoleId, x: f64, y: f64) -> Result<(), EditError> {
        ensure_finite("Move hole", Point::new(x, y))?;
        let index = self.hole_index(id)?;
        let hole = &mut self.holes[index];
        hole.x = x;
        hole.y = y;
        Ok(())
    }

    fn hole_index(&self, id: HoleId) -> Result<usize, EditError> {
        self.holes
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| EditError::HoleNotFound { id: id.to_string() })
    }

    pub fn hole(&self, id: HoleId) -> Option<&DrillingHole> {
        self.holes.iter().find(|h| h.id == id)
    }

    pub fn set_corner(
        &mut self,
        shape_index: usize,
        index: usize,
        setting: CornerSetting,
    ) -> Result<(), EditError> {
        ensure_valid_corner(setting)?;
        self.vertex_mut(shape_index, index)?.corner = setting;
        Ok(())
    }

    pub fn set_all_corners(&mut self, shape_index: usize, setting: CornerSetting) -> Result<(), EditError> {
        ensure_valid_corner(setting)?;
        for v in &mut self.shape_mut(shape_index)?.vertices {
            v.corner = setting;
        }
        Ok(())
    }

    /// Flip a corner between sharp and rounded, returning the new setting.
    pub fn toggle_corner(&mut self, shape_index: usize, index: usize) -> Result<CornerSetting, EditError> {
        let vertex = self.vertex_mut(shape_index, index)?;
        vertex.corner = vertex.corner.toggled();
        Ok(vertex.corner)
    }

    /// Index of the first visible closed shape containing `p`.
    pub fn shape_containing(&self, p: Point) -> Option<usize> {
        self.shapes
            .iter()
            .position(|s| s.visible && s.contains_point(p))
    }

    pub fn measurements(&self) -> DocumentMeasurements {
        let (area_mm2, perimeter_mm) = self
            .shapes
            .iter()
            .filter(|s| s.visible)
            .fold((0.0, 0.0), |(area, perimeter), s| {
                (area + s.area(), perimeter + s.perimeter())
            });
        DocumentMeasurements {
            area_mm2,
            perimeter_mm,
            area_m2: units::mm2_to_m2(area_mm2),
            perimeter_m: units::mm_to_m(perimeter_mm),
        }
    }

    /// Rounded corners over visible shapes.
    pub fn rounded_corner_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| s.visible)
            .map(Shape::rounded_corner_count)
            .sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.shapes.iter().map(Shape::len).sum()
    }
}

fn ensure_finite(operation: &str, p: Point) -> Result<(), EditError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(EditError::not_applicable(operation, "coordinates must be finite"))
    }
}

fn ensure_valid_corner(setting: CornerSetting) -> Result<(), EditError> {
    if setting.is_valid() {
        Ok(())
    } else {
        Err(EditError::not_applicable(
            "Set corner",
            "radius must be a non-negative number",
        ))
    }
}
