//! Dimension editing
//!
//! Edge-by-edge lengths and angles of a shape, plus direct edits by typed
//! value: set one edge's length, set the overall width or height, or scale
//! the whole outline.

use crate::geometry;
use crate::model::{Point, Shape, ShapeDocument};
use platekit_core::units::{self, DisplayUnit};
use platekit_core::EditError;
use serde::{Deserialize, Serialize};

/// One edge of a shape, as listed to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDimension {
    /// Edge index (0-based, edge from vertex `index` to the next)
    pub index: usize,
    /// 1-based label of the start vertex
    pub start_label: usize,
    /// 1-based label of the end vertex
    pub end_label: usize,
    /// Length in mm
    pub length: f64,
    /// Direction in degrees
    pub angle: f64,
}

impl EdgeDimension {
    pub fn side_label(&self) -> String {
        format!("Side {}", self.index + 1)
    }

    pub fn display_length(&self, unit: DisplayUnit) -> String {
        format!("{} {}", units::format_length(self.length, unit), unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Width,
    Height,
}

/// Overall bounding-box size in mm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallSize {
    pub width: f64,
    pub height: f64,
}

pub fn edge_dimensions(shape: &Shape) -> Vec<EdgeDimension> {
    let n = shape.len();
    (0..shape.edge_count())
        .filter_map(|index| {
            let (a, b) = shape.edge(index)?;
            Some(EdgeDimension {
                index,
                start_label: index + 1,
                end_label: (index + 1) % n + 1,
                length: geometry::distance(a, b),
                angle: geometry::edge_angle_degrees(a, b),
            })
        })
        .collect()
}

pub fn overall_size(shape: &Shape) -> Option<OverallSize> {
    shape.bounding_box().map(|bb| OverallSize {
        width: bb.width(),
        height: bb.height(),
    })
}

/// Move the end vertex of `edge` along the edge so it gets `length`.
pub fn set_edge_length(
    document: &mut ShapeDocument,
    shape_index: usize,
    edge: usize,
    length: f64,
) -> Result<(), EditError> {
    ensure_positive("Set edge length", length)?;
    let shape = document.shape_mut(shape_index)?;
    let (a, b) = shape.edge(edge).ok_or(EditError::PointNotFound {
        shape: shape_index,
        index: edge,
    })?;
    let current = geometry::distance(a, b);
    if current <= f64::EPSILON {
        return Err(EditError::DegenerateEdge { index: edge });
    }
    let scale = length / current;
    let end = (edge + 1) % shape.len();
    shape.vertices[end].position = Point::new(a.x + (b.x - a.x) * scale, a.y + (b.y - a.y) * scale);
    Ok(())
}

/// Stretch the shape along one axis, anchored at its bounding-box minimum.
pub fn set_overall_size(
    document: &mut ShapeDocument,
    shape_index: usize,
    axis: Axis,
    value: f64,
) -> Result<(), EditError> {
    ensure_positive("Set overall size", value)?;
    let shape = document.shape_mut(shape_index)?;
    let bb = shape
        .bounding_box()
        .ok_or_else(|| EditError::not_applicable("Set overall size", "shape has no points"))?;
    let current = match axis {
        Axis::Width => bb.width(),
        Axis::Height => bb.height(),
    };
    if current <= 0.0 {
        return Err(EditError::not_applicable(
            "Set overall size",
            "shape has no extent along this axis",
        ));
    }
    let factor = value / current;
    for v in &mut shape.vertices {
        match axis {
            Axis::Width => v.position.x = bb.min_x + (v.position.x - bb.min_x) * factor,
            Axis::Height => v.position.y = bb.min_y + (v.position.y - bb.min_y) * factor,
        }
    }
    Ok(())
}

/// Scale uniformly about the bounding-box centre.
pub fn scale_shape(
    document: &mut ShapeDocument,
    shape_index: usize,
    factor: f64,
) -> Result<(), EditError> {
    ensure_positive("Scale shape", factor)?;
    let shape = document.shape_mut(shape_index)?;
    let center = shape
        .bounding_box()
        .ok_or_else(|| EditError::not_applicable("Scale shape", "shape has no points"))?
        .center();
    for v in &mut shape.vertices {
        v.position = Point::new(
            center.x + (v.position.x - center.x) * factor,
            center.y + (v.position.y - center.y) * factor,
        );
    }
    Ok(())
}

fn ensure_positive(operation: &str, value: f64) -> Result<(), EditError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EditError::not_applicable(
            operation,
            format!("value must be greater than zero, got {}", value),
        ))
    }
}
