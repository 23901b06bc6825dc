//! Order readiness checks
//!
//! Every check runs independently and the full list of problems is returned
//! in one pass; validation never fails early and never returns an error.

use crate::material::MaterialSelection;
use crate::model::{CornerKind, ShapeDocument, MIN_VERTICES};
use platekit_settings::ValidationSettings;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a validation issue is about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IssueKind {
    MissingShape,
    TooFewHoles { required: usize, found: usize },
    MissingMaterial,
    MissingThickness,
    MissingColor,
    /// A corner radius exceeds half of its shorter adjacent edge.
    CornerRadius {
        shape: usize,
        corner: usize,
        radius: f64,
        /// Length of the shorter adjacent edge
        edge_length: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    fn new(kind: IssueKind) -> Self {
        let message = match &kind {
            IssueKind::MissingShape => "No shape defined. Please draw or upload a shape.".to_string(),
            IssueKind::TooFewHoles { required, found } => {
                format!("Minimum {} drilling holes required. Currently: {}", required, found)
            }
            IssueKind::MissingMaterial => "Please select a material.".to_string(),
            IssueKind::MissingThickness => "Please select a thickness.".to_string(),
            IssueKind::MissingColor => {
                "Please select a color or request a special color.".to_string()
            }
            IssueKind::CornerRadius { corner, .. } => format!(
                "Corner {} radius is too large for the adjacent edges.",
                corner + 1
            ),
        };
        Self { kind, message }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of [`validate_order`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }

    pub fn has(&self, predicate: impl Fn(&IssueKind) -> bool) -> bool {
        self.issues.iter().any(|i| predicate(&i.kind))
    }
}

/// Run every order-readiness check.
pub fn validate_order(
    document: &ShapeDocument,
    selection: &MaterialSelection,
    rules: &ValidationSettings,
) -> ValidationReport {
    let mut issues = Vec::new();

    if !document.has_shape() {
        issues.push(ValidationIssue::new(IssueKind::MissingShape));
    }

    if document.holes.len() < rules.min_drilling_holes {
        issues.push(ValidationIssue::new(IssueKind::TooFewHoles {
            required: rules.min_drilling_holes,
            found: document.holes.len(),
        }));
    }

    if selection.material.is_none() {
        issues.push(ValidationIssue::new(IssueKind::MissingMaterial));
    }
    if selection.thickness.is_none() {
        issues.push(ValidationIssue::new(IssueKind::MissingThickness));
    }
    if !selection.has_color() {
        issues.push(ValidationIssue::new(IssueKind::MissingColor));
    }

    for (shape_index, shape) in document.shapes.iter().enumerate() {
        if shape.len() < MIN_VERTICES {
            continue;
        }
        for (corner, vertex) in shape.vertices.iter().enumerate() {
            let setting = vertex.corner;
            if setting.kind != CornerKind::Radius || setting.radius <= 0.0 {
                continue;
            }
            let (incoming, outgoing) = shape.adjacent_edge_lengths(corner);
            let Some(shorter) = [incoming, outgoing].into_iter().flatten().reduce(f64::min) else {
                continue;
            };
            if setting.radius > shorter / 2.0 {
                issues.push(ValidationIssue::new(IssueKind::CornerRadius {
                    shape: shape_index,
                    corner,
                    radius: setting.radius,
                    edge_length: shorter,
                }));
            }
        }
    }

    ValidationReport { issues }
}
