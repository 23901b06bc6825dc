//! Error handling for PlateKit
//!
//! Provides the error types for every layer of the editor core:
//! - Edit errors (rejected gestures and model mutations)
//! - Submission errors (the external order sink)
//! - Catalog errors (shape templates and material lookups)
//!
//! All error types use `thiserror`. Edit errors are never fatal: the edit
//! controller turns them into user notices.

use thiserror::Error;

/// Edit error type
///
/// Raised by shape document mutations and the edit history. Every variant is
/// recoverable and leaves the document untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// Deleting would drop the shape below the minimum vertex count
    #[error("Cannot delete point - minimum {minimum} points required")]
    MinimumVertices {
        /// The minimum number of vertices a shape must keep.
        minimum: usize,
        /// The vertex count at the time of the request.
        count: usize,
    },

    /// Rounding was requested on vertices that do not share an edge
    #[error("Points {} and {} are not adjacent - please select two adjacent points", .first + 1, .second + 1)]
    NonAdjacentPoints {
        /// Index of the first vertex.
        first: usize,
        /// Index of the second vertex.
        second: usize,
    },

    /// Rounding was requested on vertices of two different shapes
    #[error("Please select points from the same shape")]
    CrossShapeSelection,

    /// A drilling hole was placed outside every closed, visible shape
    #[error("Drilling hole must be placed inside the shape (clicked at {x:.1}, {y:.1})")]
    HoleOutsideShape {
        /// Click position, x.
        x: f64,
        /// Click position, y.
        y: f64,
    },

    /// No shape exists at the given index
    #[error("Shape {index} not found")]
    ShapeNotFound {
        /// The requested shape index.
        index: usize,
    },

    /// No vertex exists at the given index
    #[error("Point {} of shape {shape} not found", .index + 1)]
    PointNotFound {
        /// The shape index.
        shape: usize,
        /// The requested vertex index.
        index: usize,
    },

    /// No drilling hole with the given id
    #[error("Drilling hole {id} not found")]
    HoleNotFound {
        /// The requested hole id.
        id: String,
    },

    /// The shape is locked against pointer edits
    #[error("Shape {index} is locked")]
    ShapeLocked {
        /// The locked shape index.
        index: usize,
    },

    /// The operation does not apply to the current shape
    #[error("{operation} not applicable: {reason}")]
    NotApplicable {
        /// The operation name.
        operation: String,
        /// Why it does not apply.
        reason: String,
    },

    /// An edge has zero length where a direction is required
    #[error("Edge starting at point {} has zero length", .index + 1)]
    DegenerateEdge {
        /// Index of the edge's start vertex.
        index: usize,
    },

    /// Undo requested at the start of history
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Redo requested at the end of history
    #[error("Nothing to redo")]
    NothingToRedo,
}

impl EditError {
    /// Shorthand for [`EditError::NotApplicable`].
    pub fn not_applicable(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        EditError::NotApplicable {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error only reports an exhausted history
    pub fn is_history_boundary(&self) -> bool {
        matches!(self, EditError::NothingToUndo | EditError::NothingToRedo)
    }
}

/// Submission error type
///
/// Represents failures of the external order sink. The editing session is
/// left unchanged so the user can retry.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// The order failed validation and was not sent
    #[error("Order is not ready: {}", .issues.join("; "))]
    InvalidOrder {
        /// Every validation message, in check order.
        issues: Vec<String>,
    },

    /// The sink answered but refused the order
    #[error("Order rejected ({status}): {message}")]
    Rejected {
        /// Status code reported by the sink.
        status: u16,
        /// Message reported by the sink.
        message: String,
    },

    /// The sink could not be reached
    #[error("Order service unavailable: {0}")]
    Transport(String),

    /// The payload could not be encoded
    #[error("Failed to encode order: {0}")]
    Serialization(String),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::Serialization(err.to_string())
    }
}

/// Catalog error type
///
/// Represents lookups and decoding failures against the external shape and
/// material catalogs.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Material id not in the catalog
    #[error("Unknown material {id}")]
    UnknownMaterial {
        /// The requested material id.
        id: u64,
    },

    /// Variant id not offered by the material
    #[error("Material {material} has no thickness {variant}")]
    UnknownVariant {
        /// The material id.
        material: u64,
        /// The requested variant id.
        variant: u64,
    },

    /// Variant exists but is not currently sold
    #[error("Thickness {variant} of material {material} is not available")]
    InactiveVariant {
        /// The material id.
        material: u64,
        /// The inactive variant id.
        variant: u64,
    },

    /// Shape template id not in the catalog
    #[error("Unknown shape template {id}")]
    UnknownTemplate {
        /// The requested template id.
        id: u64,
    },

    /// Template data cannot form an editable shape
    #[error("Invalid shape template {id}: {reason}")]
    InvalidTemplate {
        /// The template id.
        id: u64,
        /// What is wrong with it.
        reason: String,
    },

    /// Catalog JSON could not be decoded
    #[error("Invalid catalog data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main error type for PlateKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Edit error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Submission error
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an edit error
    pub fn is_edit_error(&self) -> bool {
        matches!(self, Error::Edit(_))
    }

    /// Check if this is a submission error
    pub fn is_submission_error(&self) -> bool {
        matches!(self, Error::Submission(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
