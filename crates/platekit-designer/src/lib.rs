//! # PlateKit Designer
//!
//! The shape editor behind the plate configurator: a customer starts from a
//! catalog outline, edits it point by point, rounds edges by dragging,
//! places drilling holes and gets a price before ordering.
//!
//! ## Core Components
//!
//! - **Geometry**: area, perimeter, point-in-polygon and arc fitting over
//!   point lists (pure functions)
//! - **Model**: the shape document with per-vertex corner settings and
//!   drilling holes
//! - **History**: linear snapshot undo/redo
//! - **Editor**: the tool-mode state machine turning gestures into edits
//! - **Validation / Pricing**: order readiness checks and the itemised price
//! - **Dimensions**: edge lengths and typed-in size changes
//! - **Submission**: order payload, preview image and the order sink seam
//!
//! ## Architecture
//!
//! ```text
//! EditorSession
//!   ├── ToolState (select, select-point, add-point, delete-point,
//!   │              round-by-drag, place-hole)
//!   ├── ShapeDocument (shapes, vertices + corners, holes)
//!   │     └── geometry
//!   ├── EditHistory<ShapeDocument>
//!   └── MaterialSelection
//!         └── validation / pricing / submission
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use platekit_designer::{EditorSession, ToolMode};
//!
//! let mut session = EditorSession::default();
//! session.load_template(&template)?;
//! session.set_tool(ToolMode::PlaceHole);
//! session.click_canvas(Point::new(40.0, 40.0));
//! let report = session.validate();
//! ```

pub mod dimensions;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod material;
pub mod model;
pub mod preview;
pub mod pricing;
pub mod serialization;
pub mod submission;
pub mod validation;

pub use dimensions::{Axis, EdgeDimension, OverallSize};
pub use editor::{
    EditorSession, Notice, NoticeLevel, NudgeDirection, PointRef, RoundingState, ToolMode,
    ToolState,
};
pub use geometry::BoundingBox;
pub use history::EditHistory;
pub use material::MaterialSelection;
pub use model::{
    CornerKind, CornerSetting, DocumentMeasurements, DrillingHole, HoleClearances, HoleId,
    IdAllocator, Point, Shape, ShapeDocument, ShapeId, Vertex, VertexId, MIN_VERTICES,
};
pub use pricing::{calculate_price, PriceBreakdown, PriceInputs, PriceLine};
pub use serialization::SessionFile;
pub use submission::{JsonDirectorySink, OrderId, OrderPayload, OrderSink, OrderSubmission};
pub use validation::{validate_order, IssueKind, ValidationIssue, ValidationReport};
