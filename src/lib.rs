//! # PlateKit
//!
//! Shape editor, pricing and order core for custom-cut stone and countertop
//! plates. A customer starts from a catalog outline, edits it point by
//! point, rounds edges by dragging, places drilling holes and receives an
//! itemised price before the order is handed to an order sink.
//!
//! ## Architecture
//!
//! PlateKit is organized as a workspace with multiple crates:
//!
//! 1. **platekit-core** - Error taxonomy, units, catalog data model
//! 2. **platekit-settings** - Editor, pricing and validation configuration
//! 3. **platekit-designer** - Geometry kernel, shape document, edit history,
//!    editor session, validation, pricing, persistence and submission
//! 4. **platekit** - This crate: re-exports plus the `platekit` binary

pub use platekit_core::data;
pub use platekit_designer as designer;

pub use platekit_core::{
    CatalogError, CatalogMaterial, EditError, Error, MaterialCatalog, MaterialId, MaterialVariant,
    Result, ShapeCatalog, ShapeTemplate, SubmissionError, VariantId,
};

pub use platekit_designer::{
    calculate_price, validate_order, CornerKind, CornerSetting, DocumentMeasurements,
    DrillingHole, EditHistory, EditorSession, IssueKind, JsonDirectorySink, MaterialSelection,
    Notice, NoticeLevel, OrderId, OrderPayload, OrderSink, OrderSubmission, Point, PriceBreakdown,
    PriceInputs, PriceLine, SessionFile, Shape, ShapeDocument, ToolMode, ValidationIssue,
    ValidationReport,
};

pub use platekit_settings::{
    Config, EditorSettings, PricingSettings, SettingsError, ValidationSettings,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
