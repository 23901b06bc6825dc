//! # PlateKit Core
//!
//! Core types, errors and catalog data shared by the PlateKit crates.
//! Provides the error taxonomy used by the shape editor, unit handling for
//! lengths and areas, and the data model of the external shape and material
//! catalogs.

pub mod data;
pub mod error;
pub mod units;

pub use data::{
    standard_colors, CatalogMaterial, MaterialCatalog, MaterialId, MaterialVariant, ShapeCatalog,
    ShapeTemplate, StandardColor, VariantId,
};

pub use error::{CatalogError, EditError, Error, Result, SubmissionError};

pub use units::DisplayUnit;
