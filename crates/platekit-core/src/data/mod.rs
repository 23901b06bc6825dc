//! Catalog data consumed by the editor
//!
//! This module provides:
//! - Shape templates (initial plate outlines)
//! - The material catalog (materials, thickness variants, prices)
//! - The standard colour palette

pub mod catalog;
pub mod colors;

pub use catalog::{
    CatalogMaterial, MaterialCatalog, MaterialId, MaterialVariant, ShapeCatalog, ShapeTemplate,
    VariantId,
};
pub use colors::{standard_colors, StandardColor};
