//! External catalog data
//!
//! Shape templates and the material catalog are served by the storefront
//! backend. This module decodes them and provides the lookups the editor
//! needs: a template's point list when a shape is loaded, and a variant's
//! price per square metre when an order is priced.

use crate::error::CatalogError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

/// Material identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub u64);

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thickness/variant identifier (the price-bearing catalog entry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub u64);

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A plate outline offered by the shape catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTemplate {
    pub id: u64,
    pub name: String,
    pub points: Vec<[f64; 2]>,
    #[serde(default = "default_true")]
    pub closed: bool,
}

impl ShapeTemplate {
    /// Creates a new template.
    pub fn new(id: u64, name: impl Into<String>, points: Vec<[f64; 2]>, closed: bool) -> Self {
        Self {
            id,
            name: name.into(),
            points,
            closed,
        }
    }

    /// Checks that the template can become an editable shape.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.points.len() < 3 {
            return Err(CatalogError::InvalidTemplate {
                id: self.id,
                reason: format!("needs at least 3 points, has {}", self.points.len()),
            });
        }
        if let Some(pos) = self
            .points
            .iter()
            .position(|[x, y]| !x.is_finite() || !y.is_finite())
        {
            return Err(CatalogError::InvalidTemplate {
                id: self.id,
                reason: format!("point {} is not a finite coordinate", pos + 1),
            });
        }
        Ok(())
    }
}

/// The list of shape templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeCatalog {
    templates: Vec<ShapeTemplate>,
}

impl ShapeCatalog {
    pub fn new(templates: Vec<ShapeTemplate>) -> Self {
        Self { templates }
    }

    /// Decodes the catalog list endpoint's JSON body.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Looks up a template and checks it is usable.
    pub fn template(&self, id: u64) -> Result<&ShapeTemplate, CatalogError> {
        let template = self
            .templates
            .iter()
            .find(|t| t.id == id)
            .ok_or(CatalogError::UnknownTemplate { id })?;
        if let Err(err) = template.validate() {
            warn!("Catalog template unusable: {}", err);
            return Err(err);
        }
        Ok(template)
    }

    pub fn templates(&self) -> impl Iterator<Item = &ShapeTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// A thickness of a material, carrying the price per square metre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialVariant {
    pub id: VariantId,
    pub name: String,
    #[serde(deserialize_with = "price_from_number_or_string")]
    pub price: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A material and the thicknesses it is sold in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMaterial {
    pub id: MaterialId,
    pub name: String,
    #[serde(default)]
    pub variants: Vec<MaterialVariant>,
}

impl CatalogMaterial {
    /// Variants that can currently be ordered.
    pub fn active_variants(&self) -> impl Iterator<Item = &MaterialVariant> {
        self.variants.iter().filter(|v| v.is_active)
    }
}

/// The material catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCatalog {
    materials: Vec<CatalogMaterial>,
}

impl MaterialCatalog {
    pub fn new(materials: Vec<CatalogMaterial>) -> Self {
        Self { materials }
    }

    /// Decodes the material list endpoint's JSON body.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn material(&self, id: MaterialId) -> Result<&CatalogMaterial, CatalogError> {
        self.materials
            .iter()
            .find(|m| m.id == id)
            .ok_or(CatalogError::UnknownMaterial { id: id.0 })
    }

    /// Looks up an orderable variant of a material.
    pub fn variant(
        &self,
        material: MaterialId,
        variant: VariantId,
    ) -> Result<&MaterialVariant, CatalogError> {
        let entry = self
            .material(material)?
            .variants
            .iter()
            .find(|v| v.id == variant)
            .ok_or(CatalogError::UnknownVariant {
                material: material.0,
                variant: variant.0,
            })?;
        if !entry.is_active {
            return Err(CatalogError::InactiveVariant {
                material: material.0,
                variant: variant.0,
            });
        }
        Ok(entry)
    }

    /// Price per square metre of a material thickness.
    pub fn rate_for(&self, material: MaterialId, variant: VariantId) -> Result<f64, CatalogError> {
        Ok(self.variant(material, variant)?.price)
    }

    pub fn materials(&self) -> impl Iterator<Item = &CatalogMaterial> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

fn default_true() -> bool {
    true
}

// The backend sends decimal prices as strings ("59.90"); older fixtures use numbers.
fn price_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    let price = match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => n,
        RawPrice::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid price {:?}: {}", s, e)))?,
    };
    if !price.is_finite() || price < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }
    Ok(price)
}
