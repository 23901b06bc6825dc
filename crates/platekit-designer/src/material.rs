//! Material, thickness and colour chosen for the order.
//!
//! These reference the external catalog; the editor only reads them when
//! validating and pricing.

use platekit_core::{CatalogError, MaterialCatalog, MaterialId, MaterialVariant, VariantId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialSelection {
    pub material: Option<MaterialId>,
    /// Thickness variant (carries the price per square metre)
    pub thickness: Option<VariantId>,
    /// Standard colour id
    pub color: Option<String>,
    /// Free-text special colour request, used instead of a standard colour
    pub special_color: Option<String>,
}

impl MaterialSelection {
    pub fn new(material: MaterialId, thickness: VariantId, color: impl Into<String>) -> Self {
        Self {
            material: Some(material),
            thickness: Some(thickness),
            color: Some(color.into()),
            special_color: None,
        }
    }

    /// A non-blank special colour request.
    pub fn special_color_request(&self) -> Option<&str> {
        self.special_color
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn has_special_color(&self) -> bool {
        self.special_color_request().is_some()
    }

    /// A standard colour or a special request was given.
    pub fn has_color(&self) -> bool {
        self.color.as_deref().is_some_and(|c| !c.trim().is_empty()) || self.has_special_color()
    }

    /// Colour label for the order payload.
    pub fn color_label(&self) -> Option<String> {
        match self.special_color_request() {
            Some(request) => Some(format!("special: {}", request)),
            None => self.color.clone(),
        }
    }

    /// Resolve the chosen thickness in the catalog.
    pub fn variant<'a>(
        &self,
        catalog: &'a MaterialCatalog,
    ) -> Result<Option<&'a MaterialVariant>, CatalogError> {
        match (self.material, self.thickness) {
            (Some(material), Some(thickness)) => catalog.variant(material, thickness).map(Some),
            _ => Ok(None),
        }
    }
}
