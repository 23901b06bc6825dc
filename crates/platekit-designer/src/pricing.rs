//! Price estimation
//!
//! [`calculate_price`] is a pure function of its inputs: the same inputs and
//! rules always give the same itemised breakdown, so what the customer sees
//! is exactly what goes into the order payload.
//!
//! Adjustments apply in a fixed order:
//! 1. base material (area × rate)
//! 2. thickness (informational, included in the rate)
//! 3. colour premium (multiplier on the running subtotal)
//! 4. special colour surcharge
//! 5. complex shape surcharge (multiplier on the running subtotal)
//! 6. rounded corners, per corner
//! 7. drilling holes, per hole
//!
//! and the minimum order price is applied last as a floor.

use crate::material::MaterialSelection;
use crate::model::ShapeDocument;
use platekit_core::{CatalogError, MaterialCatalog};
use platekit_settings::PricingSettings;
use serde::{Deserialize, Serialize};

/// Everything the price depends on
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceInputs {
    /// Area in the catalog's pricing unit (m²)
    pub area: f64,
    /// Price per pricing unit of the chosen thickness
    pub rate: f64,
    pub material_name: Option<String>,
    pub thickness_name: Option<String>,
    pub color: Option<String>,
    pub special_color: bool,
    /// Vertex count of the first visible shape
    pub vertex_count: usize,
    pub rounded_corners: usize,
    pub drilling_holes: usize,
}

impl PriceInputs {
    /// Gather inputs from a document, the selection and the catalog.
    ///
    /// A missing material or thickness prices at rate 0 so a partial order
    /// can still show its surcharges.
    pub fn from_document(
        document: &ShapeDocument,
        selection: &MaterialSelection,
        catalog: &MaterialCatalog,
        rules: &PricingSettings,
    ) -> Result<Self, CatalogError> {
        let material_name = match selection.material {
            Some(id) => Some(catalog.material(id)?.name.clone()),
            None => None,
        };
        let variant = selection.variant(catalog)?;
        let area_mm2 = document.measurements().area_mm2;

        Ok(Self {
            area: area_mm2 / rules.area_units_per_pricing_unit,
            rate: variant.map(|v| v.price).unwrap_or(0.0),
            material_name,
            thickness_name: variant.map(|v| v.name.clone()),
            color: selection.color.clone(),
            special_color: selection.has_special_color(),
            vertex_count: document
                .shapes
                .iter()
                .find(|s| s.visible)
                .map(|s| s.len())
                .unwrap_or(0),
            rounded_corners: document.rounded_corner_count(),
            drilling_holes: document.holes.len(),
        })
    }
}

/// One breakdown row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLine {
    pub label: String,
    pub detail: String,
    pub amount: f64,
}

impl PriceLine {
    fn new(label: impl Into<String>, detail: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub lines: Vec<PriceLine>,
    pub subtotal: f64,
    pub final_total: f64,
    /// The minimum order price replaced a lower subtotal
    pub minimum_applied: bool,
}

/// Compute the itemised price.
pub fn calculate_price(inputs: &PriceInputs, rules: &PricingSettings) -> PriceBreakdown {
    let currency = rules.currency.as_str();
    let mut lines = Vec::new();
    let mut subtotal = 0.0;

    let base = inputs.area * inputs.rate;
    if base > 0.0 {
        lines.push(PriceLine::new(
            format!(
                "Base Material ({})",
                inputs.material_name.as_deref().unwrap_or("Not selected")
            ),
            format!(
                "{:.2} sq m × {}{}/sq m",
                inputs.area, currency, inputs.rate
            ),
            base,
        ));
        subtotal += base;
    }

    if let Some(thickness) = &inputs.thickness_name {
        lines.push(PriceLine::new(
            format!("Thickness ({})", thickness),
            "Included in base price",
            0.0,
        ));
    }

    if let Some(color) = inputs.color.as_deref().filter(|_| !inputs.special_color) {
        let multiplier = rules.color_multiplier(color);
        if multiplier != 1.0 {
            let amount = subtotal * (multiplier - 1.0);
            lines.push(PriceLine::new(
                format!("Color Premium ({})", color),
                format!("{:.0}% premium", (multiplier - 1.0) * 100.0),
                amount,
            ));
            subtotal += amount;
        }
    }

    if inputs.special_color {
        lines.push(PriceLine::new(
            "Special Color",
            "Custom color request",
            rules.special_color_surcharge,
        ));
        subtotal += rules.special_color_surcharge;
    }

    if inputs.vertex_count > rules.complex_shape_threshold {
        let amount = subtotal * (rules.complex_shape_multiplier - 1.0);
        lines.push(PriceLine::new(
            "Complex Shape",
            format!(
                "{} vertices ({:.0}% surcharge)",
                inputs.vertex_count,
                (rules.complex_shape_multiplier - 1.0) * 100.0
            ),
            amount,
        ));
        subtotal += amount;
    }

    if inputs.rounded_corners > 0 {
        let amount = inputs.rounded_corners as f64 * rules.radius_corner_fee;
        lines.push(PriceLine::new(
            "Rounded Corners",
            format!(
                "{} corners × {}{}",
                inputs.rounded_corners, currency, rules.radius_corner_fee
            ),
            amount,
        ));
        subtotal += amount;
    }

    if inputs.drilling_holes > 0 {
        let amount = inputs.drilling_holes as f64 * rules.drilling_hole_fee;
        lines.push(PriceLine::new(
            "Drilling Holes",
            format!(
                "{} holes × {}{}",
                inputs.drilling_holes, currency, rules.drilling_hole_fee
            ),
            amount,
        ));
        subtotal += amount;
    }

    let minimum_applied = subtotal < rules.minimum_order_price;
    PriceBreakdown {
        lines,
        subtotal,
        final_total: subtotal.max(rules.minimum_order_price),
        minimum_applied,
    }
}
