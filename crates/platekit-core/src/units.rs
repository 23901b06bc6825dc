//! Unit conversion utilities
//!
//! The editor works in millimetres throughout. Display lengths can be shown
//! in millimetres or centimetres, and the catalog prices material per square
//! metre, so areas and perimeters are converted at the pricing boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per centimetre
pub const MM_PER_CM: f64 = 10.0;

/// Millimetres per metre
pub const MM_PER_M: f64 = 1_000.0;

/// Square millimetres per square metre (the catalog's pricing unit)
pub const MM2_PER_M2: f64 = 1_000_000.0;

/// Unit used to present lengths to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DisplayUnit {
    /// Millimetres (the working unit)
    #[default]
    #[serde(rename = "mm")]
    Millimeter,
    /// Centimetres
    #[serde(rename = "cm")]
    Centimeter,
}

impl DisplayUnit {
    /// Millimetres in one display unit
    pub fn mm_per_unit(self) -> f64 {
        match self {
            Self::Millimeter => 1.0,
            Self::Centimeter => MM_PER_CM,
        }
    }

    /// Input step used by dimension fields (10 mm or 1 cm)
    pub fn input_step(self) -> f64 {
        match self {
            Self::Millimeter => 10.0,
            Self::Centimeter => 1.0,
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(unit_label(*self))
    }
}

impl FromStr for DisplayUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimetre" => Ok(Self::Millimeter),
            "cm" | "centimeter" | "centimetre" => Ok(Self::Centimeter),
            _ => Err(format!("Unknown display unit: {}", s)),
        }
    }
}

/// Convert a working length (mm) to the display unit
pub fn to_display(value_mm: f64, unit: DisplayUnit) -> f64 {
    value_mm / unit.mm_per_unit()
}

/// Convert a display length back to working millimetres
pub fn from_display(value: f64, unit: DisplayUnit) -> f64 {
    value * unit.mm_per_unit()
}

/// Format a working length for display
///
/// Millimetres get one decimal place, centimetres two.
pub fn format_length(value_mm: f64, unit: DisplayUnit) -> String {
    match unit {
        DisplayUnit::Millimeter => format!("{:.1}", value_mm),
        DisplayUnit::Centimeter => format!("{:.2}", to_display(value_mm, unit)),
    }
}

/// Parse a length typed in the display unit to millimetres
///
/// An optional trailing unit label overrides `unit` (`"12 cm"`, `"120mm"`).
pub fn parse_length(input: &str, unit: DisplayUnit) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    let (number, unit) = match input.find(|c: char| c.is_ascii_alphabetic()) {
        Some(pos) => (input[..pos].trim(), input[pos..].parse::<DisplayUnit>()?),
        None => (input, unit),
    };

    let value = number.parse::<f64>().map_err(|e| e.to_string())?;
    if !value.is_finite() {
        return Err(format!("Length must be finite: {}", input));
    }
    Ok(from_display(value, unit))
}

/// Get the unit label ("mm" or "cm")
pub fn unit_label(unit: DisplayUnit) -> &'static str {
    match unit {
        DisplayUnit::Millimeter => "mm",
        DisplayUnit::Centimeter => "cm",
    }
}

/// Convert an area in mm² to m²
pub fn mm2_to_m2(area_mm2: f64) -> f64 {
    area_mm2 / MM2_PER_M2
}

/// Convert a length in mm to m
pub fn mm_to_m(length_mm: f64) -> f64 {
    length_mm / MM_PER_M
}
