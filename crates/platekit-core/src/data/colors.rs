//! Standard colour palette
//!
//! Colours a plate can be ordered in without a special colour request.

use serde::Serialize;

/// A standard plate colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandardColor {
    pub id: &'static str,
    pub name: &'static str,
    pub hex: &'static str,
    pub popular: bool,
}

const STANDARD_COLORS: &[StandardColor] = &[
    StandardColor { id: "white", name: "Arctic White", hex: "#FFFFFF", popular: true },
    StandardColor { id: "cream", name: "Cream Beige", hex: "#F5F5DC", popular: false },
    StandardColor { id: "gray", name: "Stone Gray", hex: "#808080", popular: true },
    StandardColor { id: "charcoal", name: "Charcoal", hex: "#36454F", popular: false },
    StandardColor { id: "black", name: "Absolute Black", hex: "#1A1A1A", popular: true },
    StandardColor { id: "brown", name: "Warm Brown", hex: "#8B4513", popular: false },
    StandardColor { id: "navy", name: "Navy Blue", hex: "#000080", popular: false },
    StandardColor { id: "green", name: "Forest Green", hex: "#228B22", popular: false },
    StandardColor { id: "terracotta", name: "Terracotta", hex: "#E2725B", popular: false },
    StandardColor { id: "sand", name: "Desert Sand", hex: "#EDC9AF", popular: false },
];

/// Returns the standard colour palette.
pub fn standard_colors() -> &'static [StandardColor] {
    STANDARD_COLORS
}

/// Finds a standard colour by id.
pub fn find_color(id: &str) -> Option<&'static StandardColor> {
    STANDARD_COLORS.iter().find(|c| c.id == id)
}
