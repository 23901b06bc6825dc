//! Configuration for the PlateKit editor
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Editor behaviour (grid, snapping, nudge, rounding gesture, history)
//! - Pricing rules (multipliers, surcharges, minimum order)
//! - Order validation rules (hole count, hole diameter)

use crate::error::{ConfigError, SettingsError, SettingsResult};
pub use platekit_core::units::DisplayUnit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Editor behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Grid size in user grid units
    pub grid_size: f64,
    /// Working units per grid unit, applied to grid size and nudge increment
    pub grid_scale: f64,
    /// Snap inserted and dragged points to the grid
    pub snap_to_grid: bool,
    /// Draw grid lines
    pub show_grid: bool,
    /// Show edge lengths on the shape
    pub show_measurements: bool,
    /// Arrow-key nudge distance in user grid units
    pub move_increment: f64,
    /// Minimum perpendicular drag (working units) that commits a rounding
    pub round_drag_threshold: f64,
    /// Arc segments used while previewing a rounding drag
    pub preview_arc_segments: usize,
    /// Arc segments used when a rounding is committed
    pub commit_arc_segments: usize,
    /// Maximum number of snapshots kept for undo
    pub history_limit: usize,
    /// Unit for dimension display and input
    pub display_unit: DisplayUnit,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_size: 0.5,
            grid_scale: 12.0,
            snap_to_grid: true,
            show_grid: true,
            show_measurements: true,
            move_increment: 0.5,
            round_drag_threshold: 5.0,
            preview_arc_segments: 20,
            commit_arc_segments: 16,
            history_limit: 100,
            display_unit: DisplayUnit::default(),
        }
    }
}

impl EditorSettings {
    /// Grid pitch in working units.
    pub fn snap_step(&self) -> f64 {
        self.grid_size * self.grid_scale
    }

    /// Nudge distance in working units.
    pub fn nudge_step(&self) -> f64 {
        self.move_increment * self.grid_scale
    }
}

/// Pricing rules applied on top of the catalog rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Multiplier per standard colour id; missing colours price at 1.0
    pub color_multipliers: BTreeMap<String, f64>,
    /// Flat fee for a special colour request
    pub special_color_surcharge: f64,
    /// Vertex count above which the complexity surcharge applies
    pub complex_shape_threshold: usize,
    /// Multiplier applied to the running subtotal for complex shapes
    pub complex_shape_multiplier: f64,
    /// Flat fee per rounded corner
    pub radius_corner_fee: f64,
    /// Flat fee per drilling hole
    pub drilling_hole_fee: f64,
    /// Floor for the final total
    pub minimum_order_price: f64,
    /// Working area units (mm²) per catalog pricing unit (m²)
    pub area_units_per_pricing_unit: f64,
    /// Currency symbol used in breakdown labels
    pub currency: String,
}

impl Default for PricingSettings {
    fn default() -> Self {
        let color_multipliers = [
            ("white", 1.0),
            ("cream", 1.0),
            ("gray", 1.0),
            ("charcoal", 1.05),
            ("black", 1.1),
            ("brown", 1.0),
            ("navy", 1.15),
            ("green", 1.15),
            ("terracotta", 1.1),
            ("sand", 1.0),
        ]
        .into_iter()
        .map(|(id, m)| (id.to_string(), m))
        .collect();

        Self {
            color_multipliers,
            special_color_surcharge: 50.0,
            complex_shape_threshold: 6,
            complex_shape_multiplier: 1.2,
            radius_corner_fee: 5.0,
            drilling_hole_fee: 3.0,
            minimum_order_price: 10.0,
            area_units_per_pricing_unit: platekit_core::units::MM2_PER_M2,
            currency: "€".to_string(),
        }
    }
}

impl PricingSettings {
    /// Multiplier for a colour id (1.0 when not listed).
    pub fn color_multiplier(&self, color: &str) -> f64 {
        self.color_multipliers.get(color).copied().unwrap_or(1.0)
    }
}

/// Order validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Drilling holes needed for mounting
    pub min_drilling_holes: usize,
    /// Diameter of every drilling hole in working units
    pub hole_diameter: f64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            min_drilling_holes: 2,
            hole_diameter: 6.0,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Editor behaviour
    pub editor: EditorSettings,
    /// Pricing rules
    pub pricing: PricingSettings,
    /// Order validation rules
    pub validation: ValidationSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/platekit/config.json`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("platekit").join("config.json"))
    }

    /// Load config from the default location, falling back to defaults when absent
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
            }
        }

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let editor = &self.editor;
        positive("editor.grid_size", editor.grid_size)?;
        positive("editor.grid_scale", editor.grid_scale)?;
        positive("editor.move_increment", editor.move_increment)?;
        non_negative("editor.round_drag_threshold", editor.round_drag_threshold)?;
        if editor.preview_arc_segments == 0 {
            return Err(SettingsError::invalid(
                "editor.preview_arc_segments",
                "must be > 0",
            ));
        }
        if editor.commit_arc_segments == 0 {
            return Err(SettingsError::invalid(
                "editor.commit_arc_segments",
                "must be > 0",
            ));
        }
        if editor.history_limit == 0 {
            return Err(SettingsError::invalid("editor.history_limit", "must be > 0"));
        }

        let pricing = &self.pricing;
        for (color, multiplier) in &pricing.color_multipliers {
            positive(&format!("pricing.color_multipliers.{}", color), *multiplier)?;
        }
        positive(
            "pricing.complex_shape_multiplier",
            pricing.complex_shape_multiplier,
        )?;
        non_negative(
            "pricing.special_color_surcharge",
            pricing.special_color_surcharge,
        )?;
        non_negative("pricing.radius_corner_fee", pricing.radius_corner_fee)?;
        non_negative("pricing.drilling_hole_fee", pricing.drilling_hole_fee)?;
        non_negative("pricing.minimum_order_price", pricing.minimum_order_price)?;
        positive(
            "pricing.area_units_per_pricing_unit",
            pricing.area_units_per_pricing_unit,
        )?;

        positive("validation.hole_diameter", self.validation.hole_diameter)?;

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)))
    }
}

fn non_negative(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("must be >= 0, got {}", value)))
    }
}
