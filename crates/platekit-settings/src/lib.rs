//! PlateKit Settings Crate
//!
//! Handles editor, pricing and validation configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{Config, DisplayUnit, EditorSettings, PricingSettings, ValidationSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
