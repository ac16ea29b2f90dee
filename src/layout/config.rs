//! Configuration for the layout engine
//!
//! Spacing values are optional; each strategy fills the gaps with its own
//! defaults (see [`Spacing::resolve`]). The engine itself never validates
//! spacing, callers must keep distances positive. The file loaders do reject
//! non-positive values.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Assumed node footprint used for collision checks
pub const DEFAULT_MIN_NODE_DISTANCE: f64 = 80.0;

/// Errors that can occur when loading a layout configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read layout config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout config TOML: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Failed to parse layout config JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("spacing '{name}' must be positive, got {value}")]
    InvalidSpacing { name: &'static str, value: f64 },
}

/// Distances between nodes. Meaning is strategy-specific.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub horizontal: Option<f64>,
    pub vertical: Option<f64>,
    pub radial: Option<f64>,
}

/// Spacing with every value filled in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSpacing {
    pub horizontal: f64,
    pub vertical: f64,
    pub radial: f64,
}

impl Spacing {
    /// Fill unset values from `defaults`
    pub fn resolve(&self, defaults: ResolvedSpacing) -> ResolvedSpacing {
        ResolvedSpacing {
            horizontal: self.horizontal.unwrap_or(defaults.horizontal),
            vertical: self.vertical.unwrap_or(defaults.vertical),
            radial: self.radial.unwrap_or(defaults.radial),
        }
    }
}

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Advisory flag carried for callers; strategies do not read it
    #[serde(alias = "autoLayout")]
    pub auto_layout: bool,

    pub spacing: Spacing,

    /// Leave nodes flagged `is_manually_positioned` where they are
    #[serde(alias = "preserveManualPositions")]
    pub preserve_manual_positions: bool,

    /// Minimum center-to-center distance between nodes
    #[serde(alias = "minNodeDistance")]
    pub min_node_distance: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            auto_layout: true,
            spacing: Spacing::default(),
            preserve_manual_positions: true,
            min_node_distance: None,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file (or JSON when the extension is `.json`)
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string (camelCase keys accepted)
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject zero or negative distances
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("horizontal", self.spacing.horizontal),
            ("vertical", self.spacing.vertical),
            ("radial", self.spacing.radial),
            ("min_node_distance", self.min_node_distance),
        ];
        for (name, value) in values {
            if let Some(value) = value {
                if !(value > 0.0) {
                    return Err(ConfigError::InvalidSpacing { name, value });
                }
            }
        }
        Ok(())
    }

    /// Set the horizontal spacing
    pub fn with_horizontal_spacing(mut self, spacing: f64) -> Self {
        self.spacing.horizontal = Some(spacing);
        self
    }

    /// Set the vertical spacing
    pub fn with_vertical_spacing(mut self, spacing: f64) -> Self {
        self.spacing.vertical = Some(spacing);
        self
    }

    /// Set the radial spacing
    pub fn with_radial_spacing(mut self, spacing: f64) -> Self {
        self.spacing.radial = Some(spacing);
        self
    }

    /// Set whether manually positioned nodes are frozen
    pub fn with_preserve_manual_positions(mut self, preserve: bool) -> Self {
        self.preserve_manual_positions = preserve;
        self
    }

    /// Set the minimum node distance
    pub fn with_min_node_distance(mut self, distance: f64) -> Self {
        self.min_node_distance = Some(distance);
        self
    }

    pub fn min_node_distance(&self) -> f64 {
        self.min_node_distance.unwrap_or(DEFAULT_MIN_NODE_DISTANCE)
    }
}
