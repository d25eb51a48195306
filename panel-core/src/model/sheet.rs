//! Stock sheet definition.

use serde::{Deserialize, Serialize};

use crate::config::{
    material_thickness, valid_thickness, SheetPreset, DEFAULT_EDGE_THICKNESS,
    DEFAULT_THICKNESS_MM,
};

/// The stock sheet parts are cut from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSpec {
    /// Sheet width in mm.
    pub width: f64,
    /// Sheet height in mm.
    pub height: f64,
    /// Material label (e.g. "ДСП").
    pub material: String,
    /// Free-text material name overriding `material` in the export.
    pub material_custom_name: Option<String>,
    /// Explicit thickness override in mm.
    pub thickness: Option<f64>,
    /// Edge banding material available for this sheet.
    pub edge: String,
    /// Edge banding thickness label.
    pub edge_thickness: String,
    /// Whether the sheet has a directional texture.
    pub has_texture: bool,
}

impl Default for SheetSpec {
    fn default() -> Self {
        Self::from_preset(SheetPreset::default())
    }
}

impl SheetSpec {
    /// Create a sheet of the given size with default material settings.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            material: String::new(),
            material_custom_name: None,
            thickness: None,
            edge: String::new(),
            edge_thickness: DEFAULT_EDGE_THICKNESS.to_string(),
            has_texture: false,
        }
    }

    /// Create a sheet from a catalog preset.
    pub fn from_preset(preset: SheetPreset) -> Self {
        let (width, height) = preset.dimensions();
        Self::new(width, height)
    }

    /// Set the material label.
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    /// Set the edge banding material and thickness label.
    pub fn with_edge(mut self, edge: impl Into<String>, thickness: impl Into<String>) -> Self {
        self.edge = edge.into();
        self.edge_thickness = thickness.into();
        self
    }

    /// Area in mm²; zero when either dimension is unusable.
    pub fn area(&self) -> f64 {
        if self.is_valid() {
            self.width * self.height
        } else {
            0.0
        }
    }

    /// Check that both dimensions are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Material name shown in documents: the custom name when set, else the label.
    pub fn display_material(&self) -> &str {
        match self.material_custom_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => self.material.trim(),
        }
    }

    /// Thickness in mm used for display and export.
    ///
    /// A valid explicit override wins; an invalid one falls back to the default.
    /// Without an override the material catalog is consulted.
    pub fn effective_thickness(&self) -> f64 {
        match self.thickness {
            Some(t) if valid_thickness(t) => t,
            Some(_) => DEFAULT_THICKNESS_MM,
            None => material_thickness(&self.material).unwrap_or(DEFAULT_THICKNESS_MM),
        }
    }
}
