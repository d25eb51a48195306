//! Configuration constants and settings for layout preview and export.

use serde::{Deserialize, Serialize};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Smallest accepted part dimension in mm.
pub const DIM_MIN_MM: f64 = 5.0;

/// Largest accepted part dimension in mm.
pub const DIM_MAX_MM: f64 = 5000.0;

/// Smallest accepted copy count for a part.
pub const COUNT_MIN: u32 = 1;

/// Largest accepted copy count for a part.
pub const COUNT_MAX: u32 = 500;

/// Smallest accepted sheet thickness in mm.
pub const THICKNESS_MIN_MM: f64 = 1.0;

/// Largest accepted sheet thickness in mm.
pub const THICKNESS_MAX_MM: f64 = 40.0;

/// Thickness used when neither an override nor the material catalog applies.
pub const DEFAULT_THICKNESS_MM: f64 = 16.0;

/// Conversion factor: square mm to square m.
pub const MM2_TO_M2: f64 = 1e-6;

/// Edge banding thickness label preselected for a new sheet.
pub const DEFAULT_EDGE_THICKNESS: &str = "1 мм";

/// Decimal digits shown for used area (m²).
pub const AREA_DIGITS: u32 = 2;

/// Decimal digits shown for waste percentage.
pub const WASTE_DIGITS: u32 = 1;

/// Nominal thickness of catalog materials in mm.
pub const MATERIAL_THICKNESSES: &[(&str, f64)] = &[
    ("ДСП", 16.0),
    ("МДФ", 18.0),
    ("Фанера", 18.0),
    ("ХДФ", 3.0),
];

/// Look up the catalog thickness of a material label.
pub fn material_thickness(material: &str) -> Option<f64> {
    let wanted = material.trim().to_lowercase();
    MATERIAL_THICKNESSES
        .iter()
        .find(|(name, _)| name.to_lowercase() == wanted)
        .map(|(_, thickness)| *thickness)
}

/// Check a part dimension against the accepted range.
#[inline]
pub fn valid_dimension(value: f64) -> bool {
    value.is_finite() && (DIM_MIN_MM..=DIM_MAX_MM).contains(&value)
}

/// Check a sheet thickness against the accepted range.
#[inline]
pub fn valid_thickness(value: f64) -> bool {
    value.is_finite() && (THICKNESS_MIN_MM..=THICKNESS_MAX_MM).contains(&value)
}

/// Check a copy count against the accepted range.
#[inline]
pub fn valid_count(count: u32) -> bool {
    (COUNT_MIN..=COUNT_MAX).contains(&count)
}

/// Stock sheet size catalog.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum SheetPreset {
    /// 2800 x 2070 mm, the usual chipboard format.
    #[default]
    Standard2800x2070,
    /// 2500 x 1830 mm.
    Standard2500x1830,
    /// User supplied size.
    Custom { width: f64, height: f64 },
}

impl SheetPreset {
    /// Parse a preset from its `WxH` label, falling back to a custom pair.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "2800x2070" => Some(SheetPreset::Standard2800x2070),
            "2500x1830" => Some(SheetPreset::Standard2500x1830),
            _ => {
                let (w, h) = s.split_once(['x', 'х', '×'])?;
                let width: f64 = w.trim().parse().ok()?;
                let height: f64 = h.trim().parse().ok()?;
                if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
                    Some(SheetPreset::Custom { width, height })
                } else {
                    None
                }
            }
        }
    }

    /// Sheet dimensions in mm as (width, height).
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            SheetPreset::Standard2800x2070 => (2800.0, 2070.0),
            SheetPreset::Standard2500x1830 => (2500.0, 1830.0),
            SheetPreset::Custom { width, height } => (*width, *height),
        }
    }
}

impl std::fmt::Display for SheetPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.dimensions();
        write!(f, "{}x{}", w, h)
    }
}

/// Drawing surface geometry for the layout preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewConfig {
    /// Surface width in pixels.
    pub surface_width: f64,
    /// Surface height in pixels.
    pub surface_height: f64,
    /// Inset between the surface border and any drawing.
    pub padding: f64,
    /// Spacing between neighbouring rectangles and shelves.
    pub gutter: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            surface_width: 600.0,
            surface_height: 420.0,
            padding: 10.0,
            gutter: 4.0,
        }
    }
}

impl PreviewConfig {
    /// Create a preview configuration for a surface of the given size.
    pub fn new(surface_width: f64, surface_height: f64) -> Self {
        Self {
            surface_width,
            surface_height,
            ..Default::default()
        }
    }

    /// Uniform scale that fits the whole sheet inside the padded surface.
    ///
    /// Returns `None` when either the sheet or the padded surface is degenerate.
    pub fn fit_scale(&self, sheet_width: f64, sheet_height: f64) -> Option<f64> {
        let available_width = self.surface_width - self.padding * 2.0;
        let available_height = self.surface_height - self.padding * 2.0;
        if !(sheet_width > 0.0 && sheet_height > 0.0) {
            return None;
        }
        let scale = (available_width / sheet_width).min(available_height / sheet_height);
        (scale.is_finite() && scale > 0.0).then_some(scale)
    }

    /// Right edge of the drawable area.
    pub fn max_x(&self) -> f64 {
        self.surface_width - self.padding
    }

    /// Bottom edge of the drawable area.
    pub fn max_y(&self) -> f64 {
        self.surface_height - self.padding
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if a is in range [min, max] with epsilon tolerance.
    #[inline]
    pub fn in_range(a: f64, min: f64, max: f64) -> bool {
        a >= min - EPS && a <= max + EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_thickness_lookup() {
        assert_eq!(material_thickness("ДСП"), Some(16.0));
        assert_eq!(material_thickness(" мдф "), Some(18.0));
        assert_eq!(material_thickness("хдф"), Some(3.0));
        assert_eq!(material_thickness("Стекло"), None);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(
            SheetPreset::parse("2500x1830"),
            Some(SheetPreset::Standard2500x1830)
        );
        assert_eq!(
            SheetPreset::parse("3050 x 1220"),
            Some(SheetPreset::Custom {
                width: 3050.0,
                height: 1220.0
            })
        );
        assert_eq!(SheetPreset::parse("0x100"), None);
        assert_eq!(SheetPreset::parse("custom"), None);
        assert_eq!(SheetPreset::default().dimensions(), (2800.0, 2070.0));
    }

    #[test]
    fn test_preset_json() {
        assert_eq!(
            serde_json::to_string(&SheetPreset::Standard2500x1830).unwrap(),
            "\"Standard2500x1830\""
        );
        let preset: SheetPreset =
            serde_json::from_str(r#"{"Custom": {"width": 3050, "height": 1220}}"#).unwrap();
        assert_eq!(preset.dimensions(), (3050.0, 1220.0));
    }

    #[test]
    fn test_fit_scale() {
        let config = PreviewConfig::new(620.0, 420.0);
        // Available 600 x 400: width-limited for 2800 x 1000, height-limited for 1000 x 2000
        let scale = config.fit_scale(2800.0, 1000.0).unwrap();
        assert!(float_cmp::approx_eq(scale, 600.0 / 2800.0));
        let scale = config.fit_scale(1000.0, 2000.0).unwrap();
        assert!(float_cmp::approx_eq(scale, 0.2));
        assert_eq!(config.fit_scale(0.0, 2000.0), None);
        assert_eq!(config.fit_scale(f64::NAN, 2000.0), None);
    }

    #[test]
    fn test_validators() {
        assert!(valid_dimension(5.0));
        assert!(valid_dimension(5000.0));
        assert!(!valid_dimension(4.9));
        assert!(!valid_dimension(f64::INFINITY));
        assert!(valid_thickness(16.0));
        assert!(!valid_thickness(41.0));
        assert!(valid_count(500));
        assert!(!valid_count(0));
    }
}
