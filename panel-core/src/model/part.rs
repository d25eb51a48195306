//! Part definition representing one cuttable rectangle with a repeat count.

use serde::{Deserialize, Serialize};

/// Which sides of a part receive edge banding.
///
/// The banding material is always the sheet's configured edge, so a side is
/// either unbanded or banded with that single label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSides {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl EdgeSides {
    /// No banding on any side.
    pub const NONE: EdgeSides = EdgeSides {
        top: false,
        bottom: false,
        left: false,
        right: false,
    };

    /// Banding on all four sides.
    pub const ALL: EdgeSides = EdgeSides {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };

    /// Sides in template order: top, bottom, left, right.
    pub fn as_array(&self) -> [bool; 4] {
        [self.top, self.bottom, self.left, self.right]
    }

    /// Number of banded sides.
    pub fn count(&self) -> usize {
        self.as_array().iter().filter(|&&side| side).count()
    }

    /// Label to show for one side, given the sheet's edge material.
    pub fn label<'a>(banded: bool, edge: &'a str) -> &'a str {
        if banded {
            edge.trim()
        } else {
            ""
        }
    }
}

/// A rectangular part to cut from the sheet.
///
/// Numeric fields are optional so that a half-filled row survives to the
/// export, where missing values render as blank cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Part {
    /// Length in mm.
    pub length: Option<f64>,
    /// Width in mm.
    pub width: Option<f64>,
    /// Number of identical copies.
    pub count: Option<u32>,
    /// Whether grain direction matters for this part.
    pub texture: bool,
    /// Banded sides.
    pub edges: EdgeSides,
    /// Optional part name (used by the blank template).
    pub name: Option<String>,
}

impl Part {
    /// Create a part with the given dimensions and count.
    pub fn new(length: f64, width: f64, count: u32) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
            count: Some(count),
            ..Default::default()
        }
    }

    /// Set the texture flag.
    pub fn with_texture(mut self, texture: bool) -> Self {
        self.texture = texture;
        self
    }

    /// Set the banded sides.
    pub fn with_edges(mut self, edges: EdgeSides) -> Self {
        self.edges = edges;
        self
    }

    /// Set the part name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Dimensions as (length, width) when both are finite and positive.
    pub fn dimensions(&self) -> Option<(f64, f64)> {
        let length = self.length.filter(|v| v.is_finite() && *v > 0.0)?;
        let width = self.width.filter(|v| v.is_finite() && *v > 0.0)?;
        Some((length, width))
    }

    /// Copy count, or zero when missing.
    pub fn copies(&self) -> u32 {
        self.count.unwrap_or(0)
    }

    /// Area of one copy in mm², when the dimensions are usable.
    pub fn unit_area(&self) -> Option<f64> {
        self.dimensions().map(|(l, w)| l * w)
    }

    /// Total area of all copies in mm²; zero for unusable records.
    pub fn total_area(&self) -> f64 {
        match self.unit_area() {
            Some(area) if self.copies() >= 1 => area * f64::from(self.copies()),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_area() {
        assert_eq!(Part::new(600.0, 400.0, 2).total_area(), 480_000.0);
        assert_eq!(Part::new(600.0, 400.0, 0).total_area(), 0.0);

        let mut missing = Part::new(600.0, 400.0, 2);
        missing.width = None;
        assert_eq!(missing.total_area(), 0.0);

        let nan = Part::new(f64::NAN, 400.0, 2);
        assert_eq!(nan.total_area(), 0.0);
        assert_eq!(nan.dimensions(), None);
    }

    #[test]
    fn test_edge_sides() {
        let edges = EdgeSides {
            top: true,
            left: true,
            ..Default::default()
        };
        assert_eq!(edges.count(), 2);
        assert_eq!(edges.as_array(), [true, false, true, false]);
        assert_eq!(EdgeSides::ALL.count(), 4);
        assert_eq!(EdgeSides::label(true, " ПВХ "), "ПВХ");
        assert_eq!(EdgeSides::label(false, "ПВХ"), "");
    }

    #[test]
    fn test_deserialize_partial_row() {
        let part: Part = serde_json::from_str(r#"{"length": 600, "count": 2}"#).unwrap();
        assert_eq!(part.length, Some(600.0));
        assert_eq!(part.width, None);
        assert_eq!(part.edges, EdgeSides::NONE);
        assert!(!part.texture);
    }
}
