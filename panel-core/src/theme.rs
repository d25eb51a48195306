//! Color palette and stroke constants for the layout preview.
//!
//! The sheet is a neutral light board; placed parts rotate through a small
//! set of soft fills so neighbours stay distinguishable.

use std::fmt;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Hex form without the leading `#`, as used in spreadsheet styles.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

// =============================================================================
// SURFACE AND SHEET
// =============================================================================
pub const SURFACE_BG: Rgb = Rgb(255, 255, 255);
pub const SHEET_FILL: Rgb = Rgb(245, 240, 230);
pub const SHEET_BORDER: Rgb = Rgb(120, 110, 95);

// =============================================================================
// PARTS - indexed by placement order, not by part identity
// =============================================================================
pub const PART_PALETTE: [Rgb; 6] = [
    Rgb(144, 202, 249),
    Rgb(165, 214, 167),
    Rgb(255, 224, 130),
    Rgb(239, 154, 154),
    Rgb(206, 147, 216),
    Rgb(128, 203, 196),
];
pub const PART_BORDER: Rgb = Rgb(55, 71, 79);

// =============================================================================
// TEXT
// =============================================================================
pub const LABEL_TEXT: Rgb = Rgb(33, 33, 33);
pub const LABEL_FONT_SIZE: f64 = 10.0;

// =============================================================================
// STROKE WIDTHS
// =============================================================================
pub const SHEET_STROKE_WIDTH: f64 = 2.0;
pub const PART_STROKE_WIDTH: f64 = 1.0;

/// Fill color for the placement at `index`.
pub fn part_fill(index: usize) -> Rgb {
    PART_PALETTE[index % PART_PALETTE.len()]
}
