//! Greedy shelf packing for the layout preview.
//!
//! This is an approximate, deterministic arrangement meant for a quick visual
//! check. It does not try to minimise waste.

use serde::Serialize;

use crate::config::{PreviewConfig, COUNT_MAX};
use crate::model::{Part, SheetSpec};

/// One part copy placed on the drawing surface, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Scaled width.
    pub width: f64,
    /// Scaled height.
    pub height: f64,
    /// Index of the originating part in the input list.
    pub source_index: usize,
    /// Part length in mm (drawn horizontally).
    pub source_width: f64,
    /// Part width in mm (drawn vertically).
    pub source_height: f64,
}

impl PlacedRect {
    /// Right edge.
    pub fn x_max(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn y_max(&self) -> f64 {
        self.y + self.height
    }

    /// Area of the source part copy in mm².
    pub fn source_area(&self) -> f64 {
        self.source_width * self.source_height
    }

    /// Check whether two placements share any interior point.
    pub fn overlaps(&self, other: &PlacedRect) -> bool {
        self.x < other.x_max()
            && other.x < self.x_max()
            && self.y < other.y_max()
            && other.y < self.y_max()
    }

    /// Label with the source dimensions, e.g. `600×400`.
    pub fn label(&self) -> String {
        format!("{}×{}", self.source_width, self.source_height)
    }
}

/// Result of a packing pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShelfLayout {
    /// Pixels per mm; `None` when the sheet or surface is degenerate.
    pub scale: Option<f64>,
    /// Placements in packing order.
    pub placements: Vec<PlacedRect>,
    /// Usable part copies that did not make it onto the surface.
    pub dropped: usize,
}

/// A single part copy waiting to be placed.
#[derive(Debug, Clone, Copy)]
struct UnitRect {
    source_index: usize,
    width: f64,
    height: f64,
}

impl UnitRect {
    fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Expand parts into one unit rectangle per copy, largest area first.
///
/// Records without usable dimensions or copies are skipped. The sort is
/// stable, so equal areas keep their input order.
fn expand_units(parts: &[Part]) -> Vec<UnitRect> {
    let mut units: Vec<UnitRect> = parts
        .iter()
        .enumerate()
        .filter_map(|(idx, part)| part.dimensions().map(|dims| (idx, dims, part.copies())))
        .flat_map(|(idx, (length, width), copies)| {
            let unit = UnitRect {
                source_index: idx,
                width: length,
                height: width,
            };
            std::iter::repeat(unit).take(copies.min(COUNT_MAX) as usize)
        })
        .collect();

    units.sort_by(|a, b| b.area().total_cmp(&a.area()));
    units
}

/// Pack every part copy into rows ("shelves") on the preview surface.
///
/// One uniform scale maps the whole sheet into the padded surface. Rows wrap
/// at the right edge; once a copy would cross the bottom edge packing stops
/// and the remaining copies are counted as dropped, including a copy taller
/// than the padded surface. A copy wider than the padded surface is skipped.
pub fn pack_shelves(parts: &[Part], sheet: &SheetSpec, config: &PreviewConfig) -> ShelfLayout {
    let units = expand_units(parts);

    let Some(scale) = config.fit_scale(sheet.width, sheet.height) else {
        return ShelfLayout {
            scale: None,
            placements: Vec::new(),
            dropped: units.len(),
        };
    };

    let available_width = config.max_x() - config.padding;

    let mut placements = Vec::with_capacity(units.len());
    let mut x = config.padding;
    let mut y = config.padding;
    let mut row_height: f64 = 0.0;

    for unit in &units {
        let width = unit.width * scale;
        let height = unit.height * scale;

        // Too wide for any shelf; a too-tall copy falls through to the bottom check
        if width > available_width {
            tracing::debug!(
                part = unit.source_index,
                "part copy wider than preview surface, skipped"
            );
            continue;
        }

        // Wrap to the next shelf
        if x + width > config.max_x() {
            x = config.padding;
            y += row_height + config.gutter;
            row_height = 0.0;
        }

        // Out of vertical space: the rest is not previewed
        if y + height > config.max_y() {
            break;
        }

        placements.push(PlacedRect {
            x,
            y,
            width,
            height,
            source_index: unit.source_index,
            source_width: unit.width,
            source_height: unit.height,
        });

        x += width + config.gutter;
        row_height = row_height.max(height);
    }

    let dropped = units.len() - placements.len();
    if dropped > 0 {
        tracing::debug!(
            placed = placements.len(),
            dropped,
            "preview truncated"
        );
    }

    ShelfLayout {
        scale: Some(scale),
        placements,
        dropped,
    }
}
