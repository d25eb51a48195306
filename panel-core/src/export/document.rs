//! Writer-independent spreadsheet document model.
//!
//! Row and column indices are 0-based throughout.

use std::collections::BTreeMap;

use crate::theme::Rgb;

/// Value of a single cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Numeric cell for a present, finite, non-zero value; blank otherwise.
    ///
    /// Blank cells are how the export marks missing data.
    pub fn optional_number(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() && v != 0.0 => CellValue::Number(v),
            _ => CellValue::Empty,
        }
    }

    /// Text cell, or blank for an empty string.
    pub fn optional_text(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }

    /// Whether the cell holds no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Text as a spreadsheet would show it (numbers without trailing zeros).
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Inclusive rectangular cell range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl CellRange {
    /// Range covering columns `first_col..=last_col` of one row.
    pub fn row_span(row: u32, first_col: u32, last_col: u32) -> Self {
        Self {
            first_row: row,
            first_col,
            last_row: row,
            last_col,
        }
    }

    /// A1-style reference, e.g. `A1:J1`.
    pub fn a1(&self) -> String {
        format!(
            "{}:{}",
            cell_ref(self.first_row, self.first_col),
            cell_ref(self.last_row, self.last_col)
        )
    }
}

/// Convert a 0-based column index to letters (0 -> A, 26 -> AA).
pub fn col_to_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        let c = char::from(b'A' + (n % 26) as u8);
        result.insert(0, c);
        n /= 26;
    }
    result
}

/// A1-style reference for a 0-based cell position.
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", col_to_letter(col), row + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// Font overrides; unset fields use the writer's default font.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Font {
    pub bold: bool,
    pub italic: bool,
    /// Size in points.
    pub size: Option<f64>,
    pub color: Option<Rgb>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Alignment {
    pub horizontal: Option<HorizontalAlign>,
    pub vertical: Option<VerticalAlign>,
    pub wrap_text: bool,
}

impl Alignment {
    /// Centered on both axes.
    pub fn centered(wrap_text: bool) -> Self {
        Self {
            horizontal: Some(HorizontalAlign::Center),
            vertical: Some(VerticalAlign::Center),
            wrap_text,
        }
    }
}

/// Line style of a cell border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Thin,
}

/// The same border on all four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub style: BorderStyle,
    pub color: Rgb,
}

impl Border {
    /// Thin black line.
    pub const THIN_BLACK: Border = Border {
        style: BorderStyle::Thin,
        color: Rgb(0, 0, 0),
    };
}

/// Presentation of a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellStyle {
    pub font: Font,
    pub alignment: Alignment,
    pub border: Option<Border>,
}

/// One worksheet: cell values, merges, styles and dimensions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Worksheet name.
    pub sheet_name: String,
    /// Cell values, row by row.
    pub rows: Vec<Vec<CellValue>>,
    /// Merged regions.
    pub merges: Vec<CellRange>,
    /// Per-cell styles keyed by (row, col).
    pub styles: BTreeMap<(u32, u32), CellStyle>,
    /// Row heights in points.
    pub row_heights: BTreeMap<u32, f64>,
    /// Column widths in characters, by column index.
    pub col_widths: Vec<f64>,
}

impl Document {
    /// Create an empty document for a named worksheet.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            ..Default::default()
        }
    }

    /// Append a row and return its index.
    pub fn push_row(&mut self, cells: Vec<CellValue>) -> u32 {
        self.rows.push(cells);
        (self.rows.len() - 1) as u32
    }

    /// Append an empty row and return its index.
    pub fn push_blank_row(&mut self) -> u32 {
        self.push_row(Vec::new())
    }

    /// Number of rows holding values.
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Value at a position, if the row is long enough to hold it.
    pub fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.rows.get(row as usize)?.get(col as usize)
    }

    /// Style at a position.
    pub fn style(&self, row: u32, col: u32) -> Option<&CellStyle> {
        self.styles.get(&(row, col))
    }

    /// Set the style of one cell.
    pub fn set_style(&mut self, row: u32, col: u32, style: CellStyle) {
        self.styles.insert((row, col), style);
    }

    /// Set the style of every cell in `first_col..=last_col` of a row.
    pub fn style_row(&mut self, row: u32, first_col: u32, last_col: u32, style: CellStyle) {
        for col in first_col..=last_col {
            self.set_style(row, col, style);
        }
    }

    /// Add a merged region.
    pub fn merge(&mut self, range: CellRange) {
        self.merges.push(range);
    }

    /// Set a row height in points.
    pub fn set_row_height(&mut self, row: u32, points: f64) {
        self.row_heights.insert(row, points);
    }

    /// Highest row index that carries a value, style or height, plus one.
    pub fn used_rows(&self) -> u32 {
        let styled = self.styles.keys().map(|(r, _)| r + 1).max().unwrap_or(0);
        let sized = self.row_heights.keys().map(|r| r + 1).max().unwrap_or(0);
        self.row_count().max(styled).max(sized)
    }

    /// Highest column index that carries a value, style, width or merge, plus one.
    pub fn used_cols(&self) -> u32 {
        let valued = self.rows.iter().map(|r| r.len() as u32).max().unwrap_or(0);
        let styled = self.styles.keys().map(|(_, c)| c + 1).max().unwrap_or(0);
        let merged = self.merges.iter().map(|m| m.last_col + 1).max().unwrap_or(0);
        valued
            .max(styled)
            .max(merged)
            .max(self.col_widths.len() as u32)
    }
}
