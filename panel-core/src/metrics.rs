//! Material usage metrics: used area, sheet area and waste percentage.
//!
//! All figures are computed from the full part list, independent of what the
//! preview manages to place.

use serde::Serialize;

use crate::config::{AREA_DIGITS, MM2_TO_M2, WASTE_DIGITS};
use crate::model::{Part, SheetSpec};

/// Total area of all part copies in mm².
///
/// Records with a missing or non-finite dimension, or fewer than one copy,
/// contribute nothing.
pub fn used_area(parts: &[Part]) -> f64 {
    parts.iter().map(Part::total_area).sum()
}

/// Sheet area in mm².
pub fn sheet_area(sheet: &SheetSpec) -> f64 {
    sheet.area()
}

/// Share of the sheet not covered by parts, in percent.
///
/// An empty order or an unusable sheet reports 0 rather than 100. Over-filled
/// orders clamp to 0.
pub fn waste_percent(parts: &[Part], sheet: &SheetSpec) -> f64 {
    let used = used_area(parts);
    let total = sheet_area(sheet);
    if used <= 0.0 || total <= 0.0 {
        return 0.0;
    }
    (100.0 - used / total * 100.0).max(0.0)
}

/// Round `value` to `digits` decimals and render it the way a Russian locale does.
///
/// Trailing zeros are dropped, the decimal separator is a comma and integer
/// parts of five or more digits are grouped by three with a non-breaking space.
pub fn format_number(value: f64, digits: u32) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let factor = 10f64.powi(digits as i32);
    let rounded = (value * factor).round() / factor;
    let text = format!("{:.*}", digits as usize, rounded.abs());

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (text.as_str(), ""),
    };

    let mut out = String::new();
    if rounded < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

/// Insert non-breaking spaces between digit triples (only from five digits up).
fn group_thousands(digits: &str) -> String {
    if digits.len() < 5 {
        return digits.to_string();
    }
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }
    grouped
}

/// Usage figures for one order, with their display strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaReport {
    /// Used area in mm².
    pub used_mm2: f64,
    /// Sheet area in mm².
    pub sheet_mm2: f64,
    /// Waste in percent.
    pub waste_percent: f64,
}

impl AreaReport {
    /// Compute the report for a part list on a sheet.
    pub fn compute(parts: &[Part], sheet: &SheetSpec) -> Self {
        Self {
            used_mm2: used_area(parts),
            sheet_mm2: sheet_area(sheet),
            waste_percent: waste_percent(parts, sheet),
        }
    }

    /// Used area in m².
    pub fn used_m2(&self) -> f64 {
        self.used_mm2 * MM2_TO_M2
    }

    /// Used area formatted for display, in m².
    pub fn used_display(&self) -> String {
        format_number(self.used_m2(), AREA_DIGITS)
    }

    /// Waste formatted for display, in percent.
    pub fn waste_display(&self) -> String {
        format_number(self.waste_percent, WASTE_DIGITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;

    #[test]
    fn test_used_area_skips_unusable_parts() {
        let mut parts = vec![Part::new(600.0, 400.0, 2), Part::new(100.0, 50.0, 3)];
        assert_eq!(used_area(&parts), 495_000.0);

        parts.push(Part::new(1000.0, 1000.0, 0));
        parts.push(Part::new(f64::INFINITY, 10.0, 1));
        parts.push(Part {
            count: None,
            ..Part::new(10.0, 10.0, 1)
        });
        assert_eq!(used_area(&parts), 495_000.0);
    }

    #[test]
    fn test_waste_percent_bounds() {
        let sheet = SheetSpec::new(1000.0, 1000.0);
        assert_eq!(waste_percent(&[], &sheet), 0.0);
        assert_eq!(waste_percent(&[Part::new(1000.0, 1000.0, 1)], &sheet), 0.0);
        assert_eq!(waste_percent(&[Part::new(1000.0, 1000.0, 3)], &sheet), 0.0);
        assert!(approx_eq(
            waste_percent(&[Part::new(500.0, 1000.0, 1)], &sheet),
            50.0
        ));
        assert_eq!(
            waste_percent(&[Part::new(500.0, 500.0, 1)], &SheetSpec::new(0.0, 10.0)),
            0.0
        );
    }

    #[test]
    fn test_area_report() {
        let report = AreaReport::compute(&[Part::new(600.0, 400.0, 2)], &SheetSpec::default());
        assert_eq!(report.used_mm2, 480_000.0);
        assert_eq!(report.sheet_mm2, 5_796_000.0);
        assert_eq!(report.used_display(), "0,48");
        assert_eq!(report.waste_display(), "91,7");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0, 2), "0");
        assert_eq!(format_number(1.5, 2), "1,5");
        assert_eq!(format_number(91.7184, 1), "91,7");
        assert_eq!(format_number(99.96, 1), "100");
        assert_eq!(format_number(1234.5, 1), "1234,5");
        assert_eq!(format_number(12345.678, 2), "12\u{a0}345,68");
        assert_eq!(format_number(1_234_567.0, 0), "1\u{a0}234\u{a0}567");
        assert_eq!(format_number(-2.25, 1), "-2,3");
        assert_eq!(format_number(-0.01, 1), "0");
        assert_eq!(format_number(f64::NAN, 1), "");
    }
}
