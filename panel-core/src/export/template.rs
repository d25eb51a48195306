//! Order template layouts.
//!
//! Two layouts exist. The order template carries customer contact details,
//! per-side banding columns and a sheet summary line. The blank template is a
//! simpler cutting list padded with empty bordered rows for handwritten
//! additions on a printout.
//!
//! Row layout of the order template (0-based):
//!
//! | row        | content                                  |
//! |------------|------------------------------------------|
//! | 0          | title, merged                            |
//! | 1          | legend, merged                           |
//! | 2          | contact line, merged                     |
//! | 3          | spacer                                   |
//! | 4          | header                                   |
//! | 5..5+n     | one row per part                         |
//! | 5+n        | spacer                                   |
//! | 6+n        | sheet summary, merged                    |
//!
//! The blank template drops the contact line (spacer at 2, header at 3) and
//! replaces the summary with [`BLANK_PADDING_ROWS`] empty bordered rows.

use std::str::FromStr;

use super::document::{
    Alignment, Border, CellRange, CellStyle, CellValue, Document, Font, HorizontalAlign,
    VerticalAlign,
};
use crate::model::{EdgeSides, Order, Part, SheetSpec};
use crate::theme::Rgb;

/// Empty bordered rows appended after the parts in the blank template.
pub const BLANK_PADDING_ROWS: u32 = 15;

const ORDER_TITLE: &str = "Шаблон для покраски";
const ORDER_LEGEND: &str =
    "Текстура: X - вдоль, Y - поперёк. Положение кромки указывается для каждой стороны.";
const BLANK_TITLE: &str = "Шаблон для раскроя";
const BLANK_LEGEND: &str =
    "кр длина - кромка по длинным сторонам, кр ширина - кромка по коротким сторонам.";

const ORDER_HEADERS: [&str; 9] = [
    "№",
    "Длина (мм)",
    "Ширина (мм)",
    "Кол-во",
    "TXT (текстура)",
    "Вверх",
    "Вниз",
    "Лево",
    "Право",
];
const ORDER_WIDTHS: [f64; 9] = [6.0, 12.0, 12.0, 7.0, 16.0, 10.0, 10.0, 10.0, 10.0];

// The duplicated banding columns come from the paper form this layout mirrors.
const BLANK_HEADERS: [&str; 9] = [
    "Длина",
    "Ширина",
    "Количество",
    "текстура",
    "кр длина",
    "кр длина",
    "кр ширина",
    "кр ширина",
    "наименование детали",
];
const BLANK_WIDTHS: [f64; 9] = [10.0, 10.0, 12.0, 10.0, 10.0, 10.0, 10.0, 10.0, 26.0];

/// Row heights in points.
const TITLE_HEIGHT: f64 = 22.0;
const LEGEND_HEIGHT: f64 = 18.0;
const CONTACT_HEIGHT: f64 = 15.0;
const HEADER_HEIGHT: f64 = 23.0;
const DATA_HEIGHT: f64 = 20.0;
const SUMMARY_HEIGHT: f64 = 30.0;

/// Accent color of the summary line.
const SUMMARY_COLOR: Rgb = Rgb(0x36, 0x58, 0x81);

/// Which template layout to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateVariant {
    /// Contact line, per-side banding and sheet summary.
    #[default]
    Order,
    /// Cutting list padded with blank rows.
    Blank,
}

impl TemplateVariant {
    /// Column labels of the header row.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            TemplateVariant::Order => &ORDER_HEADERS,
            TemplateVariant::Blank => &BLANK_HEADERS,
        }
    }

    /// Number of header columns.
    pub fn column_count(&self) -> u32 {
        self.headers().len() as u32
    }

    /// Column widths in characters.
    pub fn column_widths(&self) -> &'static [f64] {
        match self {
            TemplateVariant::Order => &ORDER_WIDTHS,
            TemplateVariant::Blank => &BLANK_WIDTHS,
        }
    }

    /// Worksheet name.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            TemplateVariant::Order => "Шаблон_покраски",
            TemplateVariant::Blank => "Шаблон_раскроя",
        }
    }

    /// Index of the header row.
    pub fn header_row(&self) -> u32 {
        match self {
            TemplateVariant::Order => 4,
            TemplateVariant::Blank => 3,
        }
    }

    /// Whether the layout prints the customer's contact details.
    pub fn requires_contact(&self) -> bool {
        matches!(self, TemplateVariant::Order)
    }
}

impl FromStr for TemplateVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "order" | "a" => Ok(TemplateVariant::Order),
            "blank" | "b" => Ok(TemplateVariant::Blank),
            other => Err(format!("unknown template variant '{}'", other)),
        }
    }
}

impl std::fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateVariant::Order => write!(f, "order"),
            TemplateVariant::Blank => write!(f, "blank"),
        }
    }
}

// === Styles ===

fn title_style() -> CellStyle {
    CellStyle {
        font: Font {
            bold: true,
            size: Some(15.0),
            ..Default::default()
        },
        alignment: Alignment::centered(false),
        border: None,
    }
}

fn legend_style() -> CellStyle {
    CellStyle {
        font: Font {
            italic: true,
            size: Some(10.0),
            ..Default::default()
        },
        alignment: Alignment::centered(true),
        border: None,
    }
}

fn contact_style() -> CellStyle {
    CellStyle {
        font: Font {
            size: Some(11.0),
            ..Default::default()
        },
        alignment: Alignment {
            horizontal: Some(HorizontalAlign::Left),
            vertical: Some(VerticalAlign::Center),
            wrap_text: false,
        },
        border: None,
    }
}

/// Bordered, centered, wrapping grid cell; bold for the header row.
fn grid_style(bold: bool) -> CellStyle {
    CellStyle {
        font: Font {
            bold,
            ..Default::default()
        },
        alignment: Alignment::centered(true),
        border: Some(Border::THIN_BLACK),
    }
}

fn summary_style() -> CellStyle {
    CellStyle {
        font: Font {
            italic: true,
            color: Some(SUMMARY_COLOR),
            ..Default::default()
        },
        alignment: Alignment {
            wrap_text: true,
            ..Default::default()
        },
        border: Some(Border::THIN_BLACK),
    }
}

/// Free-text description of the sheet printed under the part list.
pub fn summary_line(sheet: &SheetSpec) -> String {
    format!(
        "Размер листа: {} x {} мм, материал: {}, кромка: {} ({}), толщина: {} мм, текстура: {}",
        sheet.width,
        sheet.height,
        sheet.display_material(),
        sheet.edge.trim(),
        sheet.edge_thickness.trim(),
        sheet.effective_thickness(),
        if sheet.has_texture { "да" } else { "нет" }
    )
}

/// Contact line of the order template.
fn contact_line(order: &Order) -> String {
    format!(
        "Имя: {}  Фамилия: {}  Телефон: {}",
        order.contact.first_name.trim(),
        order.contact.last_name.trim(),
        order.contact.phone.trim()
    )
}

fn count_cell(part: &Part) -> CellValue {
    match part.count {
        Some(n) if n > 0 => CellValue::Number(f64::from(n)),
        _ => CellValue::Empty,
    }
}

fn edge_cell(banded: bool, edge: &str) -> CellValue {
    CellValue::optional_text(EdgeSides::label(banded, edge))
}

fn order_row(idx: usize, part: &Part, sheet: &SheetSpec) -> Vec<CellValue> {
    let [top, bottom, left, right] = part.edges.as_array();
    vec![
        CellValue::Number((idx + 1) as f64),
        CellValue::optional_number(part.length),
        CellValue::optional_number(part.width),
        count_cell(part),
        CellValue::optional_text(if part.texture { "✔" } else { "" }),
        edge_cell(top, &sheet.edge),
        edge_cell(bottom, &sheet.edge),
        edge_cell(left, &sheet.edge),
        edge_cell(right, &sheet.edge),
    ]
}

fn blank_row(part: &Part, sheet: &SheetSpec) -> Vec<CellValue> {
    let [top, bottom, left, right] = part.edges.as_array();
    vec![
        CellValue::optional_number(part.length),
        CellValue::optional_number(part.width),
        count_cell(part),
        CellValue::optional_text(if part.texture { "да" } else { "" }),
        edge_cell(top, &sheet.edge),
        edge_cell(bottom, &sheet.edge),
        edge_cell(left, &sheet.edge),
        edge_cell(right, &sheet.edge),
        CellValue::optional_text(part.name.as_deref().unwrap_or("").trim()),
    ]
}

/// Title rows shared by both layouts: title and legend, merged over the header width.
fn push_banner(doc: &mut Document, title: &str, legend: &str, span_to: u32) {
    let row = doc.push_row(vec![title.into()]);
    doc.merge(CellRange::row_span(row, 0, span_to));
    doc.set_style(row, 0, title_style());
    doc.set_row_height(row, TITLE_HEIGHT);

    let row = doc.push_row(vec![legend.into()]);
    doc.merge(CellRange::row_span(row, 0, span_to));
    doc.set_style(row, 0, legend_style());
    doc.set_row_height(row, LEGEND_HEIGHT);
}

/// Header row plus one bordered row per part.
fn push_grid<F>(doc: &mut Document, variant: TemplateVariant, parts: &[Part], mut row_for: F)
where
    F: FnMut(usize, &Part) -> Vec<CellValue>,
{
    let last_col = variant.column_count() - 1;

    let header: Vec<CellValue> = variant.headers().iter().map(|&h| h.into()).collect();
    let row = doc.push_row(header);
    doc.style_row(row, 0, last_col, grid_style(true));
    doc.set_row_height(row, HEADER_HEIGHT);

    for (idx, part) in parts.iter().enumerate() {
        let row = doc.push_row(row_for(idx, part));
        doc.style_row(row, 0, last_col, grid_style(false));
        doc.set_row_height(row, DATA_HEIGHT);
    }
}

/// Build the spreadsheet model for an order.
///
/// Missing or non-finite part values become blank cells. No validation is
/// done here; callers that need the blocking checks run them first.
pub fn build_document(order: &Order, variant: TemplateVariant) -> Document {
    let mut doc = Document::new(variant.sheet_name());
    doc.col_widths = variant.column_widths().to_vec();
    // Banner merges extend one column past the grid
    let span_to = variant.column_count();
    let sheet = &order.sheet;

    match variant {
        TemplateVariant::Order => {
            push_banner(&mut doc, ORDER_TITLE, ORDER_LEGEND, span_to);

            let row = doc.push_row(vec![contact_line(order).into()]);
            doc.merge(CellRange::row_span(row, 0, span_to));
            doc.set_style(row, 0, contact_style());
            doc.set_row_height(row, CONTACT_HEIGHT);

            doc.push_blank_row();
            push_grid(&mut doc, variant, &order.parts, |idx, part| {
                order_row(idx, part, sheet)
            });
            doc.push_blank_row();

            let row = doc.push_row(vec![summary_line(sheet).into()]);
            doc.merge(CellRange::row_span(row, 0, span_to));
            doc.set_style(row, 0, summary_style());
            doc.set_row_height(row, SUMMARY_HEIGHT);
        }
        TemplateVariant::Blank => {
            push_banner(&mut doc, BLANK_TITLE, BLANK_LEGEND, span_to);
            doc.push_blank_row();
            push_grid(&mut doc, variant, &order.parts, |_, part| {
                blank_row(part, sheet)
            });

            let last_col = variant.column_count() - 1;
            for _ in 0..BLANK_PADDING_ROWS {
                let row = doc.push_row(vec![CellValue::Empty; variant.headers().len()]);
                doc.style_row(row, 0, last_col, grid_style(false));
                doc.set_row_height(row, DATA_HEIGHT);
            }
        }
    }

    tracing::debug!(
        variant = %variant,
        rows = doc.row_count(),
        parts = order.parts.len(),
        "template built"
    );
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Contact;
    use pretty_assertions::assert_eq;

    fn sample_order() -> Order {
        let mut sheet = SheetSpec::default().with_material("ДСП").with_edge("ПВХ", "2 мм");
        sheet.has_texture = true;
        Order {
            contact: Contact::new("Иван", "Петров", "+7 900 123 45 67"),
            sheet,
            parts: vec![
                Part::new(600.0, 400.0, 2)
                    .with_texture(true)
                    .with_edges(EdgeSides {
                        top: true,
                        right: true,
                        ..Default::default()
                    }),
                Part::new(300.0, 300.0, 1).with_name("Полка"),
            ],
        }
    }

    #[test]
    fn test_order_layout_rows() {
        let doc = build_document(&sample_order(), TemplateVariant::Order);
        assert_eq!(doc.sheet_name, "Шаблон_покраски");
        assert_eq!(doc.cell(0, 0).unwrap().display(), "Шаблон для покраски");
        assert_eq!(
            doc.cell(2, 0).unwrap().display(),
            "Имя: Иван  Фамилия: Петров  Телефон: +7 900 123 45 67"
        );
        assert!(doc.rows[3].is_empty());
        assert_eq!(doc.cell(4, 0).unwrap().display(), "№");
        assert_eq!(doc.cell(4, 8).unwrap().display(), "Право");

        let first: Vec<String> = doc.rows[5].iter().map(CellValue::display).collect();
        assert_eq!(
            first,
            vec!["1", "600", "400", "2", "✔", "ПВХ", "", "", "ПВХ"]
        );
        let second: Vec<String> = doc.rows[6].iter().map(CellValue::display).collect();
        assert_eq!(second, vec!["2", "300", "300", "1", "", "", "", "", ""]);

        assert!(doc.rows[7].is_empty());
        assert_eq!(
            doc.cell(8, 0).unwrap().display(),
            "Размер листа: 2800 x 2070 мм, материал: ДСП, кромка: ПВХ (2 мм), толщина: 16 мм, текстура: да"
        );
        assert_eq!(doc.row_count(), 9);
    }

    #[test]
    fn test_banner_merges_span_header_width() {
        let doc = build_document(&sample_order(), TemplateVariant::Order);
        for row in 0..3 {
            assert!(doc.merges.contains(&CellRange::row_span(row, 0, 9)));
        }
        let doc = build_document(&sample_order(), TemplateVariant::Blank);
        assert_eq!(
            &doc.merges[..2],
            &[CellRange::row_span(0, 0, 9), CellRange::row_span(1, 0, 9)]
        );
    }

    #[test]
    fn test_grid_cells_bordered() {
        let doc = build_document(&sample_order(), TemplateVariant::Order);
        for row in 4..=6 {
            for col in 0..9 {
                let style = doc.style(row, col).expect("grid cell styled");
                assert_eq!(style.border, Some(Border::THIN_BLACK));
                assert_eq!(style.alignment, Alignment::centered(true));
                assert_eq!(style.font.bold, row == 4);
            }
        }
        assert!(doc.style(3, 0).is_none());
    }

    #[test]
    fn test_fixed_styles() {
        let doc = build_document(&sample_order(), TemplateVariant::Order);
        let title = doc.style(0, 0).unwrap();
        assert!(title.font.bold);
        assert_eq!(title.font.size, Some(15.0));
        let legend = doc.style(1, 0).unwrap();
        assert!(legend.font.italic && legend.alignment.wrap_text);
        let summary = doc.style(8, 0).unwrap();
        assert!(summary.font.italic);
        assert_eq!(summary.font.color, Some(Rgb(0x36, 0x58, 0x81)));
    }

    #[test]
    fn test_dimensions_present() {
        let doc = build_document(&sample_order(), TemplateVariant::Order);
        assert_eq!(doc.col_widths, ORDER_WIDTHS.to_vec());
        assert_eq!(doc.row_heights.get(&0), Some(&22.0));
        assert_eq!(doc.row_heights.get(&4), Some(&23.0));
        assert_eq!(doc.row_heights.get(&5), Some(&20.0));
        assert!(doc.row_heights[&0] > doc.row_heights[&5]);
    }

    #[test]
    fn test_missing_values_render_blank() {
        let mut order = sample_order();
        order.parts[0].width = None;
        order.parts[1].length = Some(f64::NAN);
        order.parts[1].count = None;
        let doc = build_document(&order, TemplateVariant::Order);
        assert_eq!(doc.cell(5, 2), Some(&CellValue::Empty));
        assert_eq!(doc.cell(6, 1), Some(&CellValue::Empty));
        assert_eq!(doc.cell(6, 3), Some(&CellValue::Empty));
        assert_eq!(doc.cell(5, 2).unwrap().display(), "");
    }

    #[test]
    fn test_edges_blank_without_sheet_edge() {
        let mut order = sample_order();
        order.sheet.edge = String::new();
        let doc = build_document(&order, TemplateVariant::Order);
        assert!(doc.rows[5][5..].iter().all(CellValue::is_empty));
    }

    #[test]
    fn test_blank_layout() {
        let doc = build_document(&sample_order(), TemplateVariant::Blank);
        assert_eq!(doc.sheet_name, "Шаблон_раскроя");
        assert!(doc.rows[2].is_empty());
        assert_eq!(doc.cell(3, 4).unwrap().display(), "кр длина");
        assert_eq!(doc.cell(3, 5).unwrap().display(), "кр длина");
        assert_eq!(doc.cell(3, 7).unwrap().display(), "кр ширина");

        let first: Vec<String> = doc.rows[4].iter().map(CellValue::display).collect();
        assert_eq!(
            first,
            vec!["600", "400", "2", "да", "ПВХ", "", "", "ПВХ", ""]
        );
        assert_eq!(doc.cell(5, 8).unwrap().display(), "Полка");

        // header + 2 parts + padding
        assert_eq!(doc.row_count(), 3 + 1 + 2 + BLANK_PADDING_ROWS);
        let last = doc.row_count() - 1;
        for col in 0..9 {
            assert_eq!(doc.style(last, col).unwrap().border, Some(Border::THIN_BLACK));
            assert_eq!(doc.cell(last, col), Some(&CellValue::Empty));
        }
        assert_eq!(doc.merges.len(), 2);
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("order".parse::<TemplateVariant>(), Ok(TemplateVariant::Order));
        assert_eq!("B".parse::<TemplateVariant>(), Ok(TemplateVariant::Blank));
        assert!("csv".parse::<TemplateVariant>().is_err());
        assert_eq!(TemplateVariant::Blank.to_string(), "blank");
    }

    #[test]
    fn test_summary_uses_custom_material_and_thickness() {
        let mut sheet = SheetSpec::new(2500.0, 1830.0).with_material("МДФ");
        sheet.material_custom_name = Some("МДФ белый".to_string());
        assert_eq!(
            summary_line(&sheet),
            "Размер листа: 2500 x 1830 мм, материал: МДФ белый, кромка:  (1 мм), толщина: 18 мм, текстура: нет"
        );
    }
}
