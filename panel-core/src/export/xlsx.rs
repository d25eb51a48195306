//! XLSX writer for [`Document`].
//!
//! Produces a minimal single-sheet workbook: text goes out as inline strings
//! (`t="inlineStr"`) so no shared string table is needed, and styles are
//! deduplicated into one `cellXfs` table.

use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::escape::escape;
use zip::write::FileOptions;
use zip::ZipWriter;

use super::document::{
    cell_ref, col_to_letter, Alignment, Border, BorderStyle, CellStyle, CellValue, Document, Font,
    HorizontalAlign, VerticalAlign,
};
use crate::error::Result;

/// A backend that serializes a [`Document`] to bytes.
pub trait DocumentWriter {
    /// File extension of the produced format, without the dot.
    fn extension(&self) -> &'static str;

    /// Serialize the document.
    fn render(&self, doc: &Document) -> Result<Vec<u8>>;

    /// Serialize the document and write it to `path`.
    fn write_file(&self, doc: &Document, path: &Path) -> Result<()> {
        let bytes = self.render(doc)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Office Open XML spreadsheet writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    pub fn new() -> Self {
        Self
    }
}

const DEFAULT_FONT_NAME: &str = "Calibri";
const DEFAULT_FONT_SIZE: f64 = 11.0;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

impl DocumentWriter for XlsxWriter {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut styles = StyleTable::default();
        let sheet_xml = write_sheet_xml(doc, &mut styles);
        let styles_xml = styles.to_xml();
        let workbook_xml = write_workbook_xml(&doc.sheet_name);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            ("xl/workbook.xml", workbook_xml.as_str()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
            ("xl/styles.xml", styles_xml.as_str()),
            ("xl/worksheets/sheet1.xml", sheet_xml.as_str()),
        ];

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            let options =
                FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
            writer.start_file(name, options)?;
            writer.write_all(content.as_bytes())?;
        }
        let cursor = writer.finish()?;
        let bytes = cursor.into_inner();

        tracing::debug!(
            sheet = %doc.sheet_name,
            bytes = bytes.len(),
            cell_formats = styles.xfs.len(),
            "xlsx rendered"
        );
        Ok(bytes)
    }
}

/// Escape text for XML, dropping characters XML 1.0 cannot carry at all.
fn xml_text(text: &str) -> String {
    let legal: String = text
        .chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r')
                || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
        })
        .collect();
    escape(legal.as_str()).into_owned()
}

fn write_workbook_xml(sheet_name: &str) -> String {
    format!(
        "{XML_DECL}\n<workbook xmlns=\"{NS_MAIN}\" xmlns:r=\"{NS_REL}\">\
         <sheets><sheet name=\"{}\" sheetId=\"1\" r:id=\"rId1\"/></sheets></workbook>",
        xml_text(sheet_name)
    )
}

/// Cell format: indices into the font and border tables plus alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellFormat {
    font_id: usize,
    border_id: usize,
    alignment: Alignment,
}

/// Deduplicated style tables; index 0 of each is the workbook default.
#[derive(Debug)]
struct StyleTable {
    fonts: Vec<Font>,
    borders: Vec<Option<Border>>,
    xfs: Vec<CellFormat>,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            fonts: vec![Font::default()],
            borders: vec![None],
            xfs: vec![CellFormat {
                font_id: 0,
                border_id: 0,
                alignment: Alignment::default(),
            }],
        }
    }
}

fn intern<T: PartialEq + Copy>(table: &mut Vec<T>, item: T) -> usize {
    match table.iter().position(|existing| *existing == item) {
        Some(idx) => idx,
        None => {
            table.push(item);
            table.len() - 1
        }
    }
}

impl StyleTable {
    /// `cellXfs` index for a style, registering it on first use.
    fn index_of(&mut self, style: &CellStyle) -> usize {
        let format = CellFormat {
            font_id: intern(&mut self.fonts, style.font),
            border_id: intern(&mut self.borders, style.border),
            alignment: style.alignment,
        };
        intern(&mut self.xfs, format)
    }

    fn to_xml(&self) -> String {
        let mut out = String::with_capacity(2048);
        out.push_str(XML_DECL);
        out.push_str(&format!("\n<styleSheet xmlns=\"{NS_MAIN}\">\n"));

        out.push_str(&format!("<fonts count=\"{}\">", self.fonts.len()));
        for font in &self.fonts {
            write_font(&mut out, font);
        }
        out.push_str("</fonts>\n");

        // Both fills are mandatory in every workbook
        out.push_str(
            "<fills count=\"2\"><fill><patternFill patternType=\"none\"/></fill>\
             <fill><patternFill patternType=\"gray125\"/></fill></fills>\n",
        );

        out.push_str(&format!("<borders count=\"{}\">", self.borders.len()));
        for border in &self.borders {
            write_border(&mut out, border.as_ref());
        }
        out.push_str("</borders>\n");

        out.push_str(
            "<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>\n",
        );

        out.push_str(&format!("<cellXfs count=\"{}\">", self.xfs.len()));
        for xf in &self.xfs {
            write_xf(&mut out, xf);
        }
        out.push_str("</cellXfs>\n");

        out.push_str(
            "<cellStyles count=\"1\"><cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/></cellStyles>\n",
        );
        out.push_str("</styleSheet>");
        out
    }
}

fn write_font(out: &mut String, font: &Font) {
    out.push_str("<font>");
    if font.bold {
        out.push_str("<b/>");
    }
    if font.italic {
        out.push_str("<i/>");
    }
    out.push_str(&format!(
        "<sz val=\"{}\"/>",
        font.size.unwrap_or(DEFAULT_FONT_SIZE)
    ));
    if let Some(color) = font.color {
        out.push_str(&format!("<color rgb=\"FF{}\"/>", color.hex()));
    }
    out.push_str(&format!("<name val=\"{DEFAULT_FONT_NAME}\"/></font>"));
}

fn write_border(out: &mut String, border: Option<&Border>) {
    let Some(border) = border else {
        out.push_str("<border><left/><right/><top/><bottom/><diagonal/></border>");
        return;
    };
    let style = match border.style {
        BorderStyle::Thin => "thin",
    };
    out.push_str("<border>");
    for side in ["left", "right", "top", "bottom"] {
        out.push_str(&format!(
            "<{side} style=\"{style}\"><color rgb=\"FF{}\"/></{side}>",
            border.color.hex()
        ));
    }
    out.push_str("<diagonal/></border>");
}

fn write_xf(out: &mut String, xf: &CellFormat) {
    out.push_str(&format!(
        "<xf numFmtId=\"0\" fontId=\"{}\" fillId=\"0\" borderId=\"{}\" xfId=\"0\"",
        xf.font_id, xf.border_id
    ));
    if xf.font_id != 0 {
        out.push_str(" applyFont=\"1\"");
    }
    if xf.border_id != 0 {
        out.push_str(" applyBorder=\"1\"");
    }

    let align = xf.alignment;
    if align == Alignment::default() {
        out.push_str("/>");
        return;
    }

    out.push_str(" applyAlignment=\"1\"><alignment");
    if let Some(h) = align.horizontal {
        let h = match h {
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
        };
        out.push_str(&format!(" horizontal=\"{h}\""));
    }
    if let Some(v) = align.vertical {
        let v = match v {
            VerticalAlign::Top => "top",
            VerticalAlign::Center => "center",
            VerticalAlign::Bottom => "bottom",
        };
        out.push_str(&format!(" vertical=\"{v}\""));
    }
    if align.wrap_text {
        out.push_str(" wrapText=\"1\"");
    }
    out.push_str("/></xf>");
}

/// Write the worksheet XML, registering cell styles in `styles`.
fn write_sheet_xml(doc: &Document, styles: &mut StyleTable) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(XML_DECL);
    out.push_str(&format!(
        "\n<worksheet xmlns=\"{NS_MAIN}\" xmlns:r=\"{NS_REL}\">\n"
    ));

    let used_rows = doc.used_rows();
    let used_cols = doc.used_cols();

    // <dimension>
    if used_rows > 0 && used_cols > 0 {
        out.push_str(&format!(
            "<dimension ref=\"A1:{}{}\"/>\n",
            col_to_letter(used_cols - 1),
            used_rows
        ));
    }

    // <cols>, widths are in characters already
    if !doc.col_widths.is_empty() {
        out.push_str("<cols>");
        for (idx, width) in doc.col_widths.iter().enumerate() {
            let col = idx + 1;
            out.push_str(&format!(
                "<col min=\"{col}\" max=\"{col}\" width=\"{width}\" customWidth=\"1\"/>"
            ));
        }
        out.push_str("</cols>\n");
    }

    out.push_str("<sheetData>\n");
    for row in 0..used_rows {
        write_row(&mut out, doc, row, used_cols, styles);
    }
    out.push_str("</sheetData>\n");

    // <mergeCells>
    if !doc.merges.is_empty() {
        out.push_str(&format!("<mergeCells count=\"{}\">", doc.merges.len()));
        for merge in &doc.merges {
            out.push_str(&format!("<mergeCell ref=\"{}\"/>", merge.a1()));
        }
        out.push_str("</mergeCells>\n");
    }

    out.push_str("</worksheet>");
    out
}

/// Write one `<row>`; rows with no cells and no height are skipped.
fn write_row(out: &mut String, doc: &Document, row: u32, used_cols: u32, styles: &mut StyleTable) {
    let mut cells = String::new();
    for col in 0..used_cols {
        let value = doc.cell(row, col).filter(|v| !v.is_empty());
        let style = doc.style(row, col);
        if value.is_none() && style.is_none() {
            continue;
        }

        cells.push_str(&format!("<c r=\"{}\"", cell_ref(row, col)));
        if let Some(style) = style {
            let xf = styles.index_of(style);
            if xf != 0 {
                cells.push_str(&format!(" s=\"{xf}\""));
            }
        }
        match value {
            Some(CellValue::Text(text)) => {
                cells.push_str(&format!(
                    " t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                    xml_text(text)
                ));
            }
            Some(CellValue::Number(n)) => {
                cells.push_str(&format!("><v>{n}</v></c>"));
            }
            Some(CellValue::Empty) | None => cells.push_str("/>"),
        }
    }

    let height = doc.row_heights.get(&row);
    if cells.is_empty() && height.is_none() {
        return;
    }

    out.push_str(&format!("<row r=\"{}\"", row + 1));
    if let Some(points) = height {
        out.push_str(&format!(" ht=\"{points}\" customHeight=\"1\""));
    }
    out.push('>');
    out.push_str(&cells);
    out.push_str("</row>\n");
}
