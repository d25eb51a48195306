//! Order template export: document model, layouts, file naming and writers.

mod document;
mod filename;
mod template;
mod xlsx;

pub use document::{
    cell_ref, col_to_letter, Alignment, Border, BorderStyle, CellRange, CellStyle, CellValue,
    Document, Font, HorizontalAlign, VerticalAlign,
};
pub use filename::{export_file_name, export_file_name_now, filename_safe, FILE_STEM};
pub use template::{build_document, summary_line, TemplateVariant, BLANK_PADDING_ROWS};
pub use xlsx::{DocumentWriter, XlsxWriter};
