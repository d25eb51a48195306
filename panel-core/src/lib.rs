//! panel-core - Core library for board cutting previews and order template export.
//!
//! Given a sheet and a list of rectangular parts, this library computes material
//! usage, lays the parts out on a preview surface with a greedy shelf packer, and
//! serializes a styled order template spreadsheet.
//!
//! # Example
//!
//! ```no_run
//! use panel_core::{export_order, Order, TemplateVariant, XlsxWriter};
//! use std::path::Path;
//!
//! let order = Order::from_file(Path::new("order.json")).unwrap();
//! let output = export_order(&order, TemplateVariant::Order, &XlsxWriter::new()).unwrap();
//! std::fs::write(&output.file_name, &output.bytes).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod theme;
pub mod validation;

use std::path::{Path, PathBuf};

// Re-exports for convenience
pub use config::{PreviewConfig, SheetPreset};
pub use error::{ErrorCode, ExportError, Result};
pub use export::{build_document, Document, DocumentWriter, TemplateVariant, XlsxWriter};
pub use layout::{pack_shelves, render_preview, DrawSurface, PreviewReport, SvgSurface};
pub use metrics::{format_number, AreaReport};
pub use model::{Contact, EdgeSides, Order, Part, SheetSpec};
pub use validation::{validate_order, ValidationResult};

/// A rendered export, ready to be saved.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// Suggested file name, including the extension.
    pub file_name: String,
    /// Serialized document.
    pub bytes: Vec<u8>,
    /// Non-blocking validation warnings.
    pub warnings: Vec<String>,
}

/// Serialize an order's template without validating it.
///
/// For callers that already ran [`validate_order`] themselves. The returned
/// output carries no warnings.
pub fn render_order(
    order: &Order,
    variant: TemplateVariant,
    writer: &dyn DocumentWriter,
) -> Result<ExportOutput> {
    let doc = build_document(order, variant);
    let bytes = writer.render(&doc)?;
    let file_name = export::export_file_name_now(&order.contact, writer.extension());

    tracing::debug!(file = %file_name, bytes = bytes.len(), "order exported");

    Ok(ExportOutput {
        file_name,
        bytes,
        warnings: Vec::new(),
    })
}

/// Validate an order and serialize its template.
///
/// This is the main high-level function that performs the full export pipeline:
/// 1. Validate the order (blocking errors stop here)
/// 2. Build the document model for the layout variant
/// 3. Render it with `writer`
/// 4. Derive the file name from the contact
pub fn export_order(
    order: &Order,
    variant: TemplateVariant,
    writer: &dyn DocumentWriter,
) -> Result<ExportOutput> {
    let warnings = validate_order(order, variant).into_result()?;
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let output = render_order(order, variant, writer)?;
    Ok(ExportOutput { warnings, ..output })
}

/// Export an order into `dir` under its generated file name.
///
/// Returns the path of the written file.
pub fn export_order_to(
    order: &Order,
    variant: TemplateVariant,
    writer: &dyn DocumentWriter,
    dir: &Path,
) -> Result<PathBuf> {
    let output = export_order(order, variant, writer)?;
    let path = dir.join(&output.file_name);
    std::fs::write(&path, &output.bytes)?;
    Ok(path)
}

/// Compute the usage figures and paint the layout preview.
///
/// Metrics cover every part; the preview may show fewer copies than ordered.
pub fn preview_order<S: DrawSurface + ?Sized>(
    order: &Order,
    config: &PreviewConfig,
    surface: &mut S,
) -> (AreaReport, PreviewReport) {
    let report = AreaReport::compute(&order.parts, &order.sheet);
    let preview = render_preview(surface, &order.parts, &order.sheet, config);
    (report, preview)
}
