//! panel-export - CLI tool to preview cutting layouts and export order templates.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use panel_core::{
    pack_shelves, preview_order, render_order, validate_order, AreaReport, Order, PreviewConfig,
    SheetPreset, SvgSurface, TemplateVariant, XlsxWriter,
};

/// Preview board cutting layouts and export order templates to XLSX.
#[derive(Parser, Debug)]
#[command(name = "panel-export")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input order file (JSON); without it the starter order is used
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output XLSX file, or a directory for the generated file name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Template layout: order or blank
    #[arg(long, default_value = "order")]
    variant: TemplateVariant,

    /// Override the sheet size (2800x2070, 2500x1830 or WxH in mm)
    #[arg(long)]
    sheet: Option<String>,

    /// Write the layout preview as SVG
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Validate only, don't generate output
    #[arg(long)]
    validate: bool,

    /// Output debug information as JSON
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Where to write the export: an explicit file, a directory, or the working directory.
fn resolve_output_path(output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

/// Read the order file, or fall back to the starter order of a fresh form.
fn load_order(input: Option<&Path>) -> Result<Order> {
    match input {
        Some(path) => {
            info!("Processing: {}", path.display());
            Order::from_file(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            info!("No input file, using the starter order");
            Ok(Order::starter())
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load the order snapshot
    let mut order = load_order(args.input.as_deref())?;

    if let Some(size) = &args.sheet {
        let preset = SheetPreset::parse(size)
            .with_context(|| format!("Unknown sheet size '{}'", size))?;
        let (width, height) = preset.dimensions();
        order.sheet.width = width;
        order.sheet.height = height;
        info!("Sheet size set to {}", preset);
    }

    info!(
        "Loaded {} part(s), {} copies",
        order.parts.len(),
        order.total_copies()
    );

    let report = AreaReport::compute(&order.parts, &order.sheet);
    info!(
        "Used area: {} m², waste: {} %",
        report.used_display(),
        report.waste_display()
    );

    // Layout preview
    if let Some(svg_path) = &args.preview {
        let config = PreviewConfig::default();
        let mut surface = SvgSurface::new(config.surface_width, config.surface_height);
        let (_, preview) = preview_order(&order, &config, &mut surface);

        std::fs::write(svg_path, surface.finish())
            .with_context(|| format!("Failed to write {}", svg_path.display()))?;

        if preview.dropped > 0 {
            warn!(
                "Preview shows {} of {} copies",
                preview.placed,
                preview.placed + preview.dropped
            );
        }
        info!("Preview: {}", svg_path.display());
    }

    // Validate
    let validation = validate_order(&order, args.variant);

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    // Debug output
    if args.debug {
        let layout = pack_shelves(&order.parts, &order.sheet, &PreviewConfig::default());
        let json = serde_json::to_string_pretty(&serde_json::json!({
            "order": order,
            "metrics": report,
            "layout": layout,
        }))?;
        println!("{}", json);
        return Ok(());
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    // Validate-only mode
    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    // Generate output; validation already ran above
    let output = render_order(&order, args.variant, &XlsxWriter::new())?;
    let output_path = resolve_output_path(args.output.as_deref(), &output.file_name);

    std::fs::write(&output_path, &output.bytes)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!("Generated: {}", output_path.display());

    Ok(())
}
