//! SVG drawing surface for writing the preview to a file.

use quick_xml::escape::escape;
use std::fmt::Write;

use super::surface::{DrawSurface, Rect, RectStyle, TextStyle};
use crate::theme;

/// Builds a standalone SVG document from draw calls.
pub struct SvgSurface {
    width: f64,
    height: f64,
    elements: Vec<String>,
}

impl SvgSurface {
    /// Create an empty surface of the given pixel size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Number of elements drawn since the last clear.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing has been drawn since the last clear.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Render the complete SVG document.
    pub fn finish(&self) -> String {
        let mut out = String::with_capacity(256 + self.elements.len() * 96);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_px(self.width),
            h = fmt_px(self.height)
        )
        .unwrap();
        writeln!(
            out,
            r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            fmt_px(self.width),
            fmt_px(self.height),
            theme::SURFACE_BG
        )
        .unwrap();
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

impl DrawSurface for SvgSurface {
    fn clear(&mut self) {
        self.elements.clear();
    }

    fn draw_rect(&mut self, rect: Rect, style: &RectStyle) {
        let fill = style
            .fill
            .map(|c| c.to_string())
            .unwrap_or_else(|| "none".to_string());
        let stroke = match style.stroke {
            Some(color) => format!(
                r#" stroke="{}" stroke-width="{}""#,
                color,
                fmt_px(style.stroke_width)
            ),
            None => String::new(),
        };
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}/>"#,
            fmt_px(rect.x),
            fmt_px(rect.y),
            fmt_px(rect.width),
            fmt_px(rect.height),
            fill,
            stroke
        ));
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        self.elements.push(format!(
            r#"<text x="{}" y="{}" fill="{}" font-size="{}" font-family="sans-serif" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            fmt_px(x),
            fmt_px(y),
            style.color,
            fmt_px(style.size),
            escape(text)
        ));
    }
}

/// Format a pixel value with at most two decimals and no trailing zeros.
fn fmt_px(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreviewConfig;
    use crate::layout::render_preview;
    use crate::model::{Part, SheetSpec};

    #[test]
    fn test_fmt_px() {
        assert_eq!(fmt_px(10.0), "10");
        assert_eq!(fmt_px(12.345), "12.35");
        assert_eq!(fmt_px(0.5), "0.5");
        assert_eq!(fmt_px(-0.001), "0");
    }

    #[test]
    fn test_render_preview_to_svg() {
        let config = PreviewConfig::default();
        let mut svg = SvgSurface::new(config.surface_width, config.surface_height);
        let report = render_preview(
            &mut svg,
            &[Part::new(600.0, 400.0, 2)],
            &SheetSpec::default(),
            &config,
        );
        assert_eq!(report.placed, 2);
        // Outline + two rects + two labels
        assert_eq!(svg.len(), 5);

        let doc = svg.finish();
        assert!(doc.starts_with("<svg "));
        assert!(doc.contains(r#"viewBox="0 0 600 420""#));
        assert_eq!(doc.matches(">600×400</text>").count(), 2);
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.draw_text(
            1.0,
            1.0,
            "a<b & c",
            &TextStyle {
                color: theme::LABEL_TEXT,
                size: 10.0,
            },
        );
        assert!(svg.finish().contains("a&lt;b &amp; c"));
        svg.clear();
        assert!(svg.is_empty());
    }
}
