//! Drawing surface abstraction and preview rendering.

use serde::Serialize;

use super::shelf::pack_shelves;
use crate::config::PreviewConfig;
use crate::model::{Part, SheetSpec};
use crate::theme::{self, Rgb};

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Fill and outline for a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub stroke_width: f64,
}

/// Text appearance. Text is anchored at its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Rgb,
    pub size: f64,
}

/// A backend the preview can be painted on.
pub trait DrawSurface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Draw a rectangle.
    fn draw_rect(&mut self, rect: Rect, style: &RectStyle);

    /// Draw a single line of text centered on `(x, y)`.
    fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle);
}

/// What a preview pass managed to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PreviewReport {
    /// Part copies drawn.
    pub placed: usize,
    /// Usable part copies left out of the preview.
    pub dropped: usize,
}

/// Paint the sheet outline and the shelf-packed parts onto `surface`.
///
/// The surface is cleared first. With no usable parts only the outline is
/// drawn; with a degenerate sheet nothing is drawn at all.
pub fn render_preview<S: DrawSurface + ?Sized>(
    surface: &mut S,
    parts: &[Part],
    sheet: &SheetSpec,
    config: &PreviewConfig,
) -> PreviewReport {
    surface.clear();

    let layout = pack_shelves(parts, sheet, config);
    let Some(scale) = layout.scale else {
        return PreviewReport {
            placed: 0,
            dropped: layout.dropped,
        };
    };

    let outline = Rect::new(
        config.padding,
        config.padding,
        sheet.width * scale,
        sheet.height * scale,
    );
    surface.draw_rect(
        outline,
        &RectStyle {
            fill: Some(theme::SHEET_FILL),
            stroke: Some(theme::SHEET_BORDER),
            stroke_width: theme::SHEET_STROKE_WIDTH,
        },
    );

    let label_style = TextStyle {
        color: theme::LABEL_TEXT,
        size: theme::LABEL_FONT_SIZE,
    };

    for (idx, placed) in layout.placements.iter().enumerate() {
        let rect = Rect::new(placed.x, placed.y, placed.width, placed.height);
        surface.draw_rect(
            rect,
            &RectStyle {
                fill: Some(theme::part_fill(idx)),
                stroke: Some(theme::PART_BORDER),
                stroke_width: theme::PART_STROKE_WIDTH,
            },
        );
        let (cx, cy) = rect.center();
        surface.draw_text(cx, cy, &placed.label(), &label_style);
    }

    PreviewReport {
        placed: layout.placements.len(),
        dropped: layout.dropped,
    }
}
