//! Layout preview: shelf packing and rendering onto a drawing surface.

mod shelf;
mod surface;
mod svg;

pub use shelf::{pack_shelves, PlacedRect, ShelfLayout};
pub use surface::{render_preview, DrawSurface, PreviewReport, Rect, RectStyle, TextStyle};
pub use svg::SvgSurface;
