//! Data model types for parts, sheets and orders.

mod order;
mod part;
mod sheet;

pub use order::{Contact, Order};
pub use part::{EdgeSides, Part};
pub use sheet::SheetSpec;
