//! Order validation ahead of export.

mod validate;

pub use validate::{
    quick_validate, validate_contact, validate_order, validate_parts, validate_sheet,
    ValidationResult,
};
