//! Blocking checks and warnings for an order snapshot.

use crate::config::{
    valid_count, valid_dimension, valid_thickness, COUNT_MAX, COUNT_MIN, DEFAULT_THICKNESS_MM,
    DIM_MAX_MM, DIM_MIN_MM, EPS,
};
use crate::error::{ExportError, Result};
use crate::export::TemplateVariant;
use crate::model::{Contact, Order, Part, SheetSpec};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Blocking errors, in check order.
    pub errors: Vec<ExportError>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(error: ExportError) -> Self {
        Self {
            passed: false,
            errors: vec![error],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }

    /// First error if validation failed, otherwise the warnings.
    pub fn into_result(self) -> Result<Vec<String>> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.warnings),
        }
    }
}

/// Require first name, last name and phone.
pub fn validate_contact(contact: &Contact) -> ValidationResult {
    match contact.missing_field() {
        Some(field) => ValidationResult::error(ExportError::MissingContact { field }),
        None => ValidationResult::ok(),
    }
}

/// Check sheet dimensions and the thickness override.
pub fn validate_sheet(sheet: &SheetSpec) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if !sheet.is_valid() {
        result.add_error(ExportError::InvalidSheet {
            message: format!("dimensions {}x{} mm are not usable", sheet.width, sheet.height),
        });
    }

    if let Some(t) = sheet.thickness {
        if !valid_thickness(t) {
            result.add_warning(format!(
                "Sheet thickness {} mm out of range, using {} mm",
                t, DEFAULT_THICKNESS_MM
            ));
        }
    }

    result
}

/// Whether a part fits on the sheet, rotated when its texture allows it.
fn fits_on_sheet(part: &Part, sheet: &SheetSpec) -> bool {
    let Some((length, width)) = part.dimensions() else {
        return true;
    };
    let direct = length <= sheet.width + EPS && width <= sheet.height + EPS;
    let rotated = length <= sheet.height + EPS && width <= sheet.width + EPS;
    direct || (!part.texture && rotated)
}

/// Check every part's dimensions and count. Part numbers are 1-based.
pub fn validate_parts(parts: &[Part], sheet: &SheetSpec) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for (idx, part) in parts.iter().enumerate() {
        let number = idx + 1;
        let dims_ok = [part.length, part.width]
            .into_iter()
            .all(|dim| dim.is_some_and(valid_dimension));

        if !dims_ok {
            result.add_error(ExportError::InvalidPart {
                index: number,
                message: format!(
                    "length and width must be {}-{} mm",
                    DIM_MIN_MM, DIM_MAX_MM
                ),
            });
        }

        if !part.count.is_some_and(valid_count) {
            result.add_error(ExportError::InvalidPart {
                index: number,
                message: format!("count must be {}-{}", COUNT_MIN, COUNT_MAX),
            });
        }

        if dims_ok && sheet.is_valid() && !fits_on_sheet(part, sheet) {
            result.add_warning(format!(
                "Part #{}: {}x{} mm does not fit on a {}x{} mm sheet",
                number,
                part.length.unwrap_or_default(),
                part.width.unwrap_or_default(),
                sheet.width,
                sheet.height
            ));
        }
    }

    result
}

/// Run every check that gates an export.
///
/// Contact details are only required by layouts that print them.
pub fn validate_order(order: &Order, variant: TemplateVariant) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if variant.requires_contact() {
        result.merge(validate_contact(&order.contact));
    }

    if order.parts.is_empty() {
        result.add_error(ExportError::EmptyOrder);
    }

    result.merge(validate_sheet(&order.sheet));
    result.merge(validate_parts(&order.parts, &order.sheet));
    result
}

/// Quick validation check for command-line --validate flag.
pub fn quick_validate(order: &Order, variant: TemplateVariant) -> Result<()> {
    let result = validate_order(order, variant);
    for warning in &result.warnings {
        tracing::warn!("{}", warning);
    }
    result.into_result().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn valid_order() -> Order {
        Order {
            contact: Contact::new("Иван", "Петров", "+7 900 000 00 00"),
            sheet: SheetSpec::default(),
            parts: vec![Part::new(600.0, 400.0, 2)],
        }
    }

    // ==================== ValidationResult tests ====================

    #[test]
    fn test_validation_result_ok() {
        let result = ValidationResult::ok();
        assert!(result.passed);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validation_result_merge() {
        let mut result = ValidationResult::ok();
        result.add_warning("check this");
        result.merge(ValidationResult::error(ExportError::EmptyOrder));
        assert!(!result.passed);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.errors.len(), 1);
    }

    // ==================== Order tests ====================

    #[test]
    fn test_valid_order_passes() {
        let result = validate_order(&valid_order(), TemplateVariant::Order);
        assert!(result.passed);
        assert!(result.warnings.is_empty());
        assert!(quick_validate(&valid_order(), TemplateVariant::Order).is_ok());
    }

    #[test]
    fn test_missing_contact_blocks_order_layout() {
        let mut order = valid_order();
        order.contact.phone = "  ".to_string();
        let err = validate_order(&order, TemplateVariant::Order)
            .into_result()
            .unwrap_err();
        assert!(matches!(err, ExportError::MissingContact { field: "phone" }));

        // The blank layout prints no contact line
        assert!(validate_order(&order, TemplateVariant::Blank).passed);
    }

    #[test]
    fn test_empty_order_blocks() {
        let mut order = valid_order();
        order.parts.clear();
        let err = quick_validate(&order, TemplateVariant::Blank).unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyOrder);
    }

    #[test]
    fn test_contact_checked_before_parts() {
        let order = Order::default();
        let result = validate_order(&order, TemplateVariant::Order);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].code(), ErrorCode::MissingContact);
        assert_eq!(result.errors[1].code(), ErrorCode::EmptyOrder);
    }

    // ==================== Part tests ====================

    #[test]
    fn test_part_ranges() {
        let sheet = SheetSpec::default();
        let parts = vec![
            Part::new(4.0, 400.0, 1),
            Part::new(600.0, 5001.0, 1),
            Part::new(600.0, 400.0, 0),
            Part::new(600.0, 400.0, 501),
            Part {
                width: None,
                ..Part::new(600.0, 400.0, 1)
            },
            Part::new(5.0, 5000.0, 500),
        ];
        let result = validate_parts(&parts, &sheet);
        let indices: Vec<usize> = result
            .errors
            .iter()
            .map(|e| match e {
                ExportError::InvalidPart { index, .. } => *index,
                other => panic!("unexpected error {other}"),
            })
            .collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_oversize_part_warns() {
        let sheet = SheetSpec::new(2800.0, 2070.0);
        // Fits only when rotated
        let rotatable = Part::new(2000.0, 2700.0, 1);
        assert!(validate_parts(&[rotatable.clone()], &sheet).warnings.is_empty());

        let textured = rotatable.with_texture(true);
        let result = validate_parts(&[textured], &sheet);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("Part #1"));
    }

    // ==================== Sheet tests ====================

    #[test]
    fn test_sheet_checks() {
        let result = validate_sheet(&SheetSpec::new(0.0, 2070.0));
        assert!(!result.passed);
        assert_eq!(result.errors[0].code(), ErrorCode::InvalidSheet);

        let mut sheet = SheetSpec::default();
        sheet.thickness = Some(55.0);
        let result = validate_sheet(&sheet);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(sheet.effective_thickness(), DEFAULT_THICKNESS_MM);
    }
}
