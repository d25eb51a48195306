//! Order snapshot handed to the engine by the form collaborator.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Part, SheetSpec};
use crate::error::Result;

/// Customer contact details printed on the order template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl Contact {
    /// Create a contact record.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
        }
    }

    /// Name of the first empty required field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.first_name.trim().is_empty() {
            Some("first_name")
        } else if self.last_name.trim().is_empty() {
            Some("last_name")
        } else if self.phone.trim().is_empty() {
            Some("phone")
        } else {
            None
        }
    }
}

/// Immutable snapshot of everything needed for a preview or an export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub contact: Contact,
    pub sheet: SheetSpec,
    pub parts: Vec<Part>,
}

impl Order {
    /// Create an order for the given sheet with no parts.
    pub fn new(sheet: SheetSpec) -> Self {
        Self {
            sheet,
            ..Default::default()
        }
    }

    /// Starting state of a fresh form: default sheet and one demo part.
    pub fn starter() -> Self {
        Self {
            parts: vec![Part::new(600.0, 400.0, 2)],
            ..Default::default()
        }
    }

    /// Parse an order from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read an order from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Total number of part copies in the order.
    pub fn total_copies(&self) -> u64 {
        self.parts.iter().map(|p| u64::from(p.copies())).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        assert_eq!(Contact::default().missing_field(), Some("first_name"));
        assert_eq!(
            Contact::new("Иван", " ", "+7 900").missing_field(),
            Some("last_name")
        );
        assert_eq!(Contact::new("Иван", "Петров", "").missing_field(), Some("phone"));
        assert_eq!(Contact::new("Иван", "Петров", "+7 900").missing_field(), None);
    }

    #[test]
    fn test_from_json() {
        let order = Order::from_json(
            r#"{
                "contact": {"first_name": "Иван", "last_name": "Петров", "phone": "123"},
                "sheet": {"width": 2500, "height": 1830, "material": "МДФ", "edge": "ПВХ"},
                "parts": [
                    {"length": 600, "width": 400, "count": 2, "edges": {"top": true}},
                    {"length": 300, "width": 300}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(order.sheet.width, 2500.0);
        assert_eq!(order.sheet.edge_thickness, "1 мм");
        assert_eq!(order.parts.len(), 2);
        assert!(order.parts[0].edges.top);
        assert_eq!(order.total_copies(), 2);
    }

    #[test]
    fn test_starter() {
        let order = Order::starter();
        assert_eq!(order.parts.len(), 1);
        assert_eq!(order.sheet.width, 2800.0);
    }
}
