use std::fmt;
use std::sync::LazyLock;

use avia_core::text;
use avia_core::{ValidationError, ValidationResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration formats like "SP-LOT" or "N12345": 1-2 letters, optional
/// hyphen, 2-5 uppercase alphanumerics.
static TAIL_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,2}-?[A-Z0-9]{2,5}$").unwrap());

/// An aircraft model in the catalog, e.g. Boeing 737.
/// (manufacturer, model) is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirplaneType {
    pub id: Uuid,
    pub manufacturer: String,
    pub model: String,
}

impl AirplaneType {
    pub fn new(manufacturer: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            manufacturer: manufacturer.into(),
            model: model.into(),
        }
    }
}

impl fmt::Display for AirplaneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.manufacturer, self.model)
    }
}

/// A physical aircraft with its cabin layout (rows × seats per row).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airplane {
    pub id: Uuid,
    /// Registration mark, stored uppercase. Unique.
    pub tail_number: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type_id: Uuid,
}

impl Airplane {
    pub fn new(
        tail_number: impl Into<String>,
        rows: i32,
        seats_in_row: i32,
        airplane_type_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tail_number: tail_number.into(),
            rows,
            seats_in_row,
            airplane_type_id,
        }
    }

    pub fn normalize(&mut self) {
        self.tail_number = text::uppercase(&self.tail_number);
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if !TAIL_NUMBER_REGEX.is_match(&self.tail_number) {
            return Err(ValidationError::Format(format!(
                "Tail number must be a valid registration like 'SP-LOT' or 'N12345', got {:?}",
                self.tail_number
            )));
        }
        if self.rows <= 0 || self.seats_in_row <= 0 {
            return Err(ValidationError::Bounds(format!(
                "Airplane layout must have positive rows and seats, got {} x {}",
                self.rows, self.seats_in_row
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airplane(tail: &str) -> Airplane {
        Airplane::new(tail, 30, 6, Uuid::new_v4())
    }

    #[test]
    fn test_tail_number_formats() {
        for tail in ["SP-LOT", "N12345", "G-ABCD", "HB22", "sp-lot "] {
            let mut plane = airplane(tail);
            plane.normalize();
            plane.validate().unwrap();
        }
        for tail in ["", "SPX-LOT", "S", "SP-L", "sp lot", "N123456"] {
            let mut plane = airplane(tail);
            plane.normalize();
            assert!(
                matches!(plane.validate(), Err(ValidationError::Format(_))),
                "{tail:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_layout_must_be_positive() {
        let plane = Airplane::new("SP-LOT", 0, 6, Uuid::new_v4());
        assert!(matches!(plane.validate(), Err(ValidationError::Bounds(_))));

        let plane = Airplane::new("SP-LOT", 30, -1, Uuid::new_v4());
        assert!(matches!(plane.validate(), Err(ValidationError::Bounds(_))));
    }
}
