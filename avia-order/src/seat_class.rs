use std::fmt;

use avia_core::text;
use avia_core::{ValidationError, ValidationResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cabin class: "Economy", "Business", ... Name and priority are both
/// unique; priority orders classes front-to-back in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatClass {
    pub id: Uuid,
    pub name: String,
    pub priority: i32,
    /// Per-class scaling of the per-km base fare, never below 1.00.
    pub multiplier: Decimal,
}

impl SeatClass {
    pub fn new(name: impl Into<String>, priority: i32, multiplier: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            priority,
            multiplier,
        }
    }

    pub fn normalize(&mut self) {
        self.name = text::capitalize(&self.name);
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.priority < 0 {
            return Err(ValidationError::Format(format!(
                "Seat class priority can not be negative, got {}",
                self.priority
            )));
        }
        if self.multiplier < Decimal::ONE {
            return Err(ValidationError::Format(format!(
                "Seat class multiplier can not be less than 1.00, got {}",
                self.multiplier
            )));
        }
        Ok(())
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
