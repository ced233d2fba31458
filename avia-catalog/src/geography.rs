use std::fmt;

use avia_core::text;
use avia_core::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Static reference data: a country identified by its ISO 3166-1 alpha-2 code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    /// Two alphabetic characters, stored uppercase. Unique.
    pub iso_code: String,
}

impl Country {
    pub fn new(name: impl Into<String>, iso_code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            iso_code: iso_code.into(),
        }
    }

    /// Canonicalize fields in place before the write commits.
    pub fn normalize(&mut self) {
        self.name = text::capitalize(&self.name);
        self.iso_code = text::uppercase(&self.iso_code);
    }

    pub fn validate(&self) -> ValidationResult<()> {
        let code = &self.iso_code;
        if code.chars().count() != 2 || !code.chars().all(|c| c.is_alphabetic()) {
            return Err(ValidationError::Format(format!(
                "ISO code must be exactly 2 alphabetic characters, got {code:?}"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.iso_code)
    }
}

/// A city within a country, carrying the IANA timezone its airports inherit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub country_id: Uuid,
    /// IANA zone identifier, e.g. "Europe/Warsaw".
    pub timezone: String,
}

impl City {
    pub fn new(name: impl Into<String>, country_id: Uuid, timezone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            country_id,
            timezone: timezone.into(),
        }
    }

    pub fn normalize(&mut self) {
        self.name = text::capitalize(&self.name);
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.timezone.trim().parse::<chrono_tz::Tz>().is_err() {
            return Err(ValidationError::Format(format!(
                "Timezone must be a valid IANA string like 'America/New_York', got {:?}",
                self.timezone
            )));
        }
        Ok(())
    }
}

/// An airport, keyed by a 3-character code. Its effective timezone is
/// derived through the city, never stored on the airport row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub id: Uuid,
    pub name: String,
    pub city_id: Uuid,
    /// Exactly 3 characters, stored uppercase. Unique.
    pub code: String,
}

impl Airport {
    pub fn new(name: impl Into<String>, city_id: Uuid, code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            city_id,
            code: code.into(),
        }
    }

    pub fn normalize(&mut self) {
        self.code = text::uppercase(&self.code);
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.code.chars().count() != 3 {
            return Err(ValidationError::Format(format!(
                "Airport code must be exactly 3 characters long, got {:?}",
                self.code
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Airport ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_normalizes_then_accepts() {
        let mut country = Country::new("  pOLAND ", " pl ");
        country.normalize();
        country.validate().unwrap();
        assert_eq!(country.name, "Poland");
        assert_eq!(country.iso_code, "PL");
        assert_eq!(country.to_string(), "Poland (PL)");
    }

    #[test]
    fn test_country_rejects_bad_iso_codes() {
        for code in ["P", "POL", "P1", "1A", ""] {
            let mut country = Country::new("Poland", code);
            country.normalize();
            let err = country.validate().unwrap_err();
            assert!(matches!(err, ValidationError::Format(_)), "{code:?}");
        }
    }

    #[test]
    fn test_city_timezone_must_be_iana() {
        let country_id = Uuid::new_v4();
        City::new("Warsaw", country_id, "Europe/Warsaw").validate().unwrap();
        City::new("Warsaw", country_id, " Europe/Warsaw ").validate().unwrap();

        let err = City::new("Warsaw", country_id, "Mars/Olympus").validate().unwrap_err();
        assert!(matches!(err, ValidationError::Format(_)));
    }

    #[test]
    fn test_airport_code_length() {
        let city_id = Uuid::new_v4();
        let mut airport = Airport::new("Chopin", city_id, " waw ");
        airport.normalize();
        airport.validate().unwrap();
        assert_eq!(airport.code, "WAW");

        let mut airport = Airport::new("Chopin", city_id, "WAWA");
        airport.normalize();
        assert!(airport.validate().is_err());
    }
}
