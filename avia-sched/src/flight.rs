use avia_core::{ValidationError, ValidationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::overlap::TimeWindow;

/// Lifecycle states of a flight.
///
/// The enum is the whole contract: transitions are unconstrained writes,
/// matching the operational reality that statuses are corrected by hand.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    #[default]
    Scheduled,
    Delayed,
    Boarding,
    InAir,
    Landed,
    Canceled,
}

/// A scheduled leg: an airplane flying a route in a time window, with an
/// owned crew roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    pub route_id: Uuid,
    pub airplane_id: Uuid,
    pub crew_member_ids: Vec<Uuid>,
    pub status: FlightStatus,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

impl Flight {
    pub fn new(
        route_id: Uuid,
        airplane_id: Uuid,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            route_id,
            airplane_id,
            crew_member_ids: Vec::new(),
            status: FlightStatus::default(),
            departure_time,
            arrival_time,
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.departure_time, self.arrival_time)
    }

    /// Checked before any overlap scan: conflict checks are meaningless on
    /// an inverted window.
    pub fn validate_window(&self) -> ValidationResult<()> {
        if !self.window().is_ordered() {
            return Err(ValidationError::Format(
                "Arrival time cannot be sooner than departure time".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_inverted_window_rejected() {
        let dep = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let arr = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let flight = Flight::new(Uuid::new_v4(), Uuid::new_v4(), dep, arr);
        assert!(matches!(flight.validate_window(), Err(ValidationError::Format(_))));

        // zero-length windows are inverted too
        let flight = Flight::new(Uuid::new_v4(), Uuid::new_v4(), dep, dep);
        assert!(flight.validate_window().is_err());
    }

    #[test]
    fn test_new_flight_defaults_to_scheduled() {
        let dep = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let arr = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let flight = Flight::new(Uuid::new_v4(), Uuid::new_v4(), dep, arr);
        assert_eq!(flight.status, FlightStatus::Scheduled);
        assert!(flight.crew_member_ids.is_empty());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&FlightStatus::InAir).unwrap();
        assert_eq!(json, "\"in_air\"");
    }
}
