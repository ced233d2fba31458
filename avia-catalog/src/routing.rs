use avia_core::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed source → destination pair, priced by great-circle distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub source_id: Uuid,
    pub destination_id: Uuid,
    pub distance_km: i32,
}

impl Route {
    pub fn new(source_id: Uuid, destination_id: Uuid, distance_km: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_id,
            destination_id,
            distance_km,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.source_id == self.destination_id {
            return Err(ValidationError::Format(
                "Route source and destination cannot be the same airport".to_string(),
            ));
        }
        if self.distance_km <= 0 {
            return Err(ValidationError::Bounds(format!(
                "Route distance must be greater than 0 km, got {}",
                self.distance_km
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_rejects_loop() {
        let airport = Uuid::new_v4();
        let err = Route::new(airport, airport, 100).validate().unwrap_err();
        assert!(matches!(err, ValidationError::Format(_)));
    }

    #[test]
    fn test_route_rejects_non_positive_distance() {
        let route = Route::new(Uuid::new_v4(), Uuid::new_v4(), 0);
        assert!(matches!(route.validate(), Err(ValidationError::Bounds(_))));

        let route = Route::new(Uuid::new_v4(), Uuid::new_v4(), -5);
        assert!(matches!(route.validate(), Err(ValidationError::Bounds(_))));

        Route::new(Uuid::new_v4(), Uuid::new_v4(), 1).validate().unwrap();
    }
}
