use std::sync::Arc;

use avia_catalog::CatalogRepository;
use avia_core::{StoreError, ValidationError, ValidationResult};
use tracing::{info, warn};
use uuid::Uuid;

use crate::crew::CrewMember;
use crate::flight::Flight;
use crate::overlap::TimeWindow;
use crate::repository::FlightRepository;

/// The overlap engine. Two entry points mutate schedules — saving a flight
/// and editing a flight's crew roster — and both funnel the roster through
/// one conflict check so the two paths cannot drift apart.
pub struct ScheduleService {
    flights: Arc<dyn FlightRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

impl ScheduleService {
    pub fn new(flights: Arc<dyn FlightRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { flights, catalog }
    }

    /// Validated flight write. Check order matters: window ordering first,
    /// then airplane occupancy, then crew occupancy.
    pub async fn save_flight(&self, flight: Flight) -> ValidationResult<Flight> {
        flight.validate_window()?;

        if self.catalog.get_route(flight.route_id).await?.is_none() {
            return Err(ValidationError::Reference(format!(
                "Flight references missing route {}",
                flight.route_id
            )));
        }
        let airplane = self
            .catalog
            .get_airplane(flight.airplane_id)
            .await?
            .ok_or_else(|| {
                ValidationError::Reference(format!(
                    "Flight references missing airplane {}",
                    flight.airplane_id
                ))
            })?;

        let window = flight.window();
        let booked = self
            .flights
            .flights_for_airplane(flight.airplane_id, flight.id)
            .await?;
        if let Some(conflict) = booked.iter().find(|other| other.window().conflicts_with(&window)) {
            warn!(
                flight = %flight.id,
                tail_number = %airplane.tail_number,
                conflicting_flight = %conflict.id,
                "flight rejected: airplane double-booked"
            );
            return Err(ValidationError::Conflict(format!(
                "Airplane {} already flies between {} and {}",
                airplane.tail_number, conflict.departure_time, conflict.arrival_time
            )));
        }

        self.check_roster(flight.id, &window, &flight.crew_member_ids).await?;

        if self.flights.get_flight(flight.id).await?.is_some() {
            self.flights.update_flight(&flight).await?;
        } else {
            self.flights.create_flight(&flight).await?;
        }
        info!(id = %flight.id, tail_number = %airplane.tail_number, "flight saved");
        Ok(flight)
    }

    /// Replace a flight's crew roster. The candidate roster is validated
    /// before the flight row reflects it: a newly added member brings their
    /// existing flights into the check.
    pub async fn assign_crew(&self, flight_id: Uuid, roster: Vec<Uuid>) -> ValidationResult<Flight> {
        let mut flight = self
            .flights
            .get_flight(flight_id)
            .await?
            .ok_or(StoreError::NotFound { entity: "flight", id: flight_id })?;

        self.check_roster(flight.id, &flight.window(), &roster).await?;

        flight.crew_member_ids = roster;
        self.flights.update_flight(&flight).await?;
        info!(id = %flight.id, crew = flight.crew_member_ids.len(), "crew roster updated");
        Ok(flight)
    }

    /// Shared roster check: every member of `roster` must be free of
    /// conflicting flights other than `flight_id` itself.
    async fn check_roster(
        &self,
        flight_id: Uuid,
        window: &TimeWindow,
        roster: &[Uuid],
    ) -> ValidationResult<()> {
        for member_id in roster {
            let member = self
                .flights
                .get_crew_member(*member_id)
                .await?
                .ok_or_else(|| {
                    ValidationError::Reference(format!("Crew member {member_id} does not exist"))
                })?;
            let assigned = self
                .flights
                .flights_for_crew_member(*member_id, flight_id)
                .await?;
            if let Some(conflict) = assigned.iter().find(|other| other.window().conflicts_with(window)) {
                warn!(
                    flight = %flight_id,
                    crew_member = %member_id,
                    conflicting_flight = %conflict.id,
                    "flight rejected: crew member double-booked"
                );
                return Err(ValidationError::Conflict(format!(
                    "Crew member {} has another flight between {} and {}",
                    member, conflict.departure_time, conflict.arrival_time
                )));
            }
        }
        Ok(())
    }

    /// "SP-LOT, WAW - JFK. Departing at ..., arriving at ..."
    pub async fn flight_label(&self, flight: &Flight) -> ValidationResult<String> {
        let airplane = self
            .catalog
            .get_airplane(flight.airplane_id)
            .await?
            .ok_or_else(|| {
                ValidationError::Reference(format!(
                    "Flight {} references missing airplane",
                    flight.id
                ))
            })?;
        let route = self.catalog.get_route(flight.route_id).await?.ok_or_else(|| {
            ValidationError::Reference(format!("Flight {} references missing route", flight.id))
        })?;
        let source = self.airport_code(route.source_id).await?;
        let destination = self.airport_code(route.destination_id).await?;
        Ok(format!(
            "{}, {} - {}. Departing at {}, arriving at {}",
            airplane.tail_number, source, destination, flight.departure_time, flight.arrival_time
        ))
    }

    async fn airport_code(&self, airport_id: Uuid) -> ValidationResult<String> {
        let airport = self.catalog.get_airport(airport_id).await?.ok_or_else(|| {
            ValidationError::Reference(format!("Airport {airport_id} does not exist"))
        })?;
        Ok(airport.code)
    }

    pub async fn save_crew_member(&self, member: CrewMember) -> ValidationResult<CrewMember> {
        if self.flights.get_crew_member(member.id).await?.is_some() {
            self.flights.update_crew_member(&member).await?;
        } else {
            self.flights.create_crew_member(&member).await?;
        }
        Ok(member)
    }

    pub async fn delete_flight(&self, id: Uuid) -> ValidationResult<()> {
        Ok(self.flights.delete_flight(id).await?)
    }

    pub async fn delete_crew_member(&self, id: Uuid) -> ValidationResult<()> {
        Ok(self.flights.delete_crew_member(id).await?)
    }
}
