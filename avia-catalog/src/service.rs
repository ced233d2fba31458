use std::sync::Arc;

use avia_core::{ValidationError, ValidationResult};
use tracing::info;
use uuid::Uuid;

use crate::fleet::{Airplane, AirplaneType};
use crate::geography::{Airport, City, Country};
use crate::repository::CatalogRepository;
use crate::routing::Route;

/// Validated writes for reference data. Each save normalizes in place,
/// runs the pure field validators, resolves required relations, then
/// creates or updates by id.
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub async fn save_country(&self, mut country: Country) -> ValidationResult<Country> {
        country.normalize();
        country.validate()?;
        if self.repo.get_country(country.id).await?.is_some() {
            self.repo.update_country(&country).await?;
        } else {
            self.repo.create_country(&country).await?;
        }
        info!(id = %country.id, iso_code = %country.iso_code, "country saved");
        Ok(country)
    }

    pub async fn save_city(&self, mut city: City) -> ValidationResult<City> {
        city.normalize();
        city.validate()?;
        if self.repo.get_country(city.country_id).await?.is_none() {
            return Err(ValidationError::Reference(format!(
                "City {} references missing country {}",
                city.name, city.country_id
            )));
        }
        if self.repo.get_city(city.id).await?.is_some() {
            self.repo.update_city(&city).await?;
        } else {
            self.repo.create_city(&city).await?;
        }
        info!(id = %city.id, name = %city.name, "city saved");
        Ok(city)
    }

    pub async fn save_airport(&self, mut airport: Airport) -> ValidationResult<Airport> {
        airport.normalize();
        let city = self
            .repo
            .get_city(airport.city_id)
            .await?
            .ok_or_else(|| ValidationError::Reference("Airport must have a city".to_string()))?;
        if city.timezone.trim().is_empty() {
            return Err(ValidationError::Reference(format!(
                "City {} of airport {} has no timezone",
                city.name, airport.name
            )));
        }
        airport.validate()?;
        if self.repo.get_airport(airport.id).await?.is_some() {
            self.repo.update_airport(&airport).await?;
        } else {
            self.repo.create_airport(&airport).await?;
        }
        info!(id = %airport.id, code = %airport.code, "airport saved");
        Ok(airport)
    }

    /// The IANA zone an airport operates in, derived through its city.
    pub async fn airport_timezone(&self, airport_id: Uuid) -> ValidationResult<String> {
        let airport = self.get_airport_or_missing(airport_id).await?;
        let city = self
            .repo
            .get_city(airport.city_id)
            .await?
            .ok_or_else(|| ValidationError::Reference("City or timezone wasn't found".to_string()))?;
        if city.timezone.trim().is_empty() {
            return Err(ValidationError::Reference("City or timezone wasn't found".to_string()));
        }
        Ok(city.timezone)
    }

    pub async fn save_route(&self, route: Route) -> ValidationResult<Route> {
        route.validate()?;
        for (label, airport_id) in [("source", route.source_id), ("destination", route.destination_id)] {
            if self.repo.get_airport(airport_id).await?.is_none() {
                return Err(ValidationError::Reference(format!(
                    "Route {} airport {} does not exist",
                    label, airport_id
                )));
            }
        }
        if self.repo.get_route(route.id).await?.is_some() {
            self.repo.update_route(&route).await?;
        } else {
            self.repo.create_route(&route).await?;
        }
        info!(id = %route.id, distance_km = route.distance_km, "route saved");
        Ok(route)
    }

    pub async fn save_airplane_type(&self, airplane_type: AirplaneType) -> ValidationResult<AirplaneType> {
        if self.repo.get_airplane_type(airplane_type.id).await?.is_some() {
            self.repo.update_airplane_type(&airplane_type).await?;
        } else {
            self.repo.create_airplane_type(&airplane_type).await?;
        }
        Ok(airplane_type)
    }

    pub async fn save_airplane(&self, mut airplane: Airplane) -> ValidationResult<Airplane> {
        airplane.normalize();
        airplane.validate()?;
        if self.repo.get_airplane_type(airplane.airplane_type_id).await?.is_none() {
            return Err(ValidationError::Reference(format!(
                "Airplane {} references missing airplane type {}",
                airplane.tail_number, airplane.airplane_type_id
            )));
        }
        if self.repo.get_airplane(airplane.id).await?.is_some() {
            self.repo.update_airplane(&airplane).await?;
        } else {
            self.repo.create_airplane(&airplane).await?;
        }
        info!(id = %airplane.id, tail_number = %airplane.tail_number, "airplane saved");
        Ok(airplane)
    }

    /// "Warsaw, Poland (PL)"
    pub async fn city_label(&self, city: &City) -> ValidationResult<String> {
        let country = self.repo.get_country(city.country_id).await?.ok_or_else(|| {
            ValidationError::Reference(format!("City {} references missing country", city.name))
        })?;
        Ok(format!("{}, {}", city.name, country))
    }

    /// "Chopin Airport (WAW) at Warsaw"
    pub async fn airport_label(&self, airport: &Airport) -> ValidationResult<String> {
        let city = self.repo.get_city(airport.city_id).await?.ok_or_else(|| {
            ValidationError::Reference(format!("Airport {} references missing city", airport.code))
        })?;
        Ok(format!("{} at {}", airport, city.name))
    }

    /// "WAW - JFK, 1000 km"
    pub async fn route_label(&self, route: &Route) -> ValidationResult<String> {
        let source = self.get_airport_or_missing(route.source_id).await?;
        let destination = self.get_airport_or_missing(route.destination_id).await?;
        Ok(format!("{} - {}, {} km", source.code, destination.code, route.distance_km))
    }

    /// "Boeing 737 (SP-LOT)"
    pub async fn airplane_label(&self, airplane: &Airplane) -> ValidationResult<String> {
        let airplane_type = self
            .repo
            .get_airplane_type(airplane.airplane_type_id)
            .await?
            .ok_or_else(|| {
                ValidationError::Reference(format!(
                    "Airplane {} references missing type",
                    airplane.tail_number
                ))
            })?;
        Ok(format!("{} ({})", airplane_type, airplane.tail_number))
    }

    pub async fn delete_country(&self, id: Uuid) -> ValidationResult<()> {
        Ok(self.repo.delete_country(id).await?)
    }

    pub async fn delete_city(&self, id: Uuid) -> ValidationResult<()> {
        Ok(self.repo.delete_city(id).await?)
    }

    pub async fn delete_airport(&self, id: Uuid) -> ValidationResult<()> {
        Ok(self.repo.delete_airport(id).await?)
    }

    pub async fn delete_route(&self, id: Uuid) -> ValidationResult<()> {
        Ok(self.repo.delete_route(id).await?)
    }

    pub async fn delete_airplane_type(&self, id: Uuid) -> ValidationResult<()> {
        Ok(self.repo.delete_airplane_type(id).await?)
    }

    pub async fn delete_airplane(&self, id: Uuid) -> ValidationResult<()> {
        Ok(self.repo.delete_airplane(id).await?)
    }

    async fn get_airport_or_missing(&self, id: Uuid) -> ValidationResult<Airport> {
        self.repo
            .get_airport(id)
            .await?
            .ok_or_else(|| ValidationError::Reference(format!("Airport {id} does not exist")))
    }
}
