use async_trait::async_trait;
use avia_core::StoreResult;
use uuid::Uuid;

use crate::fleet::{Airplane, AirplaneType};
use crate::geography::{Airport, City, Country};
use crate::routing::Route;

/// Data access for reference data: geography, routing, and the fleet.
///
/// Implementations own uniqueness enforcement (`StoreError::Duplicate`) and
/// cascade deletion along the foreign-key edges; the service layer owns
/// format and referential validation.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_country(&self, country: &Country) -> StoreResult<()>;
    async fn update_country(&self, country: &Country) -> StoreResult<()>;
    async fn delete_country(&self, id: Uuid) -> StoreResult<()>;
    async fn get_country(&self, id: Uuid) -> StoreResult<Option<Country>>;

    async fn create_city(&self, city: &City) -> StoreResult<()>;
    async fn update_city(&self, city: &City) -> StoreResult<()>;
    async fn delete_city(&self, id: Uuid) -> StoreResult<()>;
    async fn get_city(&self, id: Uuid) -> StoreResult<Option<City>>;

    async fn create_airport(&self, airport: &Airport) -> StoreResult<()>;
    async fn update_airport(&self, airport: &Airport) -> StoreResult<()>;
    async fn delete_airport(&self, id: Uuid) -> StoreResult<()>;
    async fn get_airport(&self, id: Uuid) -> StoreResult<Option<Airport>>;

    async fn create_route(&self, route: &Route) -> StoreResult<()>;
    async fn update_route(&self, route: &Route) -> StoreResult<()>;
    async fn delete_route(&self, id: Uuid) -> StoreResult<()>;
    async fn get_route(&self, id: Uuid) -> StoreResult<Option<Route>>;

    async fn create_airplane_type(&self, airplane_type: &AirplaneType) -> StoreResult<()>;
    async fn update_airplane_type(&self, airplane_type: &AirplaneType) -> StoreResult<()>;
    async fn delete_airplane_type(&self, id: Uuid) -> StoreResult<()>;
    async fn get_airplane_type(&self, id: Uuid) -> StoreResult<Option<AirplaneType>>;

    async fn create_airplane(&self, airplane: &Airplane) -> StoreResult<()>;
    async fn update_airplane(&self, airplane: &Airplane) -> StoreResult<()>;
    async fn delete_airplane(&self, id: Uuid) -> StoreResult<()>;
    async fn get_airplane(&self, id: Uuid) -> StoreResult<Option<Airplane>>;
}
