use async_trait::async_trait;
use avia_core::StoreResult;
use uuid::Uuid;

use crate::crew::CrewMember;
use crate::flight::Flight;

/// Data access for flights and crew.
///
/// The two `flights_for_*` queries drive overlap checking; `exclude` is the
/// flight being written, so an update never conflicts with itself.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn create_flight(&self, flight: &Flight) -> StoreResult<()>;
    async fn update_flight(&self, flight: &Flight) -> StoreResult<()>;
    async fn delete_flight(&self, id: Uuid) -> StoreResult<()>;
    async fn get_flight(&self, id: Uuid) -> StoreResult<Option<Flight>>;

    /// All flights assigned to `airplane_id`, except `exclude`.
    async fn flights_for_airplane(&self, airplane_id: Uuid, exclude: Uuid)
        -> StoreResult<Vec<Flight>>;

    /// All flights whose roster contains `member_id`, except `exclude`.
    async fn flights_for_crew_member(&self, member_id: Uuid, exclude: Uuid)
        -> StoreResult<Vec<Flight>>;

    async fn create_crew_member(&self, member: &CrewMember) -> StoreResult<()>;
    async fn update_crew_member(&self, member: &CrewMember) -> StoreResult<()>;
    async fn delete_crew_member(&self, id: Uuid) -> StoreResult<()>;
    async fn get_crew_member(&self, id: Uuid) -> StoreResult<Option<CrewMember>>;
}
