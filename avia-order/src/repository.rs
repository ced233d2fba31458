use async_trait::async_trait;
use avia_core::{AccountId, StoreResult};
use uuid::Uuid;

use crate::models::{Order, Ticket};
use crate::seat_class::SeatClass;

/// Data access for commerce rows. Implementations enforce seat-class name
/// and priority uniqueness plus the (flight, row, seat) constraint, and
/// keep the documented listing orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create_seat_class(&self, seat_class: &SeatClass) -> StoreResult<()>;
    async fn update_seat_class(&self, seat_class: &SeatClass) -> StoreResult<()>;
    async fn delete_seat_class(&self, id: Uuid) -> StoreResult<()>;
    async fn get_seat_class(&self, id: Uuid) -> StoreResult<Option<SeatClass>>;
    /// All seat classes, ascending by priority.
    async fn list_seat_classes(&self) -> StoreResult<Vec<SeatClass>>;

    async fn create_order(&self, order: &Order) -> StoreResult<()>;
    async fn delete_order(&self, id: Uuid) -> StoreResult<()>;
    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>>;
    /// Orders placed by one account, newest first.
    async fn list_orders_for_account(&self, user_id: AccountId) -> StoreResult<Vec<Order>>;

    async fn create_ticket(&self, ticket: &Ticket) -> StoreResult<()>;
    async fn update_ticket(&self, ticket: &Ticket) -> StoreResult<()>;
    async fn delete_ticket(&self, id: Uuid) -> StoreResult<()>;
    async fn get_ticket(&self, id: Uuid) -> StoreResult<Option<Ticket>>;
    async fn list_tickets_for_order(&self, order_id: Uuid) -> StoreResult<Vec<Ticket>>;
}
