use std::sync::Arc;

use avia_catalog::CatalogRepository;
use avia_core::{AccountId, ValidationError, ValidationResult};
use avia_sched::FlightRepository;
use tracing::info;
use uuid::Uuid;

use crate::models::{Order, Ticket};
use crate::pricing::ticket_price;
use crate::repository::OrderRepository;
use crate::seat_class::SeatClass;

/// Validated commerce writes. Ticket saves read the full related state
/// (flight → airplane layout, route distance, seat class) before anything
/// is persisted; the stored price is always the derived one.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    flights: Arc<dyn FlightRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        flights: Arc<dyn FlightRepository>,
        catalog: Arc<dyn CatalogRepository>,
    ) -> Self {
        Self { orders, flights, catalog }
    }

    pub async fn save_seat_class(&self, mut seat_class: SeatClass) -> ValidationResult<SeatClass> {
        seat_class.normalize();
        seat_class.validate()?;
        if self.orders.get_seat_class(seat_class.id).await?.is_some() {
            self.orders.update_seat_class(&seat_class).await?;
        } else {
            self.orders.create_seat_class(&seat_class).await?;
        }
        info!(id = %seat_class.id, name = %seat_class.name, "seat class saved");
        Ok(seat_class)
    }

    /// Seat classes in cabin order (ascending priority).
    pub async fn seat_classes(&self) -> ValidationResult<Vec<SeatClass>> {
        Ok(self.orders.list_seat_classes().await?)
    }

    pub async fn create_order(&self, user_id: AccountId) -> ValidationResult<Order> {
        let order = Order::new(user_id);
        self.orders.create_order(&order).await?;
        info!(id = %order.id, user = %order.user_id, "order created");
        Ok(order)
    }

    /// An account's orders, newest first.
    pub async fn orders_for_account(&self, user_id: AccountId) -> ValidationResult<Vec<Order>> {
        Ok(self.orders.list_orders_for_account(user_id).await?)
    }

    /// Validated ticket write. Any client-supplied price is discarded and
    /// replaced with the derived one before the row is stored.
    pub async fn save_ticket(&self, mut ticket: Ticket) -> ValidationResult<Ticket> {
        let flight = self
            .flights
            .get_flight(ticket.flight_id)
            .await?
            .ok_or_else(|| {
                ValidationError::Reference(format!(
                    "Ticket references missing flight {}",
                    ticket.flight_id
                ))
            })?;
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
        let route = self
            .catalog
            .get_route(flight.route_id)
            .await?
            .ok_or_else(|| {
                ValidationError::Reference(format!("Flight {} references missing route", flight.id))
            })?;
        let seat_class = self
            .orders
            .get_seat_class(ticket.seat_class_id)
            .await?
            .ok_or_else(|| {
                ValidationError::Reference(format!(
                    "Ticket references missing seat class {}",
                    ticket.seat_class_id
                ))
            })?;
        if self.orders.get_order(ticket.order_id).await?.is_none() {
            return Err(ValidationError::Reference(format!(
                "Ticket references missing order {}",
                ticket.order_id
            )));
        }

        ticket.validate_seat(airplane.rows, airplane.seats_in_row)?;
        ticket.price = ticket_price(route.distance_km, seat_class.multiplier);

        if self.orders.get_ticket(ticket.id).await?.is_some() {
            self.orders.update_ticket(&ticket).await?;
        } else {
            self.orders.create_ticket(&ticket).await?;
        }
        info!(
            id = %ticket.id,
            flight = %ticket.flight_id,
            row = ticket.row,
            seat = ticket.seat,
            price = %ticket.price,
            "ticket saved"
        );
        Ok(ticket)
    }

    pub async fn tickets_for_order(&self, order_id: Uuid) -> ValidationResult<Vec<Ticket>> {
        Ok(self.orders.list_tickets_for_order(order_id).await?)
    }

    pub async fn delete_seat_class(&self, id: Uuid) -> ValidationResult<()> {
        Ok(self.orders.delete_seat_class(id).await?)
    }

    pub async fn delete_order(&self, id: Uuid) -> ValidationResult<()> {
        Ok(self.orders.delete_order(id).await?)
    }

    pub async fn delete_ticket(&self, id: Uuid) -> ValidationResult<()> {
        Ok(self.orders.delete_ticket(id).await?)
    }
}
