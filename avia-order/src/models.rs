use std::fmt;

use avia_core::{AccountId, ValidationError, ValidationResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchase grouping tickets, placed by an externally managed account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: AccountId,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(user_id: AccountId) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order placed by {} at {}", self.user_id, self.created_at)
    }
}

/// A seat on a flight. (flight, row, seat) is unique; `price` is derived
/// from the route distance and seat class on every write and is never an
/// independent input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub row: i32,
    pub seat: i32,
    pub seat_class_id: Uuid,
    pub flight_id: Uuid,
    pub order_id: Uuid,
    pub price: Decimal,
}

impl Ticket {
    pub fn new(row: i32, seat: i32, seat_class_id: Uuid, flight_id: Uuid, order_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            row,
            seat,
            seat_class_id,
            flight_id,
            order_id,
            // placeholder, overwritten with the derived price on save
            price: Decimal::ZERO,
        }
    }

    /// Seat coordinates against the airplane layout of the ticket's flight.
    pub fn validate_seat(&self, rows: i32, seats_in_row: i32) -> ValidationResult<()> {
        if self.row <= 0 || self.seat <= 0 {
            return Err(ValidationError::Bounds(format!(
                "Seat or row number can not be 0 or negative, got {}-{}",
                self.row, self.seat
            )));
        }
        if self.row > rows || self.seat > seats_in_row {
            return Err(ValidationError::Bounds(format!(
                "Seat {}-{} exceeds available layout: {} rows, {} seats per row",
                self.row, self.seat, rows, seats_in_row
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticket for flight {} Seat {}-{}", self.flight_id, self.row, self.seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(row: i32, seat: i32) -> Ticket {
        Ticket::new(row, seat, Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn test_seat_within_layout() {
        ticket(4, 6).validate_seat(4, 6).unwrap();
        ticket(1, 1).validate_seat(4, 6).unwrap();
    }

    #[test]
    fn test_seat_exceeding_layout_rejected() {
        let err = ticket(5, 3).validate_seat(4, 6).unwrap_err();
        assert!(matches!(err, ValidationError::Bounds(_)));
        assert!(err.to_string().contains("4 rows"));

        assert!(ticket(3, 7).validate_seat(4, 6).is_err());
    }

    #[test]
    fn test_display_lines() {
        let user = Uuid::new_v4();
        let order = Order::new(user);
        assert_eq!(
            order.to_string(),
            format!("Order placed by {} at {}", user, order.created_at)
        );

        let ticket = ticket(2, 3);
        assert_eq!(
            ticket.to_string(),
            format!("Ticket for flight {} Seat 2-3", ticket.flight_id)
        );
    }

    #[test]
    fn test_non_positive_seat_rejected() {
        assert!(matches!(ticket(0, 1).validate_seat(4, 6), Err(ValidationError::Bounds(_))));
        assert!(matches!(ticket(1, 0).validate_seat(4, 6), Err(ValidationError::Bounds(_))));
        assert!(matches!(ticket(-2, 1).validate_seat(4, 6), Err(ValidationError::Bounds(_))));
    }
}
