pub mod models;
pub mod pricing;
pub mod repository;
pub mod seat_class;
pub mod service;

pub use models::{Order, Ticket};
pub use pricing::ticket_price;
pub use repository::OrderRepository;
pub use seat_class::SeatClass;
pub use service::OrderService;
