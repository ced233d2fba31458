pub mod crew;
pub mod flight;
pub mod overlap;
pub mod repository;
pub mod service;

pub use crew::CrewMember;
pub use flight::{Flight, FlightStatus};
pub use overlap::TimeWindow;
pub use repository::FlightRepository;
pub use service::ScheduleService;
