pub mod fleet;
pub mod geography;
pub mod repository;
pub mod routing;
pub mod service;

pub use fleet::{Airplane, AirplaneType};
pub use geography::{Airport, City, Country};
pub use repository::CatalogRepository;
pub use routing::Route;
pub use service::CatalogService;
