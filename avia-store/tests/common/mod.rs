#![allow(dead_code)]

use std::sync::Arc;

use avia_catalog::{Airplane, AirplaneType, Airport, CatalogService, City, Country, Route};
use avia_order::OrderService;
use avia_sched::{CrewMember, ScheduleService};
use avia_store::MemoryStore;
use chrono::{DateTime, TimeZone, Utc};

pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub catalog: CatalogService,
    pub sched: ScheduleService,
    pub orders: OrderService,
}

pub fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let catalog = CatalogService::new(store.clone());
    let sched = ScheduleService::new(store.clone(), store.clone());
    let orders = OrderService::new(store.clone(), store.clone(), store.clone());
    Fixture { store, catalog, sched, orders }
}

/// A seeded world: Warsaw and New York airports, a 1000 km route flown by
/// one 4-row × 6-seat airplane, and two crew members.
pub struct World {
    pub country: Country,
    pub city: City,
    pub waw: Airport,
    pub jfk: Airport,
    pub route: Route,
    pub airplane_type: AirplaneType,
    pub airplane: Airplane,
    pub crew_a: CrewMember,
    pub crew_b: CrewMember,
}

pub async fn seed(fx: &Fixture) -> World {
    let country = fx.catalog.save_country(Country::new("Poland", "PL")).await.unwrap();
    let city = fx
        .catalog
        .save_city(City::new("Warsaw", country.id, "Europe/Warsaw"))
        .await
        .unwrap();
    let waw = fx.catalog.save_airport(Airport::new("Chopin", city.id, "WAW")).await.unwrap();
    let jfk = fx.catalog.save_airport(Airport::new("Kennedy", city.id, "JFK")).await.unwrap();
    let route = fx.catalog.save_route(Route::new(waw.id, jfk.id, 1000)).await.unwrap();
    let airplane_type = fx
        .catalog
        .save_airplane_type(AirplaneType::new("Boeing", "737"))
        .await
        .unwrap();
    let airplane = fx
        .catalog
        .save_airplane(Airplane::new("SP-LOT", 4, 6, airplane_type.id))
        .await
        .unwrap();
    let crew_a = fx.sched.save_crew_member(CrewMember::new("Jan", "Kowalski")).await.unwrap();
    let crew_b = fx.sched.save_crew_member(CrewMember::new("Anna", "Nowak")).await.unwrap();
    World { country, city, waw, jfk, route, airplane_type, airplane, crew_a, crew_b }
}

/// A timestamp at `hour`:00 on a fixed day, so windows read like the
/// schedules they model.
pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
}
