//! In-memory relational store behind the repository traits.
//!
//! Mirrors what the SQL schema would enforce: unique constraints surface as
//! `StoreError::Duplicate`, deletes cascade along foreign-key edges, and
//! flight writes re-check airplane and crew occupancy under the write lock
//! (the in-memory analogue of an exclusion constraint), so two racing saves
//! of overlapping flights can never both commit even though the service's
//! own validation reads ran under an earlier, already released lock.

use std::collections::HashMap;

use async_trait::async_trait;
use avia_catalog::{Airplane, AirplaneType, Airport, CatalogRepository, City, Country, Route};
use avia_core::{AccountId, StoreError, StoreResult};
use avia_order::{Order, OrderRepository, SeatClass, Ticket};
use avia_sched::{CrewMember, Flight, FlightRepository};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

fn insert_new<T: Clone>(
    table: &mut HashMap<Uuid, T>,
    id: Uuid,
    row: &T,
    entity: &'static str,
) -> StoreResult<()> {
    if table.contains_key(&id) {
        return Err(StoreError::Duplicate { entity, value: id.to_string() });
    }
    table.insert(id, row.clone());
    Ok(())
}

fn replace<T: Clone>(
    table: &mut HashMap<Uuid, T>,
    id: Uuid,
    row: &T,
    entity: &'static str,
) -> StoreResult<()> {
    if !table.contains_key(&id) {
        return Err(StoreError::NotFound { entity, id });
    }
    table.insert(id, row.clone());
    Ok(())
}

#[derive(Default)]
struct Tables {
    countries: HashMap<Uuid, Country>,
    cities: HashMap<Uuid, City>,
    airports: HashMap<Uuid, Airport>,
    routes: HashMap<Uuid, Route>,
    airplane_types: HashMap<Uuid, AirplaneType>,
    airplanes: HashMap<Uuid, Airplane>,
    flights: HashMap<Uuid, Flight>,
    crew_members: HashMap<Uuid, CrewMember>,
    seat_classes: HashMap<Uuid, SeatClass>,
    orders: HashMap<Uuid, Order>,
    tickets: HashMap<Uuid, Ticket>,
}

impl Tables {
    // Unique-constraint checks, always excluding the row being written.

    fn check_country_unique(&self, row: &Country) -> StoreResult<()> {
        if self.countries.values().any(|c| c.id != row.id && c.iso_code == row.iso_code) {
            return Err(StoreError::Duplicate { entity: "country", value: row.iso_code.clone() });
        }
        Ok(())
    }

    fn check_city_unique(&self, row: &City) -> StoreResult<()> {
        if self
            .cities
            .values()
            .any(|c| c.id != row.id && c.country_id == row.country_id && c.name == row.name)
        {
            return Err(StoreError::Duplicate { entity: "city", value: row.name.clone() });
        }
        Ok(())
    }

    fn check_airport_unique(&self, row: &Airport) -> StoreResult<()> {
        if self.airports.values().any(|a| a.id != row.id && a.code == row.code) {
            return Err(StoreError::Duplicate { entity: "airport", value: row.code.clone() });
        }
        Ok(())
    }

    fn check_airplane_type_unique(&self, row: &AirplaneType) -> StoreResult<()> {
        if self.airplane_types.values().any(|t| {
            t.id != row.id && t.manufacturer == row.manufacturer && t.model == row.model
        }) {
            return Err(StoreError::Duplicate {
                entity: "airplane type",
                value: format!("{} {}", row.manufacturer, row.model),
            });
        }
        Ok(())
    }

    fn check_airplane_unique(&self, row: &Airplane) -> StoreResult<()> {
        if self.airplanes.values().any(|a| a.id != row.id && a.tail_number == row.tail_number) {
            return Err(StoreError::Duplicate {
                entity: "airplane",
                value: row.tail_number.clone(),
            });
        }
        Ok(())
    }

    fn check_seat_class_unique(&self, row: &SeatClass) -> StoreResult<()> {
        if self.seat_classes.values().any(|s| s.id != row.id && s.name == row.name) {
            return Err(StoreError::Duplicate { entity: "seat class", value: row.name.clone() });
        }
        if self.seat_classes.values().any(|s| s.id != row.id && s.priority == row.priority) {
            return Err(StoreError::Duplicate {
                entity: "seat class priority",
                value: row.priority.to_string(),
            });
        }
        Ok(())
    }

    fn check_ticket_unique(&self, row: &Ticket) -> StoreResult<()> {
        if self.tickets.values().any(|t| {
            t.id != row.id && t.flight_id == row.flight_id && t.row == row.row && t.seat == row.seat
        }) {
            return Err(StoreError::Duplicate {
                entity: "ticket seat",
                value: format!("{}-{}", row.row, row.seat),
            });
        }
        Ok(())
    }

    /// Exclusion-constraint analogue, run under the write lock on every
    /// flight write: the service's overlap scan reads under a lock it has
    /// already released by commit time, so the commit itself must re-check
    /// or two racing saves could both land.
    fn check_flight_windows(&self, row: &Flight) -> StoreResult<()> {
        let window = row.window();
        if self.flights.values().any(|f| {
            f.id != row.id && f.airplane_id == row.airplane_id && f.window().conflicts_with(&window)
        }) {
            let tail = self
                .airplanes
                .get(&row.airplane_id)
                .map(|a| a.tail_number.clone())
                .unwrap_or_else(|| row.airplane_id.to_string());
            return Err(StoreError::Conflict { entity: "airplane", value: tail });
        }
        for member in &row.crew_member_ids {
            if self.flights.values().any(|f| {
                f.id != row.id
                    && f.crew_member_ids.contains(member)
                    && f.window().conflicts_with(&window)
            }) {
                return Err(StoreError::Conflict {
                    entity: "crew member",
                    value: member.to_string(),
                });
            }
        }
        Ok(())
    }

    // Cascade deletion along foreign-key edges.

    fn drop_country(&mut self, id: Uuid) {
        let cities: Vec<Uuid> =
            self.cities.values().filter(|c| c.country_id == id).map(|c| c.id).collect();
        for city in cities {
            self.drop_city(city);
        }
        self.countries.remove(&id);
    }

    fn drop_city(&mut self, id: Uuid) {
        let airports: Vec<Uuid> =
            self.airports.values().filter(|a| a.city_id == id).map(|a| a.id).collect();
        for airport in airports {
            self.drop_airport(airport);
        }
        self.cities.remove(&id);
    }

    fn drop_airport(&mut self, id: Uuid) {
        let routes: Vec<Uuid> = self
            .routes
            .values()
            .filter(|r| r.source_id == id || r.destination_id == id)
            .map(|r| r.id)
            .collect();
        for route in routes {
            self.drop_route(route);
        }
        self.airports.remove(&id);
    }

    fn drop_route(&mut self, id: Uuid) {
        let flights: Vec<Uuid> =
            self.flights.values().filter(|f| f.route_id == id).map(|f| f.id).collect();
        for flight in flights {
            self.drop_flight(flight);
        }
        self.routes.remove(&id);
    }

    fn drop_airplane_type(&mut self, id: Uuid) {
        let airplanes: Vec<Uuid> = self
            .airplanes
            .values()
            .filter(|a| a.airplane_type_id == id)
            .map(|a| a.id)
            .collect();
        for airplane in airplanes {
            self.drop_airplane(airplane);
        }
        self.airplane_types.remove(&id);
    }

    fn drop_airplane(&mut self, id: Uuid) {
        let flights: Vec<Uuid> =
            self.flights.values().filter(|f| f.airplane_id == id).map(|f| f.id).collect();
        for flight in flights {
            self.drop_flight(flight);
        }
        self.airplanes.remove(&id);
    }

    fn drop_flight(&mut self, id: Uuid) {
        self.tickets.retain(|_, t| t.flight_id != id);
        self.flights.remove(&id);
    }

    fn drop_crew_member(&mut self, id: Uuid) {
        // only the assignment rows go; the flights themselves stay
        for flight in self.flights.values_mut() {
            flight.crew_member_ids.retain(|member| *member != id);
        }
        self.crew_members.remove(&id);
    }

    fn drop_seat_class(&mut self, id: Uuid) {
        self.tickets.retain(|_, t| t.seat_class_id != id);
        self.seat_classes.remove(&id);
    }

    fn drop_order(&mut self, id: Uuid) {
        self.tickets.retain(|_, t| t.order_id != id);
        self.orders.remove(&id);
    }
}

/// A store backed by process memory, for tests and embedding.
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { tables: RwLock::new(Tables::default()) }
    }

    async fn delete_cascading<F>(&self, id: Uuid, entity: &'static str, exists: F, drop: fn(&mut Tables, Uuid)) -> StoreResult<()>
    where
        F: FnOnce(&Tables) -> bool,
    {
        let mut tables = self.tables.write().await;
        if !exists(&tables) {
            return Err(StoreError::NotFound { entity, id });
        }
        drop(&mut tables, id);
        debug!(%id, entity, "row deleted with cascade");
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn create_country(&self, row: &Country) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_country_unique(row)?;
        insert_new(&mut tables.countries, row.id, row, "country")
    }

    async fn update_country(&self, row: &Country) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_country_unique(row)?;
        replace(&mut tables.countries, row.id, row, "country")
    }

    async fn delete_country(&self, id: Uuid) -> StoreResult<()> {
        self.delete_cascading(id, "country", |t| t.countries.contains_key(&id), Tables::drop_country)
            .await
    }

    async fn get_country(&self, id: Uuid) -> StoreResult<Option<Country>> {
        Ok(self.tables.read().await.countries.get(&id).cloned())
    }

    async fn create_city(&self, row: &City) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_city_unique(row)?;
        insert_new(&mut tables.cities, row.id, row, "city")
    }

    async fn update_city(&self, row: &City) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_city_unique(row)?;
        replace(&mut tables.cities, row.id, row, "city")
    }

    async fn delete_city(&self, id: Uuid) -> StoreResult<()> {
        self.delete_cascading(id, "city", |t| t.cities.contains_key(&id), Tables::drop_city).await
    }

    async fn get_city(&self, id: Uuid) -> StoreResult<Option<City>> {
        Ok(self.tables.read().await.cities.get(&id).cloned())
    }

    async fn create_airport(&self, row: &Airport) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_airport_unique(row)?;
        insert_new(&mut tables.airports, row.id, row, "airport")
    }

    async fn update_airport(&self, row: &Airport) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_airport_unique(row)?;
        replace(&mut tables.airports, row.id, row, "airport")
    }

    async fn delete_airport(&self, id: Uuid) -> StoreResult<()> {
        self.delete_cascading(id, "airport", |t| t.airports.contains_key(&id), Tables::drop_airport)
            .await
    }

    async fn get_airport(&self, id: Uuid) -> StoreResult<Option<Airport>> {
        Ok(self.tables.read().await.airports.get(&id).cloned())
    }

    async fn create_route(&self, row: &Route) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        insert_new(&mut tables.routes, row.id, row, "route")
    }

    async fn update_route(&self, row: &Route) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        replace(&mut tables.routes, row.id, row, "route")
    }

    async fn delete_route(&self, id: Uuid) -> StoreResult<()> {
        self.delete_cascading(id, "route", |t| t.routes.contains_key(&id), Tables::drop_route).await
    }

    async fn get_route(&self, id: Uuid) -> StoreResult<Option<Route>> {
        Ok(self.tables.read().await.routes.get(&id).cloned())
    }

    async fn create_airplane_type(&self, row: &AirplaneType) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_airplane_type_unique(row)?;
        insert_new(&mut tables.airplane_types, row.id, row, "airplane type")
    }

    async fn update_airplane_type(&self, row: &AirplaneType) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_airplane_type_unique(row)?;
        replace(&mut tables.airplane_types, row.id, row, "airplane type")
    }

    async fn delete_airplane_type(&self, id: Uuid) -> StoreResult<()> {
        self.delete_cascading(
            id,
            "airplane type",
            |t| t.airplane_types.contains_key(&id),
            Tables::drop_airplane_type,
        )
        .await
    }

    async fn get_airplane_type(&self, id: Uuid) -> StoreResult<Option<AirplaneType>> {
        Ok(self.tables.read().await.airplane_types.get(&id).cloned())
    }

    async fn create_airplane(&self, row: &Airplane) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_airplane_unique(row)?;
        insert_new(&mut tables.airplanes, row.id, row, "airplane")
    }

    async fn update_airplane(&self, row: &Airplane) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_airplane_unique(row)?;
        replace(&mut tables.airplanes, row.id, row, "airplane")
    }

    async fn delete_airplane(&self, id: Uuid) -> StoreResult<()> {
        self.delete_cascading(id, "airplane", |t| t.airplanes.contains_key(&id), Tables::drop_airplane)
            .await
    }

    async fn get_airplane(&self, id: Uuid) -> StoreResult<Option<Airplane>> {
        Ok(self.tables.read().await.airplanes.get(&id).cloned())
    }
}

#[async_trait]
impl FlightRepository for MemoryStore {
    async fn create_flight(&self, row: &Flight) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_flight_windows(row)?;
        insert_new(&mut tables.flights, row.id, row, "flight")
    }

    async fn update_flight(&self, row: &Flight) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_flight_windows(row)?;
        replace(&mut tables.flights, row.id, row, "flight")
    }

    async fn delete_flight(&self, id: Uuid) -> StoreResult<()> {
        self.delete_cascading(id, "flight", |t| t.flights.contains_key(&id), Tables::drop_flight)
            .await
    }

    async fn get_flight(&self, id: Uuid) -> StoreResult<Option<Flight>> {
        Ok(self.tables.read().await.flights.get(&id).cloned())
    }

    async fn flights_for_airplane(&self, airplane_id: Uuid, exclude: Uuid) -> StoreResult<Vec<Flight>> {
        let tables = self.tables.read().await;
        Ok(tables
            .flights
            .values()
            .filter(|f| f.airplane_id == airplane_id && f.id != exclude)
            .cloned()
            .collect())
    }

    async fn flights_for_crew_member(&self, member_id: Uuid, exclude: Uuid) -> StoreResult<Vec<Flight>> {
        let tables = self.tables.read().await;
        Ok(tables
            .flights
            .values()
            .filter(|f| f.id != exclude && f.crew_member_ids.contains(&member_id))
            .cloned()
            .collect())
    }

    async fn create_crew_member(&self, row: &CrewMember) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        insert_new(&mut tables.crew_members, row.id, row, "crew member")
    }

    async fn update_crew_member(&self, row: &CrewMember) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        replace(&mut tables.crew_members, row.id, row, "crew member")
    }

    async fn delete_crew_member(&self, id: Uuid) -> StoreResult<()> {
        self.delete_cascading(
            id,
            "crew member",
            |t| t.crew_members.contains_key(&id),
            Tables::drop_crew_member,
        )
        .await
    }

    async fn get_crew_member(&self, id: Uuid) -> StoreResult<Option<CrewMember>> {
        Ok(self.tables.read().await.crew_members.get(&id).cloned())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create_seat_class(&self, row: &SeatClass) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_seat_class_unique(row)?;
        insert_new(&mut tables.seat_classes, row.id, row, "seat class")
    }

    async fn update_seat_class(&self, row: &SeatClass) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_seat_class_unique(row)?;
        replace(&mut tables.seat_classes, row.id, row, "seat class")
    }

    async fn delete_seat_class(&self, id: Uuid) -> StoreResult<()> {
        self.delete_cascading(
            id,
            "seat class",
            |t| t.seat_classes.contains_key(&id),
            Tables::drop_seat_class,
        )
        .await
    }

    async fn get_seat_class(&self, id: Uuid) -> StoreResult<Option<SeatClass>> {
        Ok(self.tables.read().await.seat_classes.get(&id).cloned())
    }

    async fn list_seat_classes(&self) -> StoreResult<Vec<SeatClass>> {
        let tables = self.tables.read().await;
        let mut classes: Vec<SeatClass> = tables.seat_classes.values().cloned().collect();
        classes.sort_by_key(|class| class.priority);
        Ok(classes)
    }

    async fn create_order(&self, row: &Order) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        insert_new(&mut tables.orders, row.id, row, "order")
    }

    async fn delete_order(&self, id: Uuid) -> StoreResult<()> {
        self.delete_cascading(id, "order", |t| t.orders.contains_key(&id), Tables::drop_order).await
    }

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn list_orders_for_account(&self, user_id: AccountId) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        let mut orders: Vec<Order> =
            tables.orders.values().filter(|o| o.user_id == user_id).cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn create_ticket(&self, row: &Ticket) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_ticket_unique(row)?;
        insert_new(&mut tables.tickets, row.id, row, "ticket")
    }

    async fn update_ticket(&self, row: &Ticket) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_ticket_unique(row)?;
        replace(&mut tables.tickets, row.id, row, "ticket")
    }

    async fn delete_ticket(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.tickets.remove(&id).is_none() {
            return Err(StoreError::NotFound { entity: "ticket", id });
        }
        Ok(())
    }

    async fn get_ticket(&self, id: Uuid) -> StoreResult<Option<Ticket>> {
        Ok(self.tables.read().await.tickets.get(&id).cloned())
    }

    async fn list_tickets_for_order(&self, order_id: Uuid) -> StoreResult<Vec<Ticket>> {
        let tables = self.tables.read().await;
        Ok(tables.tickets.values().filter(|t| t.order_id == order_id).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_iso_code_rejected() {
        let store = MemoryStore::new();
        let poland = Country::new("Poland", "PL");
        store.create_country(&poland).await.unwrap();

        let other = Country::new("Palau", "PL");
        let err = store.create_country(&other).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { entity: "country", .. }));

        // updating the same row keeps its own code without tripping the check
        store.update_country(&poland).await.unwrap();
    }

    #[tokio::test]
    async fn test_deleting_country_cascades_to_airports() {
        let store = MemoryStore::new();
        let country = Country::new("Poland", "PL");
        store.create_country(&country).await.unwrap();
        let city = City::new("Warsaw", country.id, "Europe/Warsaw");
        store.create_city(&city).await.unwrap();
        let airport = Airport::new("Chopin", city.id, "WAW");
        store.create_airport(&airport).await.unwrap();

        store.delete_country(country.id).await.unwrap();
        assert!(store.get_city(city.id).await.unwrap().is_none());
        assert!(store.get_airport(airport.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_commit_rejects_overlapping_flights_for_airplane() {
        let store = MemoryStore::new();
        let airplane_id = Uuid::new_v4();
        let dep = chrono::Utc::now();

        let first = Flight::new(Uuid::new_v4(), airplane_id, dep, dep + chrono::Duration::hours(2));
        store.create_flight(&first).await.unwrap();

        // overlapping window, written straight through the repository as a
        // racing save would be after its validation reads went stale
        let second = Flight::new(
            Uuid::new_v4(),
            airplane_id,
            dep + chrono::Duration::hours(1),
            dep + chrono::Duration::hours(3),
        );
        let err = store.create_flight(&second).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { entity: "airplane", .. }));

        // re-writing the committed flight itself stays fine
        store.update_flight(&first).await.unwrap();
    }

    #[tokio::test]
    async fn test_commit_rejects_overlapping_flights_for_crew_member() {
        let store = MemoryStore::new();
        let member = CrewMember::new("Jan", "Kowalski");
        store.create_crew_member(&member).await.unwrap();
        let dep = chrono::Utc::now();

        let mut first =
            Flight::new(Uuid::new_v4(), Uuid::new_v4(), dep, dep + chrono::Duration::hours(2));
        first.crew_member_ids.push(member.id);
        store.create_flight(&first).await.unwrap();

        let mut second = Flight::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            dep + chrono::Duration::hours(1),
            dep + chrono::Duration::hours(3),
        );
        second.crew_member_ids.push(member.id);
        let err = store.create_flight(&second).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { entity: "crew member", .. }));
    }

    #[tokio::test]
    async fn test_deleting_crew_member_clears_rosters_but_keeps_flights() {
        let store = MemoryStore::new();
        let member = CrewMember::new("Jan", "Kowalski");
        store.create_crew_member(&member).await.unwrap();

        let mut flight = Flight::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            chrono::Utc::now(),
            chrono::Utc::now() + chrono::Duration::hours(2),
        );
        flight.crew_member_ids.push(member.id);
        store.create_flight(&flight).await.unwrap();

        store.delete_crew_member(member.id).await.unwrap();
        let flight = store.get_flight(flight.id).await.unwrap().unwrap();
        assert!(flight.crew_member_ids.is_empty());
    }
}
