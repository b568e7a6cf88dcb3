use crate::graph::airport::{Airport, AirportId};
use crate::graph::flight::{Flight, FlightId};
use std::collections::HashMap;

/// Directed flight network. Airports only enter the graph as flight endpoints.
#[derive(Clone, Debug, Default)]
pub struct RouteGraph {
    airports: Vec<Airport>,
    flights: Vec<Flight>,
    index: HashMap<Airport, AirportId>,
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_flight(
        &mut self,
        source: impl Into<Airport>,
        destination: impl Into<Airport>,
        duration: f64,
    ) -> FlightId {
        let from = self.intern(source.into());
        let to = self.intern(destination.into());
        let id = FlightId(self.flights.len());
        self.flights.push(Flight::new(id, from, to, duration));
        id
    }

    fn intern(&mut self, airport: Airport) -> AirportId {
        if let Some(id) = self.index.get(&airport) {
            return *id;
        }
        let id = AirportId(self.airports.len());
        self.index.insert(airport.clone(), id);
        self.airports.push(airport);
        id
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn airport(&self, id: AirportId) -> &Airport {
        &self.airports[id.index()]
    }

    pub fn flight(&self, id: FlightId) -> &Flight {
        &self.flights[id.index()]
    }

    pub fn airport_id(&self, name: &str) -> Option<AirportId> {
        self.index.get(&Airport::new(name)).copied()
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}
