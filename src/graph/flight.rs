use crate::graph::airport::AirportId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlightId(pub usize);

impl FlightId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Flight {
    id: FlightId,
    source: AirportId,
    destination: AirportId,
    /// any sign, negative values are accepted
    duration: f64,
}

impl Flight {
    pub fn new(id: FlightId, source: AirportId, destination: AirportId, duration: f64) -> Self {
        Self {
            id,
            source,
            destination,
            duration,
        }
    }

    pub fn id(&self) -> FlightId {
        self.id
    }

    pub fn source(&self) -> AirportId {
        self.source
    }

    pub fn destination(&self) -> AirportId {
        self.destination
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}
