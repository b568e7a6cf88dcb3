use crate::graph::airport::{Airport, AirportId};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distance {
    Reachable(f64),
    Unreachable,
}

impl Distance {
    fn from_raw(raw: f64) -> Self {
        if raw.is_finite() {
            Distance::Reachable(raw)
        } else {
            Distance::Unreachable
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Distance::Reachable(d) => Some(d),
            Distance::Unreachable => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Reachable(d) => write!(f, "{}", d),
            Distance::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Shortest travel times from one source, produced fresh by every computation.
///
/// Rows follow the graph's airport order. A source the graph has never seen
/// gets an extra trailing row at distance zero.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceTable {
    source: Airport,
    airports: Vec<Airport>,
    /// f64::INFINITY marks unreachable
    distances: Vec<f64>,
}

impl DistanceTable {
    pub(crate) fn new(source: Airport, airports: Vec<Airport>, distances: Vec<f64>) -> Self {
        Self {
            source,
            airports,
            distances,
        }
    }

    pub fn source(&self) -> &Airport {
        &self.source
    }

    pub fn get(&self, name: &str) -> Option<Distance> {
        self.airports
            .iter()
            .position(|a| a.name() == name)
            .map(|i| Distance::from_raw(self.distances[i]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Airport, Distance)> {
        self.airports
            .iter()
            .zip(self.distances.iter())
            .map(|(a, d)| (a, Distance::from_raw(*d)))
    }

    /// Raw value for a graph airport, infinite when unreachable.
    pub(crate) fn raw(&self, id: AirportId) -> f64 {
        self.distances[id.index()]
    }
}
