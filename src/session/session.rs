use crate::error::{InputError, RouteError};
use crate::graph::airport::Airport;
use crate::graph::flight::FlightId;
use crate::graph::graph::RouteGraph;
use crate::routing::distances::{Distance, DistanceTable};
use crate::routing::engine::ShortestPathEngine;
use log::info;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum PathOutcome {
    Found(Vec<Airport>),
    NoPath,
    NegativeCycle(RouteError),
}

impl PathOutcome {
    pub fn path(&self) -> Option<&[Airport]> {
        match self {
            PathOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for PathOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathOutcome::Found(path) => write!(f, "Shortest Path: {}", render_path(path)),
            PathOutcome::NoPath => f.write_str("No path found between the specified airports."),
            PathOutcome::NegativeCycle(RouteError::NegativeCycleDetected { origin }) => {
                write!(f, "Negative cycle detected, reachable from {}.", origin)
            }
        }
    }
}

impl From<Vec<Airport>> for PathOutcome {
    fn from(path: Vec<Airport>) -> Self {
        if path.is_empty() {
            PathOutcome::NoPath
        } else {
            PathOutcome::Found(path)
        }
    }
}

impl From<Result<Vec<Airport>, RouteError>> for PathOutcome {
    fn from(result: Result<Vec<Airport>, RouteError>) -> Self {
        match result {
            Ok(path) => path.into(),
            Err(e) => PathOutcome::NegativeCycle(e),
        }
    }
}

pub fn render_path(path: &[Airport]) -> String {
    path.iter()
        .map(|a| a.name())
        .collect::<Vec<&str>>()
        .join(" -> ")
}

/// One planning session. Owns the flight network that the front ends read and
/// extend; nothing about it outlives the process.
#[derive(Default)]
pub struct FlightSession {
    graph: RouteGraph,
}

impl FlightSession {
    pub fn new() -> Self {
        Self {
            graph: RouteGraph::new(),
        }
    }

    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    pub fn add_flight(&mut self, source: &str, destination: &str, duration: f64) -> FlightId {
        let id = self.graph.add_flight(source, destination, duration);
        info!(
            "flight {} added: {} -> {} ({})",
            id.index(),
            source,
            destination,
            duration
        );
        id
    }

    /// Validates raw form fields before they reach the graph.
    pub fn add_flight_from_input(
        &mut self,
        source: &str,
        destination: &str,
        duration: &str,
    ) -> Result<FlightId, InputError> {
        let source = required(source, "source airport")?;
        let destination = required(destination, "destination airport")?;
        let duration = parse_duration(required(duration, "flight duration")?)?;
        Ok(self.add_flight(source, destination, duration))
    }

    /// Parses a `SRC,DST,DURATION` triple as given on the command line.
    pub fn add_flight_from_triple(&mut self, triple: &str) -> Result<FlightId, InputError> {
        let parts = triple.split(',').collect::<Vec<&str>>();
        match parts.as_slice() {
            [source, destination, duration] => {
                self.add_flight_from_input(source, destination, duration)
            }
            _ => Err(InputError::MalformedFlight(triple.to_string())),
        }
    }

    /// Text block listing every flight, `None` while the session has none.
    pub fn flight_listing(&self) -> Option<String> {
        if self.graph.is_empty() {
            return None;
        }
        let mut message = String::from("Flight Details:\n\n");
        self.graph.flights().iter().for_each(|f| {
            message += &format!("Source: {}\n", self.graph.airport(f.source()));
            message += &format!("Destination: {}\n", self.graph.airport(f.destination()));
            message += &format!("Duration: {}\n", f.duration());
            message += "\n";
        });
        Some(message)
    }

    pub fn shortest_path(&self, source: &str, destination: &str) -> PathOutcome {
        ShortestPathEngine::new(&self.graph)
            .shortest_path(source.trim(), destination.trim())
            .into()
    }

    /// Text printed by the `route` command. Distances are computed once and
    /// shared by the optional travel-time table and the path.
    pub fn route_report(
        &self,
        source: &str,
        destination: &str,
        with_distances: bool,
    ) -> Result<String, RouteError> {
        let (source, destination) = (source.trim(), destination.trim());
        let engine = ShortestPathEngine::new(&self.graph);
        let table = engine.shortest_distances(source)?;

        let mut report = String::new();
        if with_distances {
            report += &render_distances(&table);
        }
        let outcome = PathOutcome::from(engine.reconstruct(&table, destination));
        report += &format!("{}\n", outcome);
        if let Some(total) = outcome
            .path()
            .and_then(|_| table.get(destination))
            .and_then(Distance::value)
        {
            report += &format!("Total duration: {}\n", total);
        }
        Ok(report)
    }
}

fn render_distances(table: &DistanceTable) -> String {
    let mut text = format!("Travel times from {}:\n", table.source());
    table.iter().for_each(|(airport, distance)| {
        text += &format!("  {:<16} {}\n", airport.name(), distance);
    });
    text.push('\n');
    text
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, InputError> {
    let value = value.trim();
    if value.is_empty() {
        Err(InputError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn parse_duration(text: &str) -> Result<f64, InputError> {
    text.parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .ok_or_else(|| InputError::InvalidDuration(text.to_string()))
}
