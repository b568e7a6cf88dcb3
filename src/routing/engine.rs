use crate::error::RouteError;
use crate::graph::airport::{Airport, AirportId};
use crate::graph::flight::{Flight, FlightId};
use crate::graph::graph::RouteGraph;
use crate::routing::distances::DistanceTable;
use log::{debug, warn};

/// Stateless shortest-path queries over a borrowed graph. Every call recomputes
/// from the graph as it is now.
pub struct ShortestPathEngine<'a> {
    graph: &'a RouteGraph,
}

impl<'a> ShortestPathEngine<'a> {
    pub fn new(graph: &'a RouteGraph) -> Self {
        Self { graph }
    }

    /// Bellman-Ford from `source`.
    ///
    /// Runs exactly `|airports| - 1` full passes over the flights, then one
    /// more pass to look for a negative cycle reachable from `source`. An
    /// unknown `source` is not an error: the table then holds every airport as
    /// unreachable and the source itself at zero.
    pub fn shortest_distances(&self, source: &str) -> Result<DistanceTable, RouteError> {
        let mut dist = vec![f64::INFINITY; self.graph.airport_count()];
        let mut airports = self.graph.airports().to_vec();

        match self.graph.airport_id(source) {
            Some(id) => dist[id.index()] = 0.0,
            None => {
                debug!("source {} has no flights, nothing is reachable", source);
                airports.push(Airport::new(source));
                dist.push(0.0);
                return Ok(DistanceTable::new(Airport::new(source), airports, dist));
            }
        }

        let rounds = self.graph.airport_count().saturating_sub(1);
        for round in 0..rounds {
            let mut relaxed = 0usize;
            self.graph.flights().iter().for_each(|f| {
                if let Some(candidate) = relaxed_distance(&dist, f) {
                    dist[f.destination().index()] = candidate;
                    relaxed += 1;
                }
            });
            debug!("round {}/{}: {} relaxations", round + 1, rounds, relaxed);
        }

        if let Some(flight) = self
            .graph
            .flights()
            .iter()
            .find(|f| relaxed_distance(&dist, f).is_some())
        {
            warn!(
                "negative cycle reachable from {} (flight {} -> {} still relaxes)",
                source,
                self.graph.airport(flight.source()),
                self.graph.airport(flight.destination())
            );
            return Err(RouteError::NegativeCycleDetected {
                origin: source.to_string(),
            });
        }

        Ok(DistanceTable::new(Airport::new(source), airports, dist))
    }

    /// Shortest route from `source` to `destination`, or an empty vec when
    /// there is none.
    pub fn shortest_path(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<Airport>, RouteError> {
        let table = self.shortest_distances(source)?;
        Ok(self.reconstruct(&table, destination))
    }

    /// Rebuilds the route to `destination` backwards over a table computed by
    /// this engine.
    ///
    /// At each step the predecessor is the first flight, in insertion order,
    /// whose source distance plus duration equals the current airport's
    /// distance. An airport is never entered twice; when a step runs out of
    /// candidates the walk backs up and tries the next flight of the previous
    /// step.
    pub fn reconstruct(&self, table: &DistanceTable, destination: &str) -> Vec<Airport> {
        let source = table.source().name();
        if source == destination {
            return vec![table.source().clone()];
        }

        let (Some(from), Some(to)) = (
            self.graph.airport_id(source),
            self.graph.airport_id(destination),
        ) else {
            return Vec::new();
        };

        if !table.raw(to).is_finite() {
            debug!("{} is unreachable from {}", destination, source);
            return Vec::new();
        }

        let mut visited = vec![false; self.graph.airport_count()];
        visited[to.index()] = true;
        // (airport, index of the next flight to try into it)
        let mut stack = vec![(to, 0usize)];

        loop {
            let Some((current, cursor)) = stack.last().copied() else {
                debug!("no route back from {} to {}", destination, source);
                return Vec::new();
            };
            if current == from {
                break;
            }
            match self.next_predecessor(table, current, cursor, &visited) {
                Some(id) => {
                    if let Some(top) = stack.last_mut() {
                        top.1 = id.index() + 1;
                    }
                    let prev = self.graph.flight(id).source();
                    visited[prev.index()] = true;
                    stack.push((prev, 0));
                }
                None => {
                    debug!("dead end at {}", self.graph.airport(current));
                    stack.pop();
                }
            }
        }

        stack
            .iter()
            .rev()
            .map(|(id, _)| self.graph.airport(*id).clone())
            .collect()
    }

    fn next_predecessor(
        &self,
        table: &DistanceTable,
        current: AirportId,
        cursor: usize,
        visited: &[bool],
    ) -> Option<FlightId> {
        let target = table.raw(current);
        self.graph.flights()[cursor..]
            .iter()
            .filter(|f| f.destination() == current && !visited[f.source().index()])
            .find(|f| {
                let from = table.raw(f.source());
                from.is_finite() && from + f.duration() == target
            })
            .map(|f| f.id())
    }
}

fn relaxed_distance(dist: &[f64], flight: &Flight) -> Option<f64> {
    let from = dist[flight.source().index()];
    if !from.is_finite() {
        return None;
    }
    let candidate = from + flight.duration();
    (candidate < dist[flight.destination().index()]).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::distances::Distance;
    use approx::assert_relative_eq;
    use petgraph::algo;
    use petgraph::graph::{DiGraph, NodeIndex};
    use petgraph::visit::EdgeRef;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use std::collections::HashMap;

    fn names(path: &[Airport]) -> Vec<&str> {
        path.iter().map(|a| a.name()).collect()
    }

    fn reachable(table: &DistanceTable, name: &str) -> f64 {
        table
            .get(name)
            .and_then(|d| d.value())
            .unwrap_or_else(|| panic!("{} should be reachable", name))
    }

    fn random_graph(rng: &mut StdRng, airports: usize, flights: usize) -> RouteGraph {
        let mut graph = RouteGraph::new();
        for _ in 0..flights {
            let from = rng.gen_range(0..airports);
            let to = rng.gen_range(0..airports);
            let duration = rng.gen_range(1..50) as f64;
            graph.add_flight(format!("P{}", from), format!("P{}", to), duration);
        }
        graph
    }

    fn dijkstra(graph: &RouteGraph, source: AirportId) -> HashMap<NodeIndex, f64> {
        let mut network = DiGraph::<(), f64>::new();
        graph.airports().iter().for_each(|_| {
            network.add_node(());
        });
        graph.flights().iter().for_each(|f| {
            network.add_edge(
                NodeIndex::new(f.source().index()),
                NodeIndex::new(f.destination().index()),
                f.duration(),
            );
        });
        algo::dijkstra(&network, NodeIndex::new(source.index()), None, |e| *e.weight())
            .into_iter()
            .collect()
    }

    #[test]
    fn test_layover_beats_direct_flight() {
        let mut graph = RouteGraph::new();
        graph.add_flight("A", "B", 5.0);
        graph.add_flight("B", "C", 5.0);
        graph.add_flight("A", "C", 20.0);
        let engine = ShortestPathEngine::new(&graph);

        let table = engine.shortest_distances("A").unwrap();
        assert_relative_eq!(0.0, reachable(&table, "A"));
        assert_relative_eq!(5.0, reachable(&table, "B"));
        assert_relative_eq!(10.0, reachable(&table, "C"));

        let path = engine.shortest_path("A", "C").unwrap();
        assert_eq!(vec!["A", "B", "C"], names(&path));
    }

    #[test]
    fn test_against_direction_yields_empty_path() {
        let mut graph = RouteGraph::new();
        graph.add_flight("A", "B", 10.0);
        let engine = ShortestPathEngine::new(&graph);

        assert!(engine.shortest_path("B", "A").unwrap().is_empty());
        let table = engine.shortest_distances("B").unwrap();
        assert_eq!(Some(Distance::Unreachable), table.get("A"));
    }

    #[test_log::test]
    fn test_reachable_negative_cycle_is_detected() {
        let mut graph = RouteGraph::new();
        graph.add_flight("A", "B", 1.0);
        graph.add_flight("B", "C", 1.0);
        graph.add_flight("C", "A", -3.0);
        let engine = ShortestPathEngine::new(&graph);

        assert_eq!(
            Err(RouteError::NegativeCycleDetected {
                origin: "A".to_string()
            }),
            engine.shortest_distances("A")
        );
        assert!(matches!(
            engine.shortest_path("A", "C"),
            Err(RouteError::NegativeCycleDetected { .. })
        ));
    }

    #[test]
    fn test_unreachable_negative_cycle_is_ignored() {
        let mut graph = RouteGraph::new();
        graph.add_flight("X", "Y", 1.0);
        graph.add_flight("Y", "X", -5.0);
        graph.add_flight("A", "B", 2.0);
        let engine = ShortestPathEngine::new(&graph);

        let table = engine.shortest_distances("A").unwrap();
        assert_relative_eq!(2.0, reachable(&table, "B"));
        assert_eq!(Some(Distance::Unreachable), table.get("X"));
    }

    #[test]
    fn test_long_positive_cycle_is_not_negative() {
        let mut graph = RouteGraph::new();
        for i in 0..12 {
            graph.add_flight(format!("R{}", i), format!("R{}", (i + 1) % 12), 1.0);
        }
        let engine = ShortestPathEngine::new(&graph);

        let table = engine.shortest_distances("R0").unwrap();
        assert_relative_eq!(11.0, reachable(&table, "R11"));
    }

    #[test]
    fn test_negative_edges_without_cycle() {
        let mut graph = RouteGraph::new();
        graph.add_flight("A", "B", 4.0);
        graph.add_flight("A", "C", 2.0);
        graph.add_flight("B", "C", -3.0);
        let engine = ShortestPathEngine::new(&graph);

        let table = engine.shortest_distances("A").unwrap();
        assert_relative_eq!(1.0, reachable(&table, "C"));
        assert_eq!(
            vec!["A", "B", "C"],
            names(&engine.shortest_path("A", "C").unwrap())
        );
    }

    #[test]
    fn test_tied_parallel_flights_use_first_inserted() {
        let mut graph = RouteGraph::new();
        graph.add_flight("A", "B", 4.0);
        graph.add_flight("A", "B", 4.0);
        graph.add_flight("B", "C", 1.0);
        let engine = ShortestPathEngine::new(&graph);

        let table = engine.shortest_distances("A").unwrap();
        let b = graph.airport_id("B").unwrap();
        let visited = vec![false; graph.airport_count()];
        assert_eq!(
            Some(FlightId(0)),
            engine.next_predecessor(&table, b, 0, &visited)
        );
        assert_eq!(
            Some(FlightId(1)),
            engine.next_predecessor(&table, b, 1, &visited)
        );
        assert_eq!(
            vec!["A", "B", "C"],
            names(&engine.shortest_path("A", "C").unwrap())
        );
    }

    #[test]
    fn test_tied_routes_follow_insertion_order() {
        let mut graph = RouteGraph::new();
        graph.add_flight("A", "X", 2.0);
        graph.add_flight("A", "Y", 1.0);
        graph.add_flight("Y", "D", 3.0);
        graph.add_flight("X", "D", 2.0);
        let engine = ShortestPathEngine::new(&graph);

        assert_eq!(
            vec!["A", "Y", "D"],
            names(&engine.shortest_path("A", "D").unwrap())
        );
    }

    #[test]
    fn test_path_to_self_is_single_airport() {
        let mut graph = RouteGraph::new();
        graph.add_flight("A", "B", 3.0);
        graph.add_flight("B", "A", 3.0);
        let engine = ShortestPathEngine::new(&graph);

        assert_eq!(vec!["A"], names(&engine.shortest_path("A", "A").unwrap()));
        assert_eq!(vec!["Z"], names(&engine.shortest_path("Z", "Z").unwrap()));
    }

    #[test]
    fn test_unknown_source_leaves_everything_unreachable() {
        let mut graph = RouteGraph::new();
        graph.add_flight("A", "B", 3.0);
        let engine = ShortestPathEngine::new(&graph);

        let table = engine.shortest_distances("Q").unwrap();
        assert_eq!(3, table.iter().count());
        assert_eq!(Some(Distance::Reachable(0.0)), table.get("Q"));
        assert_eq!(Some(Distance::Unreachable), table.get("A"));
        assert_eq!(Some(Distance::Unreachable), table.get("B"));
        assert!(engine.shortest_path("Q", "B").unwrap().is_empty());
        assert!(engine.shortest_path("A", "Q").unwrap().is_empty());
    }

    #[test]
    fn test_zero_duration_cycle_does_not_loop() {
        let mut graph = RouteGraph::new();
        graph.add_flight("B", "C", 0.0);
        graph.add_flight("C", "B", 0.0);
        graph.add_flight("A", "B", 1.0);
        let engine = ShortestPathEngine::new(&graph);

        assert_eq!(
            vec!["A", "B"],
            names(&engine.shortest_path("A", "B").unwrap())
        );
        assert_eq!(
            vec!["A", "B", "C"],
            names(&engine.shortest_path("A", "C").unwrap())
        );
    }

    #[test]
    fn test_reconstruct_reuses_one_table() {
        let mut graph = RouteGraph::new();
        graph.add_flight("A", "B", 2.0);
        graph.add_flight("B", "C", 2.0);
        graph.add_flight("D", "C", 1.0);
        let engine = ShortestPathEngine::new(&graph);
        let table = engine.shortest_distances("A").unwrap();

        assert_eq!(vec!["A", "B"], names(&engine.reconstruct(&table, "B")));
        assert_eq!(vec!["A", "B", "C"], names(&engine.reconstruct(&table, "C")));
        assert_eq!(vec!["A"], names(&engine.reconstruct(&table, "A")));
        assert!(engine.reconstruct(&table, "D").is_empty());
        assert!(engine.reconstruct(&table, "Nowhere").is_empty());
    }

    #[test]
    fn test_matches_dijkstra_on_positive_graphs() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let graph = random_graph(&mut rng, 8, 20);
            let engine = ShortestPathEngine::new(&graph);
            let source = graph.airports()[0].clone();

            let table = engine.shortest_distances(source.name()).unwrap();
            let expected = dijkstra(&graph, graph.airport_id(source.name()).unwrap());

            graph.airports().iter().enumerate().for_each(|(i, a)| {
                match (table.get(a.name()).unwrap(), expected.get(&NodeIndex::new(i))) {
                    (Distance::Reachable(d), Some(e)) => assert_relative_eq!(*e, d),
                    (Distance::Unreachable, None) => {}
                    (got, want) => panic!("{}: {} vs {:?}", a, got, want),
                }
            });
        }
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let mut rng = StdRng::seed_from_u64(11);
        let graph = random_graph(&mut rng, 6, 15);
        let engine = ShortestPathEngine::new(&graph);
        let source = graph.airports()[0].name();

        assert_eq!(
            engine.shortest_distances(source).unwrap(),
            engine.shortest_distances(source).unwrap()
        );
    }

    #[test]
    fn test_adding_flights_never_increases_distances() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut graph = random_graph(&mut rng, 7, 10);
        let source = graph.airports()[0].name().to_string();

        for _ in 0..15 {
            let before = ShortestPathEngine::new(&graph)
                .shortest_distances(&source)
                .unwrap();

            let from = rng.gen_range(0..graph.airport_count());
            let to = rng.gen_range(0..graph.airport_count());
            let from = graph.airports()[from].clone();
            let to = graph.airports()[to].clone();
            graph.add_flight(from, to, rng.gen_range(1..30) as f64);

            let after = ShortestPathEngine::new(&graph)
                .shortest_distances(&source)
                .unwrap();
            before.iter().for_each(|(airport, old)| {
                let new = after.get(airport.name()).unwrap();
                if let Distance::Reachable(old) = old {
                    let new = new.value().expect("reachable airports stay reachable");
                    assert!(new <= old);
                }
            });
        }
    }
}
