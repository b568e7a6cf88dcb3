use crate::epidemic::contact::{ContactGraph, NodeId};
use crate::error::EpidemicError;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Health {
    Healthy,
    Infected,
}

pub struct Outbreak {
    graph: ContactGraph,
    states: Vec<Health>,
}

impl Outbreak {
    pub fn new(graph: ContactGraph) -> Self {
        let states = vec![Health::Healthy; graph.node_count()];
        Self { graph, states }
    }

    pub fn graph(&self) -> &ContactGraph {
        &self.graph
    }

    pub fn state(&self, id: NodeId) -> Health {
        self.states[id.index()]
    }

    pub fn infect(&mut self, id: NodeId) {
        self.states[id.index()] = Health::Infected;
    }

    /// Infects one healthy node chosen uniformly, `None` once nobody is left.
    pub fn infect_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<NodeId> {
        let healthy = self.nodes_in(Health::Healthy);
        let chosen = healthy.choose(rng).copied()?;
        self.infect(chosen);
        Some(chosen)
    }

    /// Runs `iterations` rounds and returns the infected count seen at the
    /// start of each round.
    pub fn simulate<R: Rng + ?Sized>(
        &mut self,
        iterations: usize,
        transmission: f64,
        rng: &mut R,
    ) -> Result<Vec<usize>, EpidemicError> {
        if !(0.0..=1.0).contains(&transmission) {
            return Err(EpidemicError::InvalidProbability(transmission));
        }
        Ok((0..iterations)
            .map(|round| {
                let infected = self.infected_count();
                self.step(transmission, rng);
                debug!(
                    "round {}: {} -> {} infected",
                    round + 1,
                    infected,
                    self.infected_count()
                );
                infected
            })
            .collect())
    }

    /// Only nodes infected before the round starts get to transmit.
    fn step<R: Rng + ?Sized>(&mut self, transmission: f64, rng: &mut R) {
        self.nodes_in(Health::Infected).iter().for_each(|id| {
            let exposed = self
                .graph
                .neighbors(*id)
                .filter(|n| self.states[n.index()] == Health::Healthy)
                .collect::<Vec<NodeId>>();
            exposed.iter().for_each(|n| {
                if rng.r#gen::<f64>() < transmission {
                    self.states[n.index()] = Health::Infected;
                }
            });
        });
    }

    fn nodes_in(&self, health: Health) -> Vec<NodeId> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == health)
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    pub fn healthy_count(&self) -> usize {
        self.states.iter().filter(|s| **s == Health::Healthy).count()
    }

    pub fn infected_count(&self) -> usize {
        self.states.iter().filter(|s| **s == Health::Infected).count()
    }
}
