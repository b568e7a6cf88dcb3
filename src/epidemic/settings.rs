use crate::epidemic::generator::random_regular;
use crate::epidemic::outbreak::Outbreak;
use crate::error::EpidemicError;
use log::info;
use rand::Rng;

/// Parameters shared by the scripted run and the interactive view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutbreakSettings {
    pub nodes: usize,
    pub degree: usize,
    pub iterations: usize,
    pub transmission: f64,
}

impl OutbreakSettings {
    pub fn validate(&self) -> Result<(), EpidemicError> {
        if (0.0..=1.0).contains(&self.transmission) {
            Ok(())
        } else {
            Err(EpidemicError::InvalidProbability(self.transmission))
        }
    }

    /// Generate, reduce to a spanning tree, infect one node and simulate.
    /// Returns the text printed by the `epidemic` command.
    pub fn report<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, EpidemicError> {
        self.validate()?;
        let graph = random_regular(self.nodes, self.degree, rng)?;
        info!(
            "contact graph ready: {} nodes, {} edges, {} component(s)",
            graph.node_count(),
            graph.edge_count(),
            graph.component_count()
        );

        let tree = graph.spanning_tree();
        info!("spanning tree keeps {} edges", tree.edge_count());

        let mut outbreak = Outbreak::new(tree);
        let mut report = String::new();
        if let Some(id) = outbreak.infect_random(rng) {
            report += &format!("Patient zero: node {}\n", id.index());
        }

        let counts = outbreak.simulate(self.iterations, self.transmission, rng)?;
        counts.iter().enumerate().for_each(|(round, infected)| {
            report += &format!("Round {:>3}: {} infected\n", round + 1, infected);
        });

        report += &format!("Healthy nodes: {}\n", outbreak.healthy_count());
        report += &format!("Infected nodes: {}\n", outbreak.infected_count());
        Ok(report)
    }
}
