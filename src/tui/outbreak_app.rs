use crate::epidemic::contact::ContactGraph;
use crate::epidemic::generator::random_regular;
use crate::epidemic::outbreak::Outbreak;
use crate::epidemic::settings::OutbreakSettings;
use crate::tui::app::{Status, StatusKind};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;

/// Step-by-step epidemic screen: build the contact graph, reduce it to a
/// spanning tree, seed an infection and let it spread while the canvas shows
/// who is sick.
pub struct OutbreakApp {
    pub running: bool,
    settings: OutbreakSettings,
    rng: StdRng,
    graph: Option<ContactGraph>,
    outbreak: Option<Outbreak>,
    counts: Vec<usize>,
    status: Option<Status>,
}

impl OutbreakApp {
    pub fn new(settings: OutbreakSettings, rng: StdRng) -> Self {
        Self {
            running: true,
            settings,
            rng,
            graph: None,
            outbreak: None,
            counts: Vec::new(),
            status: None,
        }
    }

    pub fn settings(&self) -> &OutbreakSettings {
        &self.settings
    }

    pub fn graph(&self) -> Option<&ContactGraph> {
        self.graph.as_ref()
    }

    pub fn outbreak(&self) -> Option<&Outbreak> {
        self.outbreak.as_ref()
    }

    /// Infected count at the start of every simulated round so far.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false
            }
            KeyCode::Char('g') => self.initialize_graph(),
            KeyCode::Char('t') => self.create_spanning_tree(),
            KeyCode::Char('i') => self.infect_node(),
            KeyCode::Char('s') => self.simulate(self.settings.iterations),
            KeyCode::Char('n') => self.simulate(1),
            _ => {}
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            kind,
            text: text.into(),
        });
    }

    /// A new graph discards the tree and infections built on the old one.
    fn initialize_graph(&mut self) {
        match random_regular(self.settings.nodes, self.settings.degree, &mut self.rng) {
            Ok(graph) => {
                self.graph = Some(graph);
                self.outbreak = None;
                self.counts.clear();
                self.set_status(StatusKind::Info, "Graph has been initialized.");
            }
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }

    fn create_spanning_tree(&mut self) {
        let Some(graph) = &self.graph else {
            self.set_status(StatusKind::Warning, "Please initialize the graph first.");
            return;
        };
        self.outbreak = Some(Outbreak::new(graph.spanning_tree()));
        self.counts.clear();
        self.set_status(StatusKind::Info, "A spanning tree has been created.");
    }

    fn infect_node(&mut self) {
        let Some(outbreak) = &mut self.outbreak else {
            self.set_status(StatusKind::Warning, "Please create a spanning tree first.");
            return;
        };
        match outbreak.infect_random(&mut self.rng) {
            Some(id) => {
                let text = format!("Node {} has been infected.", id.index());
                self.set_status(StatusKind::Info, text);
            }
            None => self.set_status(StatusKind::Warning, "Every node is already infected."),
        }
    }

    fn simulate(&mut self, iterations: usize) {
        let Some(outbreak) = &mut self.outbreak else {
            self.set_status(StatusKind::Warning, "Please create a spanning tree first.");
            return;
        };
        match outbreak.simulate(iterations, self.settings.transmission, &mut self.rng) {
            Ok(counts) => {
                self.counts.extend(counts);
                let text = format!(
                    "Disease spread simulated for {} iteration(s): {} healthy, {} infected.",
                    iterations,
                    outbreak.healthy_count(),
                    outbreak.infected_count()
                );
                self.set_status(StatusKind::Info, text);
            }
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }
}
