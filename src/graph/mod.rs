pub mod airport;
pub mod flight;
pub mod graph;
