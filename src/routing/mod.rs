pub mod distances;
pub mod engine;
