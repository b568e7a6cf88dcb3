use crate::epidemic::settings::OutbreakSettings;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// Flight route planner and epidemic spread simulator
#[derive(Parser, Debug)]
#[command(name = "flightgraph", version)]
#[command(about = "Plan shortest flight routes and simulate disease spread", long_about = None)]
pub struct Cli {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LevelFilter,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive route planner (default)
    Plan,
    /// Shortest path over flights given on the command line
    Route(RouteArgs),
    /// Disease spread over a random regular contact graph
    Epidemic(EpidemicArgs),
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Flight as SRC,DST,DURATION; repeat for more flights
    #[arg(short, long = "flight", value_name = "SRC,DST,DURATION", allow_hyphen_values = true)]
    pub flights: Vec<String>,

    /// Departure airport
    #[arg(long)]
    pub from: String,

    /// Arrival airport
    #[arg(long)]
    pub to: String,

    /// Also print the distance to every airport
    #[arg(long)]
    pub distances: bool,
}

#[derive(Args, Debug)]
pub struct EpidemicArgs {
    /// Number of people in the contact graph
    #[arg(short, long)]
    pub nodes: usize,

    /// Contacts per person
    #[arg(short, long)]
    pub degree: usize,

    /// Spread rounds to simulate
    #[arg(short, long)]
    pub iterations: usize,

    /// Chance that an infected person infects a healthy contact in one round
    #[arg(short, long, default_value_t = 0.5)]
    pub transmission: f64,

    /// RNG seed, random when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Open the step-by-step view instead of printing a report
    #[arg(long)]
    pub show: bool,
}

impl EpidemicArgs {
    pub fn settings(&self) -> OutbreakSettings {
        OutbreakSettings {
            nodes: self.nodes,
            degree: self.degree,
            iterations: self.iterations,
            transmission: self.transmission,
        }
    }
}
