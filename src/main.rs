use crate::cli::{Cli, Command, EpidemicArgs, RouteArgs};
use crate::session::session::{FlightSession, PathOutcome};
use crate::tui::app::App;
use crate::tui::outbreak_app::OutbreakApp;
use clap::Parser;
use log::{LevelFilter, info};
use rand::{SeedableRng, rngs::StdRng};
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::Path;

mod cli;
mod epidemic;
mod error;
mod graph;
mod layout;
mod routing;
mod session;
mod tui;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let interactive = match &cli.command {
        None | Some(Command::Plan) => true,
        Some(Command::Epidemic(args)) => args.show,
        Some(Command::Route(_)) => false,
    };
    init_logging(cli.log_level, cli.log_file.as_deref(), interactive)?;

    match cli.command {
        None | Some(Command::Plan) => tui::run(App::new(FlightSession::new())),
        Some(Command::Route(args)) => run_route(&args),
        Some(Command::Epidemic(args)) => run_epidemic(&args),
    }
}

/// Full-screen views own the terminal, so without a log file they run with
/// logging off.
fn init_logging(level: LevelFilter, file: Option<&Path>, interactive: bool) -> io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    match file {
        Some(path) => {
            builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
        }
        None if interactive => return Ok(()),
        None => {}
    }
    builder.init();
    Ok(())
}

fn report<E: Error + Send + Sync + 'static>(e: E) -> io::Error {
    eprintln!("error: {}", e);
    io::Error::other(e)
}

fn run_route(args: &RouteArgs) -> io::Result<()> {
    let mut session = FlightSession::new();
    for triple in &args.flights {
        session.add_flight_from_triple(triple).map_err(report)?;
    }
    info!(
        "{} flights between {} airports",
        session.graph().flight_count(),
        session.graph().airport_count()
    );

    match session.route_report(&args.from, &args.to, args.distances) {
        Ok(text) => {
            print!("{}", text);
            Ok(())
        }
        Err(e) => {
            println!("{}", PathOutcome::NegativeCycle(e.clone()));
            Err(io::Error::other(e))
        }
    }
}

fn run_epidemic(args: &EpidemicArgs) -> io::Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let settings = args.settings();
    settings.validate().map_err(report)?;

    if args.show {
        return tui::run(OutbreakApp::new(settings, rng));
    }
    print!("{}", settings.report(&mut rng).map_err(report)?);
    Ok(())
}
