//! `lift`: plan a lift journey through a building.
//!
//! ```text
//! lift <building.json> <floor>:<room>
//! lift <building.json> <floor>:<room> <floor>:<room>
//! ```
//!
//! With one room the lift starts from the building's configured start; with
//! two the first is the start. Set `RUST_LOG` for more detail.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use lift_core::Coord;
use lift_lib::{Building, Lift};
use lift_paths::Solver;
use tracing::info;

const USAGE: &str = "usage: lift <building.json> [<floor>:<room>] <floor>:<room>";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lift=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (path, from, to) = match args.as_slice() {
        [path, to] => (PathBuf::from(path), None, parse_room(to)?),
        [path, from, to] => (PathBuf::from(path), Some(parse_room(from)?), parse_room(to)?),
        _ => bail!(USAGE),
    };

    info!("Loading building from {:?}", path);
    let building = Building::load(&path)?;
    let grid = building.grid()?;
    let start = from.unwrap_or(building.start);

    let mut lift = Lift::new(Solver::new(grid), building.timing, start);
    let journey = lift
        .go(to)
        .with_context(|| format!("cannot route from {start} to {to}"))?;

    let Some(journey) = journey else {
        println!("No route from {start} to {to}.");
        return Ok(());
    };

    let mut clock = 0u64;
    for step in &journey.steps {
        println!("{clock:>8} ms  {step}");
        clock += step.duration_ms();
    }
    println!(
        "Arrived at {} after {} ms ({} ms travelling through {} rooms).",
        journey.to,
        journey.total_ms(),
        journey.travel_ms(),
        journey.route.len()
    );
    Ok(())
}

fn parse_room(s: &str) -> Result<Coord> {
    s.parse::<Coord>()
        .with_context(|| format!("bad room {s:?}\n{USAGE}"))
}
