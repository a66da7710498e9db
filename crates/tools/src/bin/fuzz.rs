use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hackman_core::{Contest, Direction, Engine, MatchConfig, MatchLog, MatchLogWriter};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    rounds: u32,
    #[arg(long, default_value_t = 19)]
    width: usize,
    #[arg(long, default_value_t = 15)]
    height: usize,
    /// Write every generated round to this match log for `tools replay`
    #[arg(long)]
    log: Option<PathBuf>,
}

fn below(rng: &mut ChaCha8Rng, bound: usize) -> usize {
    (rng.next_u64() % bound as u64) as usize
}

/// One random round: scattered walls, self, usually an opponent, a few
/// hostiles and collectibles.
fn random_field(rng: &mut ChaCha8Rng, width: usize, height: usize) -> String {
    let mut cells: Vec<Vec<&str>> = vec![Vec::new(); width * height];
    for cell in &mut cells {
        if below(rng, 6) == 0 {
            cell.push("x");
        }
    }
    let mut open: Vec<usize> = (0..cells.len()).filter(|idx| cells[*idx].is_empty()).collect();
    if open.is_empty() {
        cells[0].clear();
        open.push(0);
    }

    let self_idx = open.swap_remove(below(rng, open.len()));
    cells[self_idx].push("P0");
    if !open.is_empty() && below(rng, 5) != 0 {
        let opponent_idx = open.swap_remove(below(rng, open.len()));
        cells[opponent_idx].push("P1");
    }
    for _ in 0..below(rng, 8) {
        if open.is_empty() {
            break;
        }
        let idx = open.swap_remove(below(rng, open.len()));
        cells[idx].push(if below(rng, 4) == 0 { "B" } else { "C" });
    }
    for _ in 0..below(rng, 5) {
        let idx = below(rng, cells.len());
        if !cells[idx].contains(&"x") {
            cells[idx].push("E0");
        }
    }

    cells
        .iter()
        .map(|cell| if cell.is_empty() { ".".to_string() } else { cell.join(";") })
        .collect::<Vec<_>>()
        .join(",")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} rounds...", args.seed, args.rounds);
    let config = MatchConfig::new(args.width, args.height, 0, 1);
    let mut engine = Engine::with_config(config.clone()).context("Invalid fuzz dimensions")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut log = MatchLog::new(config);

    let mut yields = 0;
    let mut passes = 0;
    for _ in 0..args.rounds {
        let field = random_field(&mut rng, args.width, args.height);
        log.push_round(field.as_str());
        engine.ingest_snapshot(&field).context("Generated snapshot was rejected")?;
        let plan = engine.plan_move().context("Planning failed")?;
        let decision = plan.decision;
        let grid = engine.grid().context("Engine lost its grid")?;
        let self_pos = engine.state().self_pos.context("Snapshot lost self")?;

        // Assert invariants
        assert_eq!(plan.self_field.get(self_pos), 1, "Invariant failed: origin not stored as 1");
        if let Contest::Yielded { forbidden } = decision.contest {
            assert_ne!(decision.target, forbidden, "Invariant failed: kept forbidden target");
            yields += 1;
        }
        if decision.target != self_pos && plan.self_field.is_reached(decision.target) {
            let step = grid.step(self_pos, decision.direction);
            assert_eq!(
                plan.self_field.get(step),
                2,
                "Invariant failed: first move leaves the route in round {}",
                engine.rounds_ingested()
            );
        }
        if decision.direction == Direction::Pass {
            passes += 1;
        }
        debug!(round = engine.rounds_ingested(), direction = %decision.direction, "fuzz round");
    }

    if let Some(path) = &args.log {
        MatchLogWriter::write_all(path, &log)
            .with_context(|| format!("Failed to write match log: {}", path.display()))?;
    }

    println!("Fuzzing completed successfully: {yields} yields, {passes} passes.");
    Ok(())
}
