use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use hackman_core::{
    Decision, Engine, MatchConfig, MatchLogWriter, ReplayStep, draw_field_diag, load_match_log,
    replay_match,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide one move for a single snapshot
    Decide(DecideArgs),
    /// Replay a JSONL match log and print every decision
    Replay(ReplayArgs),
}

#[derive(Args)]
struct DecideArgs {
    /// TOML match config; replaces the dimension and id flags
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 19)]
    width: usize,
    #[arg(long, default_value_t = 15)]
    height: usize,
    #[arg(long, default_value_t = 0)]
    self_id: u32,
    #[arg(long, default_value_t = 1)]
    opponent_id: u32,
    /// Snapshot text, `@path` to read it from a file, or omit to read one line from stdin
    field: Option<String>,
    /// Print the decision as JSON
    #[arg(long)]
    json: bool,
    /// Print the self distance field after the decision
    #[arg(long)]
    dump: bool,
    /// Append the snapshot to this match log, creating it if needed
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(Args)]
struct ReplayArgs {
    /// Path to the JSONL match log to replay
    #[arg(short, long)]
    log: PathBuf,
    /// Print one JSON object per round
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ReplayLine<'a> {
    round: u64,
    #[serde(flatten)]
    decision: &'a Decision,
    snapshot_hash: u64,
}

impl<'a> From<&'a ReplayStep> for ReplayLine<'a> {
    fn from(step: &'a ReplayStep) -> Self {
        Self { round: step.round, decision: &step.decision, snapshot_hash: step.snapshot_hash }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Command::Decide(args) => decide(args),
        Command::Replay(args) => replay(args),
    }
}

fn decide(args: DecideArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => MatchConfig::new(args.width, args.height, args.self_id, args.opponent_id),
    };
    let field = read_field(args.field.as_deref())?;

    let mut engine = Engine::with_config(config.clone()).context("Invalid match config")?;
    engine.ingest_snapshot(&field).context("Failed to ingest snapshot")?;
    let plan = engine.plan_move().context("Failed to plan move")?;

    if let Some(path) = &args.log {
        let round = append_round(path, &config, &field)?;
        info!(round, log = %path.display(), "round recorded");
    }

    if args.json {
        println!("{}", serde_json::to_string(&plan.decision)?);
    } else {
        println!("{}", plan.decision.direction);
    }
    if args.dump {
        print!("{}", draw_field_diag(&plan.self_field, &engine.state().hostiles));
    }
    Ok(())
}

fn replay(args: ReplayArgs) -> Result<()> {
    let log = load_match_log(&args.log)
        .with_context(|| format!("Failed to load match log: {}", args.log.display()))?;
    let result = replay_match(&log).context("Replay failed during execution")?;

    for step in &result.steps {
        if args.json {
            println!("{}", serde_json::to_string(&ReplayLine::from(step))?);
        } else {
            let decision = step.decision;
            println!(
                "round {}: {} toward {} ({:?})",
                step.round, decision.direction, decision.target, decision.contest
            );
        }
    }
    if !args.json {
        println!("Replay complete.");
        println!("Rounds: {}", result.steps.len());
        println!("Snapshot Hash: {}", result.final_snapshot_hash);
    }
    Ok(())
}

fn read_field(arg: Option<&str>) -> Result<String> {
    match arg {
        Some(text) => match text.strip_prefix('@') {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read field file: {path}")),
            None => Ok(text.to_string()),
        },
        None => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).context("Failed to read field from stdin")?;
            Ok(line)
        }
    }
}

/// Appends `field` to the log at `path`, creating the log on first use.
fn append_round(path: &Path, config: &MatchConfig, field: &str) -> Result<u64> {
    let mut writer = if path.exists() {
        let log = load_match_log(path)
            .with_context(|| format!("Failed to load match log: {}", path.display()))?;
        if log.config != *config {
            bail!("match log {} was recorded with a different config", path.display());
        }
        MatchLogWriter::resume(path, &log)?
    } else {
        MatchLogWriter::create(path, config)?
    };
    writer.append(field).with_context(|| format!("Failed to append to {}", path.display()))
}
