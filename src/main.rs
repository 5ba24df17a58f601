//! Duel Tactics - Entry Point
//!
//! Reads one game state as JSON, runs the decision pipeline and prints the
//! resulting decision as JSON on stdout. Logs go to stderr.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use duel_tactics::core::error::Result;
use duel_tactics::{DecisionEngine, EngineConfig, GameState};

/// Compute a single AI duel decision for one game tick
#[derive(Parser, Debug)]
#[command(name = "duel-tactics")]
#[command(about = "Decide the AI duelist's next action from a JSON game state")]
struct Args {
    /// Game state JSON file ("-" or omitted reads stdin)
    #[arg(long, short = 's')]
    state: Option<PathBuf>,

    /// Free-form context forwarded to the advisory oracle
    #[arg(long, default_value = "")]
    context: String,

    /// Random seed for a reproducible decision
    #[arg(long)]
    seed: Option<u64>,

    /// Engine configuration TOML
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Never call the advisory oracle
    #[arg(long)]
    offline: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duel_tactics=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.offline {
        config.oracle.enabled = false;
    }

    let state = read_state(args.state.as_ref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, tier = %state.difficulty, "deciding");

    let engine = DecisionEngine::from_config(&config);

    // Create the async runtime for advisory calls
    let rt = Runtime::new()?;
    let decision = rt.block_on(engine.decide_seeded(&state, &args.context, seed));

    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

fn read_state(path: Option<&PathBuf>) -> Result<GameState> {
    let raw = match path {
        Some(p) if p.as_os_str() != "-" => fs::read_to_string(p)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&raw)?)
}
