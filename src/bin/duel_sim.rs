//! Headless Duel Simulator
//!
//! Runs seeded random scenarios through the rule-table engine for every
//! difficulty tier and reports aggregate decision statistics.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use duel_tactics::scenario::random_state;
use duel_tactics::{AIDecision, DecisionEngine, Difficulty, EngineConfig, TacticsConfig};

/// Headless Duel Simulator - aggregate decision statistics per tier
#[derive(Parser, Debug)]
#[command(name = "duel_sim")]
#[command(about = "Run random duel scenarios and summarise the AI's decisions")]
struct Args {
    /// Scenarios per difficulty tier
    #[arg(long, short = 'n', default_value_t = 10_000)]
    scenarios: u64,

    /// Base random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Engine configuration TOML (only the tactics table is used)
    #[arg(long, short = 'c')]
    config: Option<std::path::PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct TierSummary {
    tier: String,
    scenarios: u64,
    shoot_rate: f32,
    jump_rate: f32,
    move_rate: f32,
    mean_accuracy: f32,
    mean_confidence: f32,
    mean_reaction_ms: f32,
}

impl TierSummary {
    fn from_decisions(tier: Difficulty, decisions: &[AIDecision]) -> Self {
        let n = decisions.len().max(1) as f32;
        let rate = |hit: fn(&AIDecision) -> bool| decisions.iter().filter(|d| hit(d)).count() as f32 / n;
        let mean = |value: fn(&AIDecision) -> f32| decisions.iter().map(value).sum::<f32>() / n;

        Self {
            tier: tier.to_string(),
            scenarios: decisions.len() as u64,
            shoot_rate: rate(|d| d.should_shoot),
            jump_rate: rate(|d| d.should_jump),
            move_rate: rate(|d| d.movement.x != 0.0),
            mean_accuracy: mean(|d| d.accuracy_modifier),
            mean_confidence: mean(|d| d.confidence),
            mean_reaction_ms: mean(|d| d.reaction_time_ms as f32),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    let tactics = match &args.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config.tactics,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => TacticsConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let engine = DecisionEngine::offline(tactics);
    tracing::info!(seed, scenarios = args.scenarios, "starting duel simulation");

    let summaries: Vec<TierSummary> = Difficulty::ALL
        .iter()
        .map(|&tier| {
            let decisions: Vec<AIDecision> = (0..args.scenarios)
                .into_par_iter()
                .map(|i| {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i));
                    let state = random_state(&mut rng, tier);
                    engine.decide_offline(&state, &mut rng)
                })
                .collect();
            TierSummary::from_decisions(tier, &decisions)
        })
        .collect();

    if args.format == "json" {
        match serde_json::to_string_pretty(&summaries) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize summary: {}", e),
        }
        return;
    }

    println!("=== DUEL SIMULATION (seed {}) ===", seed);
    println!(
        "{:<8} {:>8} {:>7} {:>7} {:>7} {:>9} {:>10} {:>9}",
        "tier", "runs", "shoot", "jump", "move", "accuracy", "confidence", "react_ms"
    );
    for s in &summaries {
        println!(
            "{:<8} {:>8} {:>7.3} {:>7.3} {:>7.3} {:>9.3} {:>10.3} {:>9.1}",
            s.tier,
            s.scenarios,
            s.shoot_rate,
            s.jump_rate,
            s.move_rate,
            s.mean_accuracy,
            s.mean_confidence,
            s.mean_reaction_ms
        );
    }
}
