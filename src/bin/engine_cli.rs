//! Command-line front end for the engine: scenario validation, replay
//! verification, and state hashing (SPEC_FULL §B.2). Mirrors the
//! subcommand-per-operation shape of the wider lineage's CLI tools, but each
//! subcommand here maps onto one library entry point rather than a bespoke
//! report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tabletop_engine::bundle::{load_replay, load_scenario, verify_replay};
use tabletop_engine::config::EngineConfig;
use tabletop_engine::hash::state_hash;
use tabletop_engine::model::GameState;
use tabletop_engine::rules;

#[derive(Parser)]
#[command(name = "engine_cli")]
#[command(about = "CLI tools for the tabletop simulation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario JSON file against the 25 state invariants
    Validate {
        /// Path to the scenario bundle JSON file
        scenario: PathBuf,
    },
    /// Fold a replay bundle's steps and check the result against its recorded hash
    Replay {
        /// Path to the replay bundle JSON file
        bundle: PathBuf,
        /// Rule module to replay under: "default" or "homebrew"
        #[arg(short, long, default_value = "default")]
        ruleset: String,
    },
    /// Print the canonical hash of a bare game state JSON file
    Hash {
        /// Path to a GameState JSON file
        state: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario } => run_validate(&scenario),
        Commands::Replay { bundle, ruleset } => run_replay(&bundle, &ruleset),
        Commands::Hash { state } => run_hash(&state),
    }
}

fn run_validate(path: &PathBuf) -> ExitCode {
    match load_scenario(path) {
        Ok(bundle) => {
            println!("[OK] scenario '{}' ({}) is valid", bundle.meta.id, bundle.meta.name);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("[ERROR] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn resolve_ruleset(name: &str) -> Option<std::sync::Arc<dyn rules::RuleModule>> {
    match name {
        "default" => Some(rules::default_module()),
        "homebrew" => Some(rules::homebrew_module()),
        _ => None,
    }
}

fn run_replay(path: &PathBuf, ruleset: &str) -> ExitCode {
    let Some(rule_module) = resolve_ruleset(ruleset) else {
        println!("[ERROR] unknown ruleset '{}' (expected 'default' or 'homebrew')", ruleset);
        return ExitCode::FAILURE;
    };

    let bundle = match load_replay(path) {
        Ok(bundle) => bundle,
        Err(e) => {
            println!("[ERROR] {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("steps replayed: {}", bundle.steps.len());

    if !EngineConfig::default().replay.verify_on_load {
        println!("[SKIPPED] replay verification disabled by configuration (replay.verify_on_load = false)");
        return ExitCode::SUCCESS;
    }

    let verification = verify_replay(&bundle, rule_module.as_ref());
    println!("actual hash:   {}", verification.actual_hash);
    println!("expected hash: {}", verification.expected_hash);

    if verification.matches {
        println!("[OK] replay matches recorded final state");
        ExitCode::SUCCESS
    } else {
        println!("[ERROR] replay diverged from recorded final state");
        ExitCode::FAILURE
    }
}

fn run_hash(path: &PathBuf) -> ExitCode {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            println!("[ERROR] failed to read file: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let state: GameState = match serde_json::from_str(&text) {
        Ok(state) => state,
        Err(e) => {
            println!("[ERROR] invalid state JSON: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("{}", state_hash(&state));
    ExitCode::SUCCESS
}
