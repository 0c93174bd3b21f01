//! Scripted encounter runner.
//!
//! Loads combat content and lets the auto-battle heuristic fight an encounter
//! either through an ATB battle instance or through the shared combat manager.
mod content;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use game_core::SeededRng;
use runtime::{BattleInstance, Outcome};

use content::{BUNDLED_ENCOUNTER, Content};

/// Run a combat encounter with every side on auto-battle
#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Scripted combat encounters", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory (config.toml, skills.ron, encounters/); bundled data when omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// Encounter file name under encounters/, without extension
    #[arg(long, default_value = BUNDLED_ENCOUNTER)]
    encounter: String,

    /// Override the encounter's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many turns (battle) or rounds (server)
    #[arg(long, default_value_t = 500)]
    max_turns: usize,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// ATB battle over owned rosters (default)
    Battle,

    /// Round-robin through the concurrent combat manager
    Server {
        /// Print every combat result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let content = Content::load(cli.data.as_deref(), &cli.encounter)?;
    let seed = cli.seed.or(content.encounter.seed);
    tracing::info!(
        encounter = %content.encounter.name,
        skills = content.skills.len(),
        ?seed,
        "content loaded"
    );

    match cli.mode.unwrap_or(Mode::Battle) {
        Mode::Battle => run_battle(content, seed, cli.max_turns),
        Mode::Server { json } => server::run(content, seed, cli.max_turns, json),
    }
}

fn run_battle(content: Content, seed: Option<u64>, max_turns: usize) -> Result<()> {
    let rng = seed.map_or_else(SeededRng::from_entropy, SeededRng::new);
    let mut battle = BattleInstance::new(Arc::new(content.skills), content.config, rng);
    for ally in content.encounter.allies() {
        battle.add_ally(ally)?;
    }
    for enemy in content.encounter.enemies() {
        battle.add_enemy(enemy)?;
    }

    println!("== {} ==", content.encounter.name);
    for line in battle.run_auto(max_turns) {
        println!("{line}");
    }

    match battle.outcome() {
        Outcome::Victory => println!("Victory!"),
        Outcome::Defeat => println!("Defeat..."),
        Outcome::Ongoing => println!("The fight is still raging after {max_turns} turns."),
    }
    Ok(())
}
