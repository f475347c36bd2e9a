//! Runs one encounter headless and prints its report as JSON.
//!
//! The player is scripted: it walks toward the nearest creature in the fight
//! and hits whatever stands next to it.
//!
//! ```text
//! skirmish --seed 7 --rounds 40
//! skirmish --data ./content --scenario ./den.ron
//! RUST_LOG=creature_core=debug skirmish
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use creature_content::{ContentFactory, CreatureCatalog, builtin};
use creature_core::{AiConfig, CombatTarget, DamageType, PathOracle};
use creature_runtime::{Encounter, Scenario};

/// Headless creature skirmish
#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Run a scripted encounter against the creature engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory (archetypes.ron, items.ron, loot.ron, config.toml).
    /// Uses the built-in pack when omitted.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Scenario file. Uses the built-in crossroads scenario when omitted.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Seed override.
    #[arg(long)]
    seed: Option<u64>,

    /// Combat rounds before the encounter is called a draw.
    #[arg(long, default_value_t = 40)]
    rounds: u32,

    /// Exploration ticks before giving up on contact.
    #[arg(long, default_value_t = 200)]
    ticks: u32,

    /// Seconds per exploration tick.
    #[arg(long, default_value_t = 0.25)]
    dt: f32,

    /// Creatures this close to the player join the fight.
    #[arg(long, default_value_t = 5)]
    engage_radius: u32,

    /// Damage of one player swing.
    #[arg(long, default_value_t = 8)]
    player_damage: u32,
}

fn load_content(data: Option<&PathBuf>) -> Result<(CreatureCatalog, AiConfig)> {
    match data {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            Ok((factory.load_catalog()?, factory.load_config()?))
        }
        None => Ok((builtin::catalog()?, builtin::config()?)),
    }
}

/// Hits the weakest adjacent creature, otherwise steps toward the nearest
/// one in the fight.
fn player_turn(encounter: &mut Encounter, damage: u32) -> Result<()> {
    if !encounter.player().can_act() {
        return Ok(());
    }
    let here = encounter.player().position();

    let adjacent = encounter
        .living()
        .filter(|(_, c)| c.in_combat_zone && c.tile().chebyshev(here) == 1)
        .min_by_key(|(_, c)| c.stats.current_health)
        .map(|(index, _)| index);
    if let Some(index) = adjacent {
        encounter.player_attack(index, damage, DamageType::Physical)?;
        return Ok(());
    }

    let nearest = encounter
        .living()
        .filter(|(_, c)| c.in_combat_zone)
        .min_by_key(|(_, c)| c.tile().chebyshev(here))
        .map(|(_, c)| c.tile());
    let Some(goal) = nearest else {
        return Ok(());
    };
    let step = encounter
        .pathfinder()
        .find_path(encounter.map(), here, goal)
        .and_then(|path| path.first().copied());
    if let Some(step) = step {
        encounter.move_player(step);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (catalog, config) = load_content(cli.data.as_ref())?;
    let scenario = match &cli.scenario {
        Some(path) => Scenario::load_from_file(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => Scenario::builtin().context("Built-in scenario is invalid")?,
    };
    let mut encounter = scenario
        .build(Arc::new(catalog), config, cli.seed)
        .context("Failed to build encounter")?;

    let mut ticks = 0;
    while encounter.engage(cli.engage_radius) == 0 && ticks < cli.ticks {
        encounter.explore(cli.dt);
        ticks += 1;
    }
    tracing::info!(ticks, "exploration finished");

    while encounter.round() < cli.rounds && !encounter.is_over() {
        player_turn(&mut encounter, cli.player_damage)?;
        let summary = encounter.run_round();
        encounter.engage(cli.engage_radius);
        tracing::info!(
            round = summary.round,
            acted = summary.acted,
            deaths = summary.deaths,
            player_health = encounter.player().health,
            "round"
        );
    }

    let report = encounter.report();
    tracing::info!(
        rounds = report.rounds,
        player_alive = encounter.player().is_alive(),
        drops = report.loot.len(),
        "encounter over"
    );
    println!("{}", report.to_json()?);
    Ok(())
}
