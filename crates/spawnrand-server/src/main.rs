//! # SpawnRand
//!
//! Command line host for random spawn assignment. Generates a world from the
//! host config and forwards join, death and respawn events to the curator,
//! printing where each player ends up.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod cli;
mod config;
mod session;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Cmd};
use config::AppConfig;
use session::{known_players, Session};
use spawnrand_core::{
    ConfigStore, MemoryConfigStore, MemoryRecordStore, PlayerRecordStore, SettingsManager,
    SpawnCurator, SpawnSelector, SpawnSettings, TomlRecordStore, WorldQuery,
};
use spawnrand_world::TerrainWorld;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("spawnrand=info".parse()?))
        .init();

    info!("SpawnRand {}", env!("CARGO_PKG_VERSION"));

    let mut app = if cli.dry_run {
        AppConfig::load_from(&cli.config)
    } else {
        AppConfig::load_or_create(&cli.config)?
    };
    if let Some(seed) = cli.seed {
        app.selector_seed = Some(seed);
    }
    if let Some(border) = cli.border {
        app.world.border_diameter = border;
    }

    let world = TerrainWorld::new(app.world.clone());

    if cli.dry_run {
        let settings = read_settings(&app.settings_path())?;
        let curator =
            SpawnCurator::new(&settings, MemoryRecordStore::new(), MemoryConfigStore::new());
        run(Session::new(world, seeded(curator, &app)), cli.cmd)
    } else {
        let manager = SettingsManager::open(app.settings_path())?;
        let settings = manager.settings().clone();
        let records = TomlRecordStore::open(app.player_data_path())?;
        let roster = known_players(&records);
        let curator = SpawnCurator::new(&settings, records, manager);
        run(
            Session::new(world, seeded(curator, &app)).with_roster(roster),
            cli.cmd,
        )
    }
}

/// Settings file contents without creating it.
fn read_settings(path: &Path) -> Result<SpawnSettings> {
    if !path.exists() {
        return Ok(SpawnSettings::default());
    }
    Ok(SpawnSettings::from_toml(&std::fs::read_to_string(path)?)?)
}

fn seeded<S: PlayerRecordStore, C: ConfigStore>(
    curator: SpawnCurator<S, C>,
    app: &AppConfig,
) -> SpawnCurator<S, C> {
    match app.selector_seed {
        Some(seed) => curator.with_selector(SpawnSelector::with_seed(seed)),
        None => curator,
    }
}

fn run<W: WorldQuery, S: PlayerRecordStore, C: ConfigStore>(
    mut session: Session<W, S, C>,
    cmd: Cmd,
) -> Result<()> {
    match cmd {
        Cmd::Simulate { players, deaths } => {
            for outcome in session.simulate(players, deaths) {
                println!("{outcome}");
            }
        },
        Cmd::Join { player } => println!("{}", session.join(&player)),
        Cmd::Death { player } => {
            let id = session.death(&player)?;
            println!("{player} ({id}) died");
        },
        Cmd::Respawn { player, bed } => println!("{}", session.respawn(&player, bed)?),
        Cmd::Records => {
            let area = session.curator().config();
            println!(
                "spawn area: center ({}, {}), distance {}..{}",
                area.center_x, area.center_z, area.min_distance, area.max_distance
            );
            for (name, id, record) in session.records() {
                match record.and_then(|r| r.location().map(|pos| (pos, r))) {
                    Some((pos, record)) => println!(
                        "{name} {id} {pos} on {} bed={} override={}",
                        record
                            .standing_on
                            .as_ref()
                            .map_or("unknown", |b| b.as_str()),
                        record.bed_spawn_location,
                        record.override_world_spawn
                    ),
                    None => println!("{name} {id} unassigned"),
                }
            }
        },
    }
    Ok(())
}
