//! Command line interface.

use crate::config::CONFIG_FILE;
use clap::{Parser, Subcommand};
use spawnrand_common::BlockPos;
use std::path::PathBuf;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "spawnrand", version, about = "Random spawn assignment for block worlds")]
pub struct Cli {
    /// Host configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    pub config: PathBuf,
    /// Seed for spawn selection
    #[arg(long)]
    pub seed: Option<u64>,
    /// World border diameter in blocks
    #[arg(long)]
    pub border: Option<f64>,
    /// Keep settings and player data in memory only
    #[arg(long)]
    pub dry_run: bool,
    /// Command to run
    #[command(subcommand)]
    pub cmd: Cmd,
}

/// Host events and queries.
#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Join players, then kill and respawn each of them
    Simulate {
        /// Number of new players
        #[arg(long, default_value_t = 5)]
        players: usize,
        /// Death and respawn rounds per player
        #[arg(long, default_value_t = 1)]
        deaths: usize,
    },
    /// A player joins the world
    Join {
        /// Player name or id
        player: String,
    },
    /// A known player dies
    Death {
        /// Player name or id
        player: String,
    },
    /// A known player respawns
    Respawn {
        /// Player name or id
        player: String,
        /// Bed spawn as x,y,z
        #[arg(long, value_parser = parse_block_pos)]
        bed: Option<BlockPos>,
    },
    /// List stored spawn records
    Records,
}

/// Parses `x,y,z`.
pub fn parse_block_pos(s: &str) -> Result<BlockPos, String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<i32>().map_err(|e| format!("{part:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        [x, y, z] => Ok(BlockPos::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got {s:?}")),
    }
}
