//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Sprite sheet generator arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "isoblock-sheet", about = "Render isometric block sprites")]
pub struct CliArgs {
    /// Texture directory searched before the configured ones.
    #[arg(long)]
    pub textures: Option<PathBuf>,

    /// Output directory for sprite sheets.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Worker threads (0 = default pool).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Build sprites on the calling thread.
    #[arg(long)]
    pub serial: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// World directory with biome data.
    #[arg(long)]
    pub world: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref dir) = args.textures {
            self.textures.search_paths.insert(0, dir.clone());
        }
        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if let Some(threads) = args.threads {
            self.sprites.worker_threads = threads;
        }
        if args.serial {
            self.sprites.parallel = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
