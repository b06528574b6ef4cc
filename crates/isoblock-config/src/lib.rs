//! Settings for the isoblock tools.
//!
//! Settings persist as `config.ron`. Every section falls back to its defaults
//! when missing, and command-line flags override what was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BiomeSettings, CONFIG_FILE, Config, DebugConfig, OutputConfig, SpriteSettings, TextureConfig,
};
pub use error::ConfigError;
