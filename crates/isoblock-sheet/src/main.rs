//! Builds every block sprite from a texture pack and writes sprite sheets.
//!
//! Run with: `cargo run -p isoblock-sheet -- --textures <dir>`

mod sheet;

use std::error::Error as _;
use std::path::{Path, PathBuf};

use clap::Parser;
use image::RgbaImage;
use isoblock_biome::{BiomeColormap, BiomeError, BiomeRegionCache};
use isoblock_config::{CliArgs, Config, ConfigError};
use isoblock_sprites::{
    BiomeBlock, BuildOptions, DirectorySource, SourceError, SpriteEngine, SpriteError,
    TextureNames,
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
enum SheetError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build sprites")]
    Sprites(#[from] SpriteError),

    #[error("failed to read biome data")]
    Biome(#[from] BiomeError),

    #[error("failed to create {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

fn main() {
    let args = CliArgs::parse();

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), SheetError> {
    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => Config::default_dir()?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);

    isoblock_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );

    let source = DirectorySource::with_names(
        config.textures.search_paths.clone(),
        TextureNames {
            atlas: config.textures.atlas.clone(),
            water: config.textures.water.clone(),
            lava: config.textures.lava.clone(),
            fire: config.textures.fire.clone(),
        },
    );
    let options = BuildOptions {
        parallel: config.sprites.parallel,
        worker_threads: config.sprites.worker_threads,
    };
    let engine = SpriteEngine::load(&source, &options)?;

    let out_dir = &config.output.directory;
    std::fs::create_dir_all(out_dir).map_err(|source| SheetError::CreateDir {
        path: out_dir.clone(),
        source,
    })?;

    let cache = engine.cache();
    write_png(&sheet::plain_sheet(cache), &out_dir.join(&config.output.sheet_name))?;
    write_png(
        &sheet::variant_sheet(cache),
        &out_dir.join(&config.output.variant_sheet_name),
    )?;
    info!(
        plain = cache.plain_count(),
        variants = cache.variant_count(),
        dir = %out_dir.display(),
        "wrote sprite sheets"
    );

    if let Some(world) = &args.world {
        write_biome_previews(&engine, &source, &config, world)?;
    }
    Ok(())
}

/// Tints grass and leaves with the colors of block (0, 0) of `world`.
fn write_biome_previews(
    engine: &SpriteEngine,
    source: &DirectorySource,
    config: &Config,
    world: &Path,
) -> Result<(), SheetError> {
    let previews = [
        (BiomeBlock::Grass, &config.textures.grass_colormap, "grass_biome.png"),
        (BiomeBlock::Leaves, &config.textures.foliage_colormap, "leaves_biome.png"),
    ];

    let mut regions = BiomeRegionCache::new(world.join("biomes"), config.biome.region_cache_capacity);
    let Some(region) = regions.get(0, 0)? else {
        warn!(world = %world.display(), "no biome data for chunk (0, 0)");
        return Ok(());
    };
    let Some(index) = region.value(0, 0) else {
        return Ok(());
    };

    for (block, colormap_name, file_name) in previews {
        let path = match source.find(colormap_name) {
            Ok(path) => path,
            Err(SourceError::NotFound { name, .. }) => {
                warn!(%name, "colormap not found, skipping biome preview");
                continue;
            }
            Err(err) => {
                warn!(%err, "colormap lookup failed");
                continue;
            }
        };
        let colormap = BiomeColormap::load(&path)?;
        let Some(color) = colormap.color(usize::from(index)) else {
            warn!(index, colormap = %path.display(), "biome index outside colormap");
            continue;
        };
        let sprite = engine.biome_sprite(block, color);
        write_png(&sprite, &config.output.directory.join(file_name))?;
        info!(?block, ?color, "wrote biome preview");
    }
    Ok(())
}

fn write_png(image: &RgbaImage, path: &Path) -> Result<(), SheetError> {
    image.save(path).map_err(|source| SheetError::Write {
        path: path.to_path_buf(),
        source,
    })
}
