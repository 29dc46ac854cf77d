//! Voxelscape demo
//!
//! Generates one scenery grid, meshes it and logs what came out.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rand::Rng;

use voxelscape::{
    ATLAS_BLOCK_WIDTH, AtlasConfig, RANDOM_SEED_MAX, SceneryConfig, SceneryGenerator, Theme,
    VoxelType, extract_mesh, generate_texture_atlas, load_texture_atlas_from_file,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Spring => Theme::Spring,
            ThemeArg::Summer => Theme::Summer,
            ThemeArg::Fall => Theme::Fall,
            ThemeArg::Winter => Theme::Winter,
        }
    }
}

/// Procedural voxel scenery generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generation seed (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// JSON scenery config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured grid width
    #[arg(long)]
    width: Option<i32>,

    /// Override the configured grid height
    #[arg(long)]
    height: Option<i32>,

    /// Override the configured grid length
    #[arg(long)]
    length: Option<i32>,

    /// JSON atlas map assigning atlas cells to voxel types
    #[arg(long)]
    atlas_map: Option<PathBuf>,

    /// Atlas image; the procedural atlas is painted when omitted
    #[arg(long)]
    atlas_image: Option<PathBuf>,

    /// Cells per atlas row, used to validate the atlas image
    #[arg(long, default_value_t = ATLAS_BLOCK_WIDTH)]
    block_width: u32,

    /// Palette theme (picked from the seed when omitted)
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Atlas from the command line: a JSON map must agree with `--block-width`,
/// and a bare atlas image is split into `--block-width` cells per row.
fn build_atlas(args: &Args, theme: Theme) -> voxelscape::Result<AtlasConfig> {
    let bitmap = match &args.atlas_image {
        Some(path) => load_texture_atlas_from_file(path, args.block_width)?,
        None => generate_texture_atlas(theme),
    };
    match &args.atlas_map {
        Some(path) => AtlasConfig::load(path, bitmap)?.ensure_block_width(args.block_width),
        None => {
            let mut atlas = AtlasConfig::procedural(theme);
            atlas.bitmap = bitmap;
            if args.atlas_image.is_some() {
                atlas.block_width = args.block_width;
            }
            Ok(atlas)
        }
    }
}

fn run(args: Args) -> voxelscape::Result<()> {
    let seed = args
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen_range(0..=RANDOM_SEED_MAX));

    let mut config = match &args.config {
        Some(path) => SceneryConfig::load(path)?,
        None => SceneryConfig::default(),
    };
    if let Some(width) = args.width {
        config.grid.width = width;
    }
    if let Some(height) = args.height {
        config.grid.height = height;
    }
    if let Some(length) = args.length {
        config.grid.length = length;
    }

    let theme = args.theme.map(Theme::from).unwrap_or_else(|| Theme::from_seed(seed));
    tracing::info!("Seed {} with {} theme", seed, theme.name());

    let atlas = build_atlas(&args, theme)?;

    let grid = SceneryGenerator::new(config).generate(seed);
    for kind in VoxelType::ALL {
        let count = grid.count(kind);
        if count > 0 {
            tracing::info!("{:?}: {} voxels", kind, count);
        }
    }

    let mesh = extract_mesh(&grid, &atlas);
    tracing::info!(
        "Mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("voxelscape-{}-{}", std::process::id(), name))
    }

    #[test]
    fn atlas_image_uses_requested_block_width() {
        let image_path = scratch_file("atlas-128.png");
        image::RgbaImage::new(128, 128).save(&image_path).unwrap();

        let args = Args::parse_from([
            "voxelscape",
            "--atlas-image",
            image_path.to_str().unwrap(),
            "--block-width",
            "8",
        ]);
        let atlas = build_atlas(&args, Theme::Spring).unwrap();
        assert_eq!(atlas.block_width, 8);
        assert_eq!(atlas.cell_pixels(), 16);

        std::fs::remove_file(&image_path).unwrap();
    }

    #[test]
    fn atlas_map_must_agree_with_block_width() {
        let map_path = scratch_file("atlas-map.json");
        std::fs::write(&map_path, r#"{ "blocks": { "Stone": { "all": [0, 0] } } }"#).unwrap();

        let args = Args::parse_from([
            "voxelscape",
            "--atlas-map",
            map_path.to_str().unwrap(),
            "--block-width",
            "8",
        ]);
        assert!(matches!(
            build_atlas(&args, Theme::Fall),
            Err(voxelscape::SceneryError::BlockWidthMismatch { map: 4, expected: 8 })
        ));

        let args = Args::parse_from(["voxelscape", "--atlas-map", map_path.to_str().unwrap()]);
        assert_eq!(build_atlas(&args, Theme::Fall).unwrap().block_width, 4);

        std::fs::remove_file(&map_path).unwrap();
    }

    #[test]
    fn procedural_atlas_keeps_its_own_layout() {
        let args = Args::parse_from(["voxelscape", "--block-width", "8"]);
        let atlas = build_atlas(&args, Theme::Winter).unwrap();
        assert_eq!(atlas.block_width, ATLAS_BLOCK_WIDTH);
    }
}
