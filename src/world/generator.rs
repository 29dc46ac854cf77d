//! Generation pipeline: terrain, then caves, then flora.
//!
//! Every stage reseeds its own stream from the same seed, so each one is
//! reproducible on its own for a given grid state.

use crate::config::SceneryConfig;
use crate::core::grid::VoxelGrid;
use crate::world::caves::CaveGenerator;
use crate::world::flora::FloraGenerator;
use crate::world::stage_rng;
use crate::world::structures::StructureLibrary;
use crate::world::terrain::TerrainGenerator;

pub struct SceneryGenerator {
    config: SceneryConfig,
    library: StructureLibrary,
}

impl SceneryGenerator {
    pub fn new(config: SceneryConfig) -> Self {
        Self::with_library(config, StructureLibrary::default())
    }

    pub fn with_library(config: SceneryConfig, library: StructureLibrary) -> Self {
        Self { config, library }
    }

    pub fn config(&self) -> &SceneryConfig {
        &self.config
    }

    pub fn library(&self) -> &StructureLibrary {
        &self.library
    }

    /// Allocate a grid of the configured size and generate into it.
    pub fn generate(&self, seed: u32) -> VoxelGrid {
        let dims = self.config.grid;
        let mut grid = VoxelGrid::new(dims.width, dims.height, dims.length);
        self.generate_into(&mut grid, seed);
        grid
    }

    /// Wipe `grid` and run every enabled stage on it.
    pub fn generate_into(&self, grid: &mut VoxelGrid, seed: u32) {
        let stages = self.config.stages;
        grid.new_grid();

        tracing::info!(
            "Generating {}x{}x{} scenery with seed {}",
            grid.width(),
            grid.height(),
            grid.length(),
            seed
        );

        if stages.terrain {
            TerrainGenerator::with_seed(&self.config.terrain, seed)
                .write_terrain(grid, &mut stage_rng(seed));
        }
        if stages.caves {
            CaveGenerator::new(&self.config.caves).write_caves(grid, &mut stage_rng(seed));
        }
        if stages.flora {
            let clusters = FloraGenerator::new(&self.config.flora, &self.library)
                .write_flora(grid, &mut stage_rng(seed));
            tracing::info!("Flora placed in {} clusters", clusters.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridSettings, StageSettings};
    use crate::core::voxel::VoxelType;

    fn small_config() -> SceneryConfig {
        SceneryConfig {
            grid: GridSettings {
                width: 24,
                height: 32,
                length: 24,
            },
            ..SceneryConfig::default()
        }
    }

    #[test]
    fn same_seed_same_grid() {
        let generator = SceneryGenerator::new(small_config());
        assert_eq!(generator.generate(123), generator.generate(123));
    }

    #[test]
    fn different_seeds_differ() {
        let generator = SceneryGenerator::new(small_config());
        assert_ne!(generator.generate(1), generator.generate(2));
    }

    #[test]
    fn generate_into_resets_previous_contents() {
        let generator = SceneryGenerator::new(small_config());
        let fresh = generator.generate(9);
        let mut reused = generator.generate(10);
        generator.generate_into(&mut reused, 9);
        assert_eq!(fresh, reused);
    }

    #[test]
    fn disabled_stages_leave_grid_empty() {
        let config = SceneryConfig {
            stages: StageSettings {
                terrain: false,
                caves: false,
                flora: false,
            },
            ..small_config()
        };
        let grid = SceneryGenerator::new(config).generate(4);
        assert_eq!(grid.count(VoxelType::Air), 24 * 32 * 24);
    }

    #[test]
    fn full_pipeline_produces_layers() {
        let grid = SceneryGenerator::new(small_config()).generate(42);
        assert!(grid.count(VoxelType::Stone) > 0);
        assert!(grid.count(VoxelType::Dirt) > 0);
        assert!(grid.count(VoxelType::Air) > 0);
    }
}
