//! Layered terrain driven by 2D coherent noise.
//!
//! Every column gets a surface height from the noise field; the column is then
//! filled top-down from a list of material layers.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::TerrainSettings;
use crate::constants::TERRAIN_OFFSET_RANGE;
use crate::core::grid::VoxelGrid;
use crate::core::voxel::VoxelType;

/// One band of a terrain column.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Layer {
    pub material: VoxelType,
    pub depth: u32,
}

impl Layer {
    pub const fn new(material: VoxelType, depth: u32) -> Self {
        Self { material, depth }
    }
}

/// 2D field sampled for surface heights. Samples are expected in [0, 1].
pub trait HeightField {
    fn sample(&self, x: f32, z: f32) -> f32;
}

/// FastNoiseLite Perlin noise remapped to [0, 1].
pub struct PerlinField {
    noise: FastNoiseLite,
}

impl PerlinField {
    pub fn new(seed: u32, frequency: f32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(frequency));
        Self { noise }
    }
}

impl HeightField for PerlinField {
    fn sample(&self, x: f32, z: f32) -> f32 {
        ((self.noise.get_noise_2d(x, z) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

pub struct TerrainGenerator<'a, F: HeightField> {
    settings: &'a TerrainSettings,
    field: F,
}

impl<'a> TerrainGenerator<'a, PerlinField> {
    pub fn with_seed(settings: &'a TerrainSettings, seed: u32) -> Self {
        Self::new(settings, PerlinField::new(seed, settings.noise_frequency))
    }
}

impl<'a, F: HeightField> TerrainGenerator<'a, F> {
    pub fn new(settings: &'a TerrainSettings, field: F) -> Self {
        Self { settings, field }
    }

    /// Surface row of a column for the given noise offset.
    pub fn surface_height(&self, grid: &VoxelGrid, offset: Vec2, x: i32, z: i32) -> i32 {
        let sample = self.field.sample(
            offset.x + x as f32 / grid.width() as f32,
            offset.y + z as f32 / grid.length() as f32,
        );
        self.settings
            .base_height
            .saturating_add((sample * self.settings.variation * 2.0) as i32)
    }

    /// Layer state `rows` rows below a row in state `(layer_index, depth)`.
    ///
    /// Matches stepping down one row at a time: depth grows by one per row and
    /// the next layer starts once the current one's depth is exceeded. The last
    /// layer never ends.
    fn descend(&self, state: (usize, u64), mut rows: u64) -> (usize, u64) {
        let (mut layer_index, mut depth) = state;
        let last_layer = self.settings.layers.len() - 1;
        while rows > 0 && layer_index < last_layer {
            let layer_depth = self.settings.layers[layer_index].depth as u64;
            let remaining = layer_depth.saturating_sub(depth);
            if rows <= remaining {
                return (layer_index, depth + rows);
            }
            rows -= remaining + 1;
            layer_index += 1;
            depth = 1;
        }
        (layer_index, depth.saturating_add(rows))
    }

    pub fn write_terrain<R: Rng>(&self, grid: &mut VoxelGrid, rng: &mut R) {
        if self.settings.layers.is_empty() {
            tracing::warn!("Terrain has no layers, skipping");
            return;
        }

        let offset = Vec2::new(
            rng.gen_range(0.0..TERRAIN_OFFSET_RANGE),
            rng.gen_range(0.0..TERRAIN_OFFSET_RANGE),
        );

        for x in 0..grid.width() {
            for z in 0..grid.length() {
                let surface = self.surface_height(grid, offset, x, z);
                let top = surface.min(grid.height() - 1);
                if top < 0 {
                    continue;
                }

                // Rows above the grid are skipped but still consume layer depth.
                let mut state = self.descend((0, 1), (surface as i64 - top as i64) as u64);
                grid.write_voxel(x, top, z, self.settings.layers[state.0].material);

                for y in (0..top).rev() {
                    state = self.descend(state, 1);
                    grid.write_voxel(x, y, z, self.settings.layers[state.0].material);
                }
            }
        }

        tracing::debug!(
            "Terrain written, offset {:?}, {} air voxels left",
            offset,
            grid.count(VoxelType::Air)
        );
    }
}
