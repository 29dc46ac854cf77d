//! Billboard geometry for decoration voxels such as flowers.
//!
//! The side texture of a decoration is voxelised into a small grid: each
//! opaque pixel becomes a pair of coloured sub-voxels on two crossed planes.
//! That grid is meshed like any other and shrunk into the parent cell.

use glam::IVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::constants::DECORATION_ALPHA_THRESHOLD;
use crate::core::grid::VoxelGrid;
use crate::core::voxel::{Voxel, VoxelType};
use crate::render::atlas_map::{AtlasConfig, RenderMode, VoxelTextureEntry};
use crate::render::mesh::MeshBuffer;
use crate::render::mesher::MeshBuilder;

pub struct DecorationBuilder<'a> {
    atlas: &'a AtlasConfig,
    /// Pixels with alpha at or below this are left empty.
    pub alpha_threshold: u8,
}

impl<'a> DecorationBuilder<'a> {
    pub fn new(atlas: &'a AtlasConfig) -> Self {
        Self {
            atlas,
            alpha_threshold: DECORATION_ALPHA_THRESHOLD,
        }
    }

    /// Voxelise the side texture of `entry` for a decoration at `position`.
    ///
    /// Sub-voxels are `Blank` and carry the colour of their source pixel.
    pub fn sub_grid(&self, position: IVec3, entry: &VoxelTextureEntry) -> VoxelGrid {
        let size = self.atlas.cell_pixels() as i32;
        let mut grid = VoxelGrid::new(size, size, size);
        if size == 0 {
            return grid;
        }

        let center = size / 2;
        let seed = (position.x + position.y + position.z) as u64;
        let mirrored = ChaCha8Rng::seed_from_u64(seed).gen_bool(0.5);

        let origin_x = entry.side.x * size as u32;
        let origin_y = entry.side.y * size as u32;

        for j in 0..size {
            for u in 0..size {
                let pixel = self
                    .atlas
                    .bitmap
                    .pixel(origin_x + u as u32, origin_y + j as u32);
                if pixel.a <= self.alpha_threshold {
                    continue;
                }

                let voxel = Voxel::colored(VoxelType::Blank, pixel);
                let across = if mirrored { size - 1 - u } else { u };
                grid.write_voxel(u, j, center, voxel);
                grid.write_voxel(center, j, across, voxel);
            }
        }

        grid
    }

    /// Texture for sub-voxels: the plain `Blank` cell, or the decoration's own
    /// side cell when the atlas has no `Blank` entry. Always drawn as Standard.
    fn sub_voxel_entry(&self, entry: &VoxelTextureEntry) -> VoxelTextureEntry {
        let blank = self.atlas.entry(VoxelType::Blank);
        if blank.render_mode == RenderMode::None {
            return VoxelTextureEntry::uniform(entry.side, RenderMode::Standard);
        }
        VoxelTextureEntry {
            render_mode: RenderMode::Standard,
            ..blank
        }
    }

    /// Mesh the decoration and append it to `mesh`, filling the unit cell at `position`.
    pub fn add_decoration(&self, mesh: &mut MeshBuffer, position: IVec3, entry: &VoxelTextureEntry) {
        let grid = self.sub_grid(position, entry);
        if grid.width() == 0 {
            return;
        }

        let sub_entry = self.sub_voxel_entry(entry);
        let sub_mesh = MeshBuilder::new(self.atlas)
            .with_substitute(VoxelType::Blank, sub_entry)
            .build(&grid);

        let scale = 1.0 / grid.width() as f32;
        mesh.append_transformed(&sub_mesh, scale, position.as_vec3());
    }
}
