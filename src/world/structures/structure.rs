use serde::{Deserialize, Serialize};

use crate::core::grid::VoxelGrid;
use crate::core::voxel::{Voxel, VoxelType};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum StructureKind {
    Tree,
    Flower,
}

/// A small pre-authored grid stamped into the world.
#[derive(Debug, Clone)]
pub struct StructureBlueprint {
    pub name: String,
    pub grid: VoxelGrid,
}

impl StructureBlueprint {
    pub fn new(name: &str, width: i32, height: i32, length: i32) -> Self {
        Self {
            name: name.to_string(),
            grid: VoxelGrid::new(width, height, length),
        }
    }

    pub fn with_voxel(mut self, x: i32, y: i32, z: i32, voxel: impl Into<Voxel>) -> Self {
        self.grid.write_voxel(x, y, z, voxel);
        self
    }

    pub fn with_box(mut self, min: [i32; 3], max: [i32; 3], kind: VoxelType) -> Self {
        for x in min[0]..=max[0] {
            for y in min[1]..=max[1] {
                for z in min[2]..=max[2] {
                    self.grid.write_voxel(x, y, z, kind);
                }
            }
        }
        self
    }

    /// Radius of the horizontal footprint, measured from its center.
    pub fn footprint_radius(&self) -> f32 {
        self.grid.width().max(self.grid.length()) as f32 / 2.0
    }
}
