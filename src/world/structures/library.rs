use std::collections::HashMap;

use super::{StructureBlueprint, StructureKind};
use crate::core::voxel::VoxelType;

/// Blueprints available to the flora generator, keyed by kind.
#[derive(Debug, Clone)]
pub struct StructureLibrary {
    blueprints: HashMap<StructureKind, StructureBlueprint>,
}

impl StructureLibrary {
    pub fn empty() -> Self {
        Self {
            blueprints: HashMap::new(),
        }
    }

    pub fn insert(&mut self, kind: StructureKind, blueprint: StructureBlueprint) {
        self.blueprints.insert(kind, blueprint);
    }

    pub fn get(&self, kind: StructureKind) -> Option<&StructureBlueprint> {
        self.blueprints.get(&kind)
    }
}

impl Default for StructureLibrary {
    fn default() -> Self {
        let mut library = Self::empty();
        library.insert(StructureKind::Tree, tree());
        library.insert(StructureKind::Flower, flower());
        library
    }
}

/// 3x5x3 tree: four-high trunk inside a two-layer canopy with a plus-shaped cap.
pub fn tree() -> StructureBlueprint {
    StructureBlueprint::new("Tree", 3, 5, 3)
        // Canopy
        .with_box([0, 2, 0], [2, 3, 2], VoxelType::Leaves)
        .with_voxel(0, 4, 1, VoxelType::Leaves)
        .with_voxel(2, 4, 1, VoxelType::Leaves)
        .with_voxel(1, 4, 0, VoxelType::Leaves)
        .with_voxel(1, 4, 1, VoxelType::Leaves)
        .with_voxel(1, 4, 2, VoxelType::Leaves)
        // Trunk
        .with_box([1, 0, 1], [1, 3, 1], VoxelType::Wood)
}

pub fn flower() -> StructureBlueprint {
    StructureBlueprint::new("Flower", 1, 1, 1).with_voxel(0, 0, 0, VoxelType::Rose)
}
