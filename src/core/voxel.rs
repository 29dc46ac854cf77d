use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color, laid out for direct upload as a vertex attribute.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Rgba8::WHITE
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum VoxelType {
    #[default]
    Air,
    Blank,
    Blueprint,
    Grass,
    DripGrass,
    Dirt,
    Stone,
    Leaves,
    Wood,
    Rose,
}

impl VoxelType {
    pub const ALL: [VoxelType; 10] = [
        VoxelType::Air,
        VoxelType::Blank,
        VoxelType::Blueprint,
        VoxelType::Grass,
        VoxelType::DripGrass,
        VoxelType::Dirt,
        VoxelType::Stone,
        VoxelType::Leaves,
        VoxelType::Wood,
        VoxelType::Rose,
    ];

    pub fn is_air(&self) -> bool {
        *self == VoxelType::Air
    }

    /// Surfaces flora is allowed to root on.
    pub fn is_grass(&self) -> bool {
        matches!(self, VoxelType::Grass | VoxelType::DripGrass)
    }
}

/// A single grid cell: its material plus a tint carried into the mesh.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Voxel {
    pub kind: VoxelType,
    pub color: Rgba8,
}

impl Voxel {
    pub const AIR: Voxel = Voxel {
        kind: VoxelType::Air,
        color: Rgba8::WHITE,
    };

    pub const fn new(kind: VoxelType) -> Self {
        Self {
            kind,
            color: Rgba8::WHITE,
        }
    }

    pub const fn colored(kind: VoxelType, color: Rgba8) -> Self {
        Self { kind, color }
    }

    pub fn is_air(&self) -> bool {
        self.kind.is_air()
    }
}

impl From<VoxelType> for Voxel {
    fn from(kind: VoxelType) -> Self {
        Voxel::new(kind)
    }
}
