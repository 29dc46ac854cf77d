//! Core data structures for the generator
//! Contains voxels and the dense voxel grid they live in.

pub mod grid;
pub mod voxel;

// Re-export commonly used types
pub use grid::{VoxelGrid, voxel_distance};
pub use voxel::{Rgba8, Voxel, VoxelType};
