// Core module with the voxel grid and voxel types
pub mod core;

// Render module with the texture atlas and mesh extraction
pub mod render;

// World module with the generation stages
pub mod world;

// Other modules
pub mod config;
pub mod constants;
pub mod error;

// Re-exports
pub use config::SceneryConfig;
pub use constants::*;
pub use crate::core::{Rgba8, Voxel, VoxelGrid, VoxelType};
pub use error::{Result, SceneryError};
pub use render::{
    AtlasBitmap, AtlasConfig, MeshBuffer, MeshBuilder, RenderMode, VoxelTextureEntry,
    extract_mesh, generate_texture_atlas, load_texture_atlas_from_file,
};
pub use world::{SceneryGenerator, StructureLibrary, Theme};
