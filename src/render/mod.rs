//! Rendering-related modules
//! Contains the texture atlas, mesh buffers and mesh extraction.

pub mod atlas_map;
pub mod decoration;
pub mod mesh;
pub mod mesher;
pub mod texture;

// Re-export commonly used types
pub use atlas_map::{AtlasConfig, FaceType, RenderMode, VoxelTextureEntry};
pub use decoration::DecorationBuilder;
pub use mesh::{MeshBuffer, add_quad};
pub use mesher::{MeshBuilder, Side, extract_mesh};
pub use texture::{AtlasBitmap, generate_texture_atlas, load_texture_atlas_from_file};
