//! World generation modules
//! Contains the terrain, cave and flora stages and the pipeline driving them.

pub mod caves;
pub mod flora;
pub mod generator;
pub mod structures;
pub mod terrain;
pub mod theme;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Re-export commonly used types
pub use caves::CaveGenerator;
pub use flora::{FloraGenerator, Placement, PlacementSampler};
pub use generator::SceneryGenerator;
pub use structures::{StructureBlueprint, StructureKind, StructureLibrary};
pub use terrain::{HeightField, Layer, PerlinField, TerrainGenerator};
pub use theme::Theme;

/// Random stream used by a single generation stage.
pub type StageRng = ChaCha8Rng;

/// Fresh stream for one stage. Every stage starts from the same seed.
pub fn stage_rng(seed: u32) -> StageRng {
    ChaCha8Rng::seed_from_u64(seed as u64)
}
