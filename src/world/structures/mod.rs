pub mod library;
pub mod structure;

pub use library::StructureLibrary;
pub use structure::{StructureBlueprint, StructureKind};
