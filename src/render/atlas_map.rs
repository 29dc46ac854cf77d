use glam::UVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::constants::ATLAS_BLOCK_WIDTH;
use crate::core::voxel::VoxelType;
use crate::error::{Result, SceneryError};
use crate::render::texture::{AtlasBitmap, cells, generate_texture_atlas};
use crate::world::theme::Theme;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Not drawn; never hides a neighbour's face.
    #[default]
    None,
    Standard,
    /// Drawn from both sides.
    Transparent,
    /// Drawn as billboard geometry cut from the side texture.
    Decoration,
}

impl RenderMode {
    /// Whether a voxel drawn this way hides the faces of its neighbours.
    pub fn occludes(&self) -> bool {
        *self == RenderMode::Standard
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FaceType {
    Top,
    Bottom,
    Side,
}

/// Atlas cells and render mode of one voxel type.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct VoxelTextureEntry {
    pub top: UVec2,
    pub side: UVec2,
    pub bottom: UVec2,
    pub render_mode: RenderMode,
}

impl VoxelTextureEntry {
    pub fn uniform(cell: UVec2, render_mode: RenderMode) -> Self {
        Self {
            top: cell,
            side: cell,
            bottom: cell,
            render_mode,
        }
    }

    pub fn cell(&self, face: FaceType) -> UVec2 {
        match face {
            FaceType::Top => self.top,
            FaceType::Bottom => self.bottom,
            FaceType::Side => self.side,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AtlasMapFile {
    #[serde(default = "default_block_width")]
    block_width: u32,
    blocks: HashMap<VoxelType, BlockTextures>,
}

fn default_block_width() -> u32 {
    ATLAS_BLOCK_WIDTH
}

#[derive(Debug, Deserialize, Clone)]
struct BlockTextures {
    all: Option<[u32; 2]>,
    top: Option<[u32; 2]>,
    side: Option<[u32; 2]>,
    bottom: Option<[u32; 2]>,
    #[serde(default)]
    render_mode: RenderMode,
}

impl BlockTextures {
    fn resolve(&self) -> VoxelTextureEntry {
        let all = self.all.unwrap_or([0, 0]);
        VoxelTextureEntry {
            top: UVec2::from(self.top.unwrap_or(all)),
            side: UVec2::from(self.side.unwrap_or(all)),
            bottom: UVec2::from(self.bottom.unwrap_or(all)),
            render_mode: self.render_mode,
        }
    }
}

/// Everything mesh extraction needs to know about the texture atlas.
#[derive(Debug, Clone)]
pub struct AtlasConfig {
    /// Cells per atlas row and column.
    pub block_width: u32,
    pub bitmap: AtlasBitmap,
    entries: HashMap<VoxelType, VoxelTextureEntry>,
}

impl AtlasConfig {
    pub fn new(block_width: u32, bitmap: AtlasBitmap) -> Self {
        Self {
            block_width,
            bitmap,
            entries: HashMap::new(),
        }
    }

    pub fn with_entry(mut self, kind: VoxelType, entry: VoxelTextureEntry) -> Self {
        self.set_entry(kind, entry);
        self
    }

    pub fn set_entry(&mut self, kind: VoxelType, entry: VoxelTextureEntry) {
        self.entries.insert(kind, entry);
    }

    /// Entry for a voxel type. Unmapped types are not rendered.
    pub fn entry(&self, kind: VoxelType) -> VoxelTextureEntry {
        self.entries.get(&kind).copied().unwrap_or_default()
    }

    /// Width in pixels of a single atlas cell.
    pub fn cell_pixels(&self) -> u32 {
        if self.block_width == 0 {
            return 0;
        }
        self.bitmap.width() / self.block_width
    }

    /// Fail when the map was authored for a different number of cells per row.
    pub fn ensure_block_width(self, expected: u32) -> Result<Self> {
        if self.block_width != expected {
            return Err(SceneryError::BlockWidthMismatch {
                map: self.block_width,
                expected,
            });
        }
        Ok(self)
    }

    /// Read a JSON atlas map. Each block may give `all` plus per-face overrides.
    pub fn load<P: AsRef<Path>>(path: P, bitmap: AtlasBitmap) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SceneryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, bitmap).map_err(|source| SceneryError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str, bitmap: AtlasBitmap) -> serde_json::Result<Self> {
        let file: AtlasMapFile = serde_json::from_str(content)?;
        let mut config = Self::new(file.block_width, bitmap);
        for (kind, textures) in &file.blocks {
            config.set_entry(*kind, textures.resolve());
        }
        Ok(config)
    }

    /// Themed procedural atlas with entries for every built-in voxel type.
    pub fn procedural(theme: Theme) -> Self {
        let cell = |c: [u32; 2]| UVec2::from(c);
        let standard = |c: [u32; 2]| VoxelTextureEntry::uniform(cell(c), RenderMode::Standard);

        Self::new(ATLAS_BLOCK_WIDTH, generate_texture_atlas(theme))
            .with_entry(
                VoxelType::Grass,
                VoxelTextureEntry {
                    top: cell(cells::GRASS_TOP),
                    side: cell(cells::GRASS_SIDE),
                    bottom: cell(cells::DIRT),
                    render_mode: RenderMode::Standard,
                },
            )
            .with_entry(
                VoxelType::DripGrass,
                VoxelTextureEntry {
                    top: cell(cells::GRASS_TOP),
                    side: cell(cells::DRIP_GRASS_SIDE),
                    bottom: cell(cells::DIRT),
                    render_mode: RenderMode::Standard,
                },
            )
            .with_entry(VoxelType::Dirt, standard(cells::DIRT))
            .with_entry(VoxelType::Stone, standard(cells::STONE))
            .with_entry(
                VoxelType::Wood,
                VoxelTextureEntry {
                    top: cell(cells::WOOD_TOP),
                    side: cell(cells::WOOD_SIDE),
                    bottom: cell(cells::WOOD_TOP),
                    render_mode: RenderMode::Standard,
                },
            )
            .with_entry(
                VoxelType::Leaves,
                VoxelTextureEntry::uniform(cell(cells::LEAVES), RenderMode::Transparent),
            )
            .with_entry(
                VoxelType::Rose,
                VoxelTextureEntry::uniform(cell(cells::ROSE), RenderMode::Decoration),
            )
            .with_entry(VoxelType::Blank, standard(cells::BLANK))
            .with_entry(
                VoxelType::Blueprint,
                VoxelTextureEntry::uniform(cell(cells::BLUEPRINT), RenderMode::Transparent),
            )
    }
}
