use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;
use crate::core::voxel::VoxelType;
use crate::error::{Result, SceneryError};
use crate::world::structures::StructureKind;
use crate::world::terrain::Layer;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SceneryConfig {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub stages: StageSettings,
    #[serde(default)]
    pub terrain: TerrainSettings,
    #[serde(default)]
    pub caves: CaveSettings,
    #[serde(default)]
    pub flora: FloraSettings,
}

impl SceneryConfig {
    /// Read a JSON config; missing sections fall back to their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SceneryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SceneryError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GridSettings {
    pub width: i32,
    pub height: i32,
    pub length: i32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            length: GRID_LENGTH,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct StageSettings {
    pub terrain: bool,
    pub caves: bool,
    pub flora: bool,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            terrain: true,
            caves: true,
            flora: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TerrainSettings {
    pub base_height: i32,
    pub variation: f32,
    pub noise_frequency: f32,
    /// Top to bottom. The last layer extends to the bottom of the grid.
    pub layers: Vec<Layer>,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            base_height: SURFACE_START_HEIGHT,
            variation: SURFACE_VARIATION,
            noise_frequency: TERRAIN_NOISE_FREQUENCY,
            layers: vec![
                Layer::new(VoxelType::Grass, 1),
                Layer::new(VoxelType::Dirt, 3),
                Layer::new(VoxelType::Stone, u32::MAX),
            ],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CaveSettings {
    pub min_caves: u32,
    pub max_caves: u32,
    pub radius: i32,
    pub branch_chance: f32,
    pub max_curve_degrees: f32,
    /// Fraction of a walk's steps that must pass before it may branch.
    pub branch_start_fraction: f32,
    /// Upper bound on branch walks spawned per stage.
    pub max_branches: usize,
    /// Start caves on the terrain surface pointing downwards.
    pub spawn_at_surface: bool,
}

impl Default for CaveSettings {
    fn default() -> Self {
        Self {
            min_caves: MIN_CAVES,
            max_caves: MAX_CAVES,
            radius: CAVE_RADIUS,
            branch_chance: CAVE_BRANCH_CHANCE,
            max_curve_degrees: CAVE_MAX_CURVE_DEGREES,
            branch_start_fraction: CAVE_BRANCH_START_FRACTION,
            max_branches: MAX_CAVE_BRANCHES,
            spawn_at_surface: true,
        }
    }
}

/// Adaptive termination for one rejection-sampling pass.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SamplingSettings {
    pub min_failures: u32,
    pub failure_multiplier: f32,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            min_failures: MIN_SEARCH_FAILURES,
            failure_multiplier: SEARCH_FAILURE_MULTIPLIER,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FloraSettings {
    /// Radius around the grid center searched for clusters; the half
    /// diagonal of the grid when unset.
    #[serde(default)]
    pub cluster_search_radius: Option<f32>,
    #[serde(default)]
    pub cluster_sampling: SamplingSettings,
    #[serde(default)]
    pub structure_sampling: SamplingSettings,
    #[serde(default = "default_clusters")]
    pub clusters: Vec<ClusterSettings>,
}

impl Default for FloraSettings {
    fn default() -> Self {
        Self {
            cluster_search_radius: None,
            cluster_sampling: SamplingSettings::default(),
            structure_sampling: SamplingSettings::default(),
            clusters: default_clusters(),
        }
    }
}

fn default_clusters() -> Vec<ClusterSettings> {
    vec![
        ClusterSettings {
            structure: StructureKind::Tree,
            padding: FOREST_PADDING,
            radius_min: FOREST_RADIUS_MIN,
            radius_max: FOREST_RADIUS_MAX,
            structure_padding: TREE_PADDING,
            center_on_grass: false,
        },
        ClusterSettings {
            structure: StructureKind::Flower,
            padding: FLOWER_PATCH_PADDING,
            radius_min: FLOWER_PATCH_RADIUS_MIN,
            radius_max: FLOWER_PATCH_RADIUS_MAX,
            structure_padding: FLOWER_PADDING,
            center_on_grass: false,
        },
    ]
}

/// One kind of cluster, e.g. a forest of trees or a patch of flowers.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ClusterSettings {
    pub structure: StructureKind,
    /// Extra spacing kept between cluster centers.
    pub padding: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Extra spacing kept between structures inside clusters.
    pub structure_padding: f32,
    /// Only accept cluster centers on grass.
    #[serde(default)]
    pub center_on_grass: bool,
}
