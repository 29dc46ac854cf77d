// Grid constants
pub const GRID_WIDTH: i32 = 48;
pub const GRID_HEIGHT: i32 = 48;
pub const GRID_LENGTH: i32 = 48;

// Terrain constants
pub const SURFACE_START_HEIGHT: i32 = 16;
pub const SURFACE_VARIATION: f32 = 10.0;
pub const TERRAIN_NOISE_FREQUENCY: f32 = 1.5;
pub const TERRAIN_OFFSET_RANGE: f32 = 1000.0;

// Cave constants
pub const CAVE_RADIUS: i32 = 3;
pub const CAVE_BRANCH_CHANCE: f32 = 0.025;
pub const CAVE_MAX_CURVE_DEGREES: f32 = 5.0;
pub const CAVE_BRANCH_START_FRACTION: f32 = 0.15;
pub const MIN_CAVES: u32 = 2;
pub const MAX_CAVES: u32 = 3;
pub const MAX_CAVE_BRANCHES: usize = 32;

// Flora constants
pub const MIN_SEARCH_FAILURES: u32 = 50;
pub const SEARCH_FAILURE_MULTIPLIER: f32 = 2.5;
pub const FOREST_PADDING: f32 = 2.0;
pub const FOREST_RADIUS_MIN: f32 = 8.0;
pub const FOREST_RADIUS_MAX: f32 = 12.0;
pub const FLOWER_PATCH_PADDING: f32 = 2.0;
pub const FLOWER_PATCH_RADIUS_MIN: f32 = 4.0;
pub const FLOWER_PATCH_RADIUS_MAX: f32 = 8.0;
pub const TREE_PADDING: f32 = 0.5;
pub const FLOWER_PADDING: f32 = 0.75;

// Texture atlas constants
pub const ATLAS_BLOCK_WIDTH: u32 = 4;
pub const TEXTURE_SIZE: u32 = 16;
pub const DECORATION_ALPHA_THRESHOLD: u8 = 127;

// Seeds picked when none is supplied
pub const RANDOM_SEED_MAX: u32 = 999;
