//! Face-culled mesh extraction from a finished voxel grid.

use glam::{IVec3, Vec2, Vec3};

use crate::core::grid::VoxelGrid;
use crate::core::voxel::{Voxel, VoxelType};
use crate::render::atlas_map::{AtlasConfig, FaceType, RenderMode, VoxelTextureEntry};
use crate::render::decoration::DecorationBuilder;
use crate::render::mesh::{MeshBuffer, add_quad};

/// Unit cube corners, bottom ring then top ring.
pub const CORNER_OFFSETS: [Vec3; 8] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    Front,
    Back,
}

impl Side {
    pub const ALL: [Side; 6] = [
        Side::Left,
        Side::Right,
        Side::Top,
        Side::Bottom,
        Side::Front,
        Side::Back,
    ];

    /// Indices into [`CORNER_OFFSETS`], in quad order.
    pub fn corners(self) -> [usize; 4] {
        match self {
            Side::Left => [3, 7, 0, 4],
            Side::Right => [1, 5, 2, 6],
            Side::Top => [4, 7, 5, 6],
            Side::Bottom => [3, 0, 2, 1],
            Side::Front => [0, 4, 1, 5],
            Side::Back => [2, 6, 3, 7],
        }
    }

    /// Offset to the neighbouring cell this face looks at.
    pub fn normal(self) -> IVec3 {
        match self {
            Side::Left => IVec3::NEG_X,
            Side::Right => IVec3::X,
            Side::Top => IVec3::Y,
            Side::Bottom => IVec3::NEG_Y,
            Side::Front => IVec3::NEG_Z,
            Side::Back => IVec3::Z,
        }
    }

    pub fn face_type(self) -> FaceType {
        match self {
            Side::Top => FaceType::Top,
            Side::Bottom => FaceType::Bottom,
            _ => FaceType::Side,
        }
    }
}

pub struct MeshBuilder<'a> {
    atlas: &'a AtlasConfig,
    /// Replaces the atlas entry of one voxel type. Used for decoration sub-grids.
    substitute: Option<(VoxelType, VoxelTextureEntry)>,
}

impl<'a> MeshBuilder<'a> {
    pub fn new(atlas: &'a AtlasConfig) -> Self {
        Self {
            atlas,
            substitute: None,
        }
    }

    pub fn with_substitute(mut self, kind: VoxelType, entry: VoxelTextureEntry) -> Self {
        self.substitute = Some((kind, entry));
        self
    }

    pub fn atlas(&self) -> &'a AtlasConfig {
        self.atlas
    }

    fn entry(&self, kind: VoxelType) -> VoxelTextureEntry {
        match self.substitute {
            Some((substitute, entry)) if substitute == kind => entry,
            _ => self.atlas.entry(kind),
        }
    }

    pub fn build(&self, grid: &VoxelGrid) -> MeshBuffer {
        let mut mesh = MeshBuffer::new();
        let decorations = DecorationBuilder::new(self.atlas);

        for x in 0..grid.width() {
            for y in 0..grid.height() {
                for z in 0..grid.length() {
                    let voxel = grid.read_voxel(x, y, z);
                    if voxel.is_air() {
                        continue;
                    }

                    let position = IVec3::new(x, y, z);
                    let entry = self.entry(voxel.kind);
                    match entry.render_mode {
                        RenderMode::None => {}
                        RenderMode::Standard => {
                            self.add_quad_cube(&mut mesh, grid, position, voxel, &entry, false);
                        }
                        RenderMode::Transparent => {
                            self.add_quad_cube(&mut mesh, grid, position, voxel, &entry, false);
                            self.add_quad_cube(&mut mesh, grid, position, voxel, &entry, true);
                        }
                        RenderMode::Decoration => {
                            decorations.add_decoration(&mut mesh, position, &entry);
                        }
                    }
                }
            }
        }

        mesh
    }

    fn add_quad_cube(
        &self,
        mesh: &mut MeshBuffer,
        grid: &VoxelGrid,
        position: IVec3,
        voxel: Voxel,
        entry: &VoxelTextureEntry,
        inverted: bool,
    ) {
        let block_width = self.atlas.block_width.max(1) as f32;
        let texture_unit = 1.0 / block_width;
        let origin = position.as_vec3();

        for side in Side::ALL {
            if !self.is_face_visible(grid, position + side.normal()) {
                continue;
            }

            let corners = side.corners().map(|corner| origin + CORNER_OFFSETS[corner]);
            let uv_start: Vec2 = entry.cell(side.face_type()).as_vec2() / block_width;
            add_quad(mesh, corners, uv_start, texture_unit, voxel.color, inverted);
        }
    }

    /// A face is drawn unless a Standard voxel sits right in front of it.
    fn is_face_visible(&self, grid: &VoxelGrid, neighbour: IVec3) -> bool {
        if grid.is_out_of_bounds(neighbour.x, neighbour.y, neighbour.z) {
            return true;
        }
        let kind = grid.read_voxel(neighbour.x, neighbour.y, neighbour.z).kind;
        kind.is_air() || !self.entry(kind).render_mode.occludes()
    }
}

/// Mesh a whole grid against the given atlas.
pub fn extract_mesh(grid: &VoxelGrid, atlas: &AtlasConfig) -> MeshBuffer {
    let mesh = MeshBuilder::new(atlas).build(grid);
    tracing::debug!(
        "Extracted {} vertices and {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}
