use glam::{Vec2, Vec3};

use crate::core::voxel::Rgba8;

/// Parallel vertex arrays ready for upload. Index `i` of `vertices`, `uvs` and
/// `colors` describe the same vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Vec2>,
    pub colors: Vec<Rgba8>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append `other` scaled by `scale` and moved by `offset`.
    pub fn append_transformed(&mut self, other: &MeshBuffer, scale: f32, offset: Vec3) {
        let base_idx = self.vertices.len() as u32;
        self.vertices
            .extend(other.vertices.iter().map(|v| *v * scale + offset));
        self.indices.extend(other.indices.iter().map(|i| i + base_idx));
        self.uvs.extend_from_slice(&other.uvs);
        self.colors.extend_from_slice(&other.colors);
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Push one textured quad.
///
/// Corners are ordered bottom-left, top-left, bottom-right, top-right as seen
/// from the front. `inverted` flips the winding so the quad faces inwards.
pub fn add_quad(
    mesh: &mut MeshBuffer,
    corners: [Vec3; 4],
    uv_start: Vec2,
    texture_unit: f32,
    color: Rgba8,
    inverted: bool,
) {
    let base_idx = mesh.vertices.len() as u32;
    mesh.vertices.extend_from_slice(&corners);
    mesh.colors.extend_from_slice(&[color; 4]);

    if !inverted {
        mesh.indices.extend_from_slice(&[
            base_idx,
            base_idx + 1,
            base_idx + 2,
            base_idx + 3,
            base_idx + 2,
            base_idx + 1,
        ]);
    } else {
        mesh.indices.extend_from_slice(&[
            base_idx + 2,
            base_idx + 1,
            base_idx,
            base_idx + 1,
            base_idx + 2,
            base_idx + 3,
        ]);
    }

    mesh.uvs.extend_from_slice(&[
        uv_start,
        uv_start + Vec2::new(0.0, texture_unit),
        uv_start + Vec2::new(texture_unit, 0.0),
        uv_start + Vec2::new(texture_unit, texture_unit),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> [Vec3; 4] {
        [Vec3::ZERO, Vec3::Y, Vec3::X, Vec3::new(1.0, 1.0, 0.0)]
    }

    #[test]
    fn quad_adds_four_vertices_and_two_triangles() {
        let mut mesh = MeshBuffer::new();
        add_quad(&mut mesh, unit_quad(), Vec2::new(0.25, 0.5), 0.25, Rgba8::WHITE, false);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 2, 1]);
        assert_eq!(mesh.uvs[3], Vec2::new(0.5, 0.75));
        assert_eq!(mesh.colors, vec![Rgba8::WHITE; 4]);
    }

    #[test]
    fn inverted_quad_reverses_winding() {
        let mut mesh = MeshBuffer::new();
        add_quad(&mut mesh, unit_quad(), Vec2::ZERO, 1.0, Rgba8::WHITE, false);
        add_quad(&mut mesh, unit_quad(), Vec2::ZERO, 1.0, Rgba8::WHITE, true);
        assert_eq!(&mesh.indices[6..], &[6, 5, 4, 5, 6, 7]);
    }

    #[test]
    fn append_offsets_indices_and_transforms_positions() {
        let mut parent = MeshBuffer::new();
        add_quad(&mut parent, unit_quad(), Vec2::ZERO, 1.0, Rgba8::WHITE, false);

        let mut child = MeshBuffer::new();
        let red = Rgba8::opaque(255, 0, 0);
        add_quad(&mut child, unit_quad(), Vec2::ZERO, 1.0, red, false);

        parent.append_transformed(&child, 0.5, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(parent.vertex_count(), 8);
        assert_eq!(&parent.indices[6..], &[4, 5, 6, 7, 6, 5]);
        assert_eq!(parent.vertices[7], Vec3::new(2.5, 0.5, 0.0));
        assert_eq!(parent.colors[4], red);
        assert_eq!(parent.uvs.len(), 8);
    }

    #[test]
    fn byte_views_cover_whole_buffers() {
        let mut mesh = MeshBuffer::new();
        add_quad(&mut mesh, unit_quad(), Vec2::ZERO, 1.0, Rgba8::WHITE, false);
        assert_eq!(mesh.vertex_bytes().len(), 4 * 12);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
        assert_eq!(mesh.uv_bytes().len(), 4 * 8);
        assert_eq!(mesh.color_bytes().len(), 4 * 4);
    }
}
