use glam::IVec3;

use crate::core::voxel::{Voxel, VoxelType};

/// Dense 3D array of voxels with fixed dimensions.
///
/// Every accessor is bounds-checked: reads outside the grid return air and
/// writes outside the grid are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    voxels: Vec<Voxel>,
    width: i32,
    height: i32,
    length: i32,
}

impl VoxelGrid {
    pub fn new(width: i32, height: i32, length: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let length = length.max(0);
        let cells = (width as usize) * (height as usize) * (length as usize);
        VoxelGrid {
            voxels: vec![Voxel::AIR; cells],
            width,
            height,
            length,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn length(&self) -> i32 {
        self.length
    }

    pub fn dimensions(&self) -> IVec3 {
        IVec3::new(self.width, self.height, self.length)
    }

    /// Half of the horizontal diagonal.
    pub fn half_diagonal(&self) -> f32 {
        ((self.width * self.width + self.length * self.length) as f32).sqrt() / 2.0
    }

    /// Wipe every cell back to air.
    pub fn new_grid(&mut self) {
        self.voxels.fill(Voxel::AIR);
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x < 0 || x >= self.width || y < 0 || y >= self.height || z < 0 || z >= self.length
    }

    fn index(&self, x: i32, y: i32, z: i32) -> usize {
        ((x as usize * self.height as usize) + y as usize) * self.length as usize + z as usize
    }

    pub fn read_voxel(&self, x: i32, y: i32, z: i32) -> Voxel {
        if self.is_out_of_bounds(x, y, z) {
            return Voxel::AIR;
        }
        self.voxels[self.index(x, y, z)]
    }

    pub fn write_voxel(&mut self, x: i32, y: i32, z: i32, voxel: impl Into<Voxel>) {
        if self.is_out_of_bounds(x, y, z) {
            return;
        }
        let idx = self.index(x, y, z);
        self.voxels[idx] = voxel.into();
    }

    /// Fill every cell strictly closer than `radius` to the center.
    pub fn write_sphere(&mut self, cx: i32, cy: i32, cz: i32, radius: i32, voxel: impl Into<Voxel>) {
        let voxel = voxel.into();
        let radius_f = radius as f32;
        for x in (cx - radius)..=(cx + radius) {
            for y in (cy - radius)..=(cy + radius) {
                for z in (cz - radius)..=(cz + radius) {
                    if self.is_out_of_bounds(x, y, z) {
                        continue;
                    }
                    let distance = voxel_distance(
                        IVec3::new(cx, cy, cz).as_vec3(),
                        IVec3::new(x, y, z).as_vec3(),
                    );
                    if distance < radius_f {
                        self.write_voxel(x, y, z, voxel);
                    }
                }
            }
        }
    }

    /// Copy `source` into this grid with its (0,0,0) at the given corner.
    ///
    /// Cells landing outside the grid are skipped. Without `overwrite_solids`
    /// only air cells of this grid are replaced.
    pub fn write_grid(
        &mut self,
        source: &VoxelGrid,
        corner_x: i32,
        corner_y: i32,
        corner_z: i32,
        overwrite_solids: bool,
    ) {
        for copy_x in 0..source.width {
            for copy_y in 0..source.height {
                for copy_z in 0..source.length {
                    let write_x = corner_x + copy_x;
                    let write_y = corner_y + copy_y;
                    let write_z = corner_z + copy_z;

                    if self.is_out_of_bounds(write_x, write_y, write_z) {
                        continue;
                    }
                    if !overwrite_solids && !self.read_voxel(write_x, write_y, write_z).is_air() {
                        continue;
                    }
                    let voxel = source.read_voxel(copy_x, copy_y, copy_z);
                    self.write_voxel(write_x, write_y, write_z, voxel);
                }
            }
        }
    }

    /// Topmost non-air row of a column, or 0 when the column is empty.
    pub fn surface_y(&self, x: i32, z: i32) -> i32 {
        if self.is_out_of_bounds(x, 0, z) {
            return 0;
        }
        (0..self.height)
            .rev()
            .find(|&y| !self.read_voxel(x, y, z).is_air())
            .unwrap_or(0)
    }

    pub fn count(&self, kind: VoxelType) -> usize {
        self.voxels.iter().filter(|v| v.kind == kind).count()
    }

    /// Every cell with its coordinates, x-major then y then z.
    pub fn iter(&self) -> impl Iterator<Item = (IVec3, Voxel)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height).flat_map(move |y| {
                (0..self.length).map(move |z| (IVec3::new(x, y, z), self.read_voxel(x, y, z)))
            })
        })
    }
}

/// Euclidean distance between two voxel positions.
pub fn voxel_distance(a: glam::Vec3, b: glam::Vec3) -> f32 {
    a.distance(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::voxel::Rgba8;

    #[test]
    fn bounds_predicate_matches_extents() {
        let grid = VoxelGrid::new(4, 5, 6);
        assert!(!grid.is_out_of_bounds(0, 0, 0));
        assert!(!grid.is_out_of_bounds(3, 4, 5));
        assert!(grid.is_out_of_bounds(-1, 0, 0));
        assert!(grid.is_out_of_bounds(0, -1, 0));
        assert!(grid.is_out_of_bounds(0, 0, -1));
        assert!(grid.is_out_of_bounds(4, 0, 0));
        assert!(grid.is_out_of_bounds(0, 5, 0));
        assert!(grid.is_out_of_bounds(0, 0, 6));
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut grid = VoxelGrid::new(3, 3, 3);
        let before = grid.clone();
        grid.write_voxel(-1, 0, 0, VoxelType::Stone);
        grid.write_voxel(0, 3, 0, VoxelType::Stone);
        grid.write_voxel(0, 0, 100, VoxelType::Stone);
        assert_eq!(grid, before);
        assert!(grid.read_voxel(-5, 2, 2).is_air());
        assert!(grid.read_voxel(1, 1, 3).is_air());
    }

    #[test]
    fn new_grid_resets_to_air() {
        let mut grid = VoxelGrid::new(4, 4, 4);
        grid.write_voxel(1, 2, 3, VoxelType::Dirt);
        grid.write_sphere(2, 2, 2, 2, VoxelType::Stone);
        grid.new_grid();
        assert!(grid.iter().all(|(_, voxel)| voxel.is_air()));
        assert_eq!(grid.count(VoxelType::Air), 64);
    }

    #[test]
    fn write_and_read_keep_color() {
        let mut grid = VoxelGrid::new(2, 2, 2);
        let red = Voxel::colored(VoxelType::Blank, Rgba8::opaque(255, 0, 0));
        grid.write_voxel(1, 1, 0, red);
        assert_eq!(grid.read_voxel(1, 1, 0), red);
    }

    #[test]
    fn sphere_writes_exactly_cells_inside_radius() {
        let mut grid = VoxelGrid::new(9, 9, 9);
        let center = IVec3::new(4, 4, 4);
        grid.write_sphere(center.x, center.y, center.z, 3, VoxelType::Stone);

        for (pos, voxel) in grid.iter() {
            let inside = voxel_distance(center.as_vec3(), pos.as_vec3()) < 3.0;
            assert_eq!(voxel.kind == VoxelType::Stone, inside, "cell {pos}");
        }
    }

    #[test]
    fn sphere_clips_at_grid_edges() {
        let mut grid = VoxelGrid::new(4, 4, 4);
        grid.write_sphere(0, 0, 0, 2, VoxelType::Stone);
        // Only the 2x2x2 corner block is closer than 2 (farthest is sqrt(3)).
        assert_eq!(grid.count(VoxelType::Stone), 8);
        assert_eq!(grid.read_voxel(1, 1, 1).kind, VoxelType::Stone);
        assert!(grid.read_voxel(2, 0, 0).is_air());
    }

    #[test]
    fn zero_radius_sphere_writes_nothing() {
        let mut grid = VoxelGrid::new(3, 3, 3);
        grid.write_sphere(1, 1, 1, 0, VoxelType::Stone);
        assert_eq!(grid.count(VoxelType::Stone), 0);
    }

    #[test]
    fn stamping_respects_solids_and_bounds() {
        let mut stamp = VoxelGrid::new(2, 1, 2);
        for x in 0..2 {
            for z in 0..2 {
                stamp.write_voxel(x, 0, z, VoxelType::Wood);
            }
        }

        let mut grid = VoxelGrid::new(3, 3, 3);
        grid.write_voxel(2, 0, 2, VoxelType::Stone);
        grid.write_grid(&stamp, 1, 0, 1, false);

        assert_eq!(grid.read_voxel(1, 0, 1).kind, VoxelType::Wood);
        assert_eq!(grid.read_voxel(2, 0, 1).kind, VoxelType::Wood);
        assert_eq!(grid.read_voxel(1, 0, 2).kind, VoxelType::Wood);
        assert_eq!(grid.read_voxel(2, 0, 2).kind, VoxelType::Stone);

        grid.write_grid(&stamp, 1, 0, 1, true);
        assert_eq!(grid.read_voxel(2, 0, 2).kind, VoxelType::Wood);

        // Partially outside: in-bounds cells still land.
        let mut grid = VoxelGrid::new(3, 3, 3);
        grid.write_grid(&stamp, 2, 2, 2, false);
        assert_eq!(grid.read_voxel(2, 2, 2).kind, VoxelType::Wood);
        assert_eq!(grid.count(VoxelType::Wood), 1);
    }

    #[test]
    fn surface_is_first_solid_row_from_top() {
        let mut grid = VoxelGrid::new(2, 8, 2);
        assert_eq!(grid.surface_y(0, 0), 0);
        grid.write_voxel(0, 2, 0, VoxelType::Stone);
        grid.write_voxel(0, 5, 0, VoxelType::Grass);
        assert_eq!(grid.surface_y(0, 0), 5);
        assert_eq!(grid.surface_y(1, 1), 0);
        assert_eq!(grid.surface_y(7, 7), 0);
    }

    #[test]
    fn half_diagonal_of_square_grid() {
        let grid = VoxelGrid::new(6, 1, 8);
        assert!((grid.half_diagonal() - 5.0).abs() < 1e-6);
    }
}
