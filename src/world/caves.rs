//! Cave carving with randomized, branching walks.

use glam::{Quat, Vec3};
use rand::Rng;

use crate::config::CaveSettings;
use crate::core::grid::VoxelGrid;
use crate::core::voxel::Voxel;

/// A single tunnel being bored through the grid.
#[derive(Debug, Clone, Copy)]
struct CaveWalk {
    position: Vec3,
    direction: Vec3,
    curve: Quat,
    length: i32,
    step: i32,
}

pub struct CaveGenerator<'a> {
    settings: &'a CaveSettings,
}

impl<'a> CaveGenerator<'a> {
    pub fn new(settings: &'a CaveSettings) -> Self {
        Self { settings }
    }

    pub fn write_caves<R: Rng>(&self, grid: &mut VoxelGrid, rng: &mut R) {
        let min = self.settings.min_caves.min(self.settings.max_caves);
        let caves = rng.gen_range(min..=self.settings.max_caves.max(min));
        let mut branches = 0;

        for _ in 0..caves {
            let inset = self.settings.radius as f32;
            let start_x = range_or_mid(rng, inset, grid.width() as f32 - inset);
            let start_z = range_or_mid(rng, inset, grid.length() as f32 - inset);

            let (start_y, min_dy, max_dy) = if self.settings.spawn_at_surface {
                (grid.surface_y(start_x as i32, start_z as i32) as f32, -1.0, -0.25)
            } else {
                (range_or_mid(rng, 0.0, grid.height() as f32), -1.0, 1.0)
            };

            let direction = Vec3::new(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(min_dy..=max_dy),
                rng.gen_range(-1.0..=1.0),
            )
            .try_normalize()
            .unwrap_or(Vec3::NEG_Y);

            let start = Vec3::new(start_x, start_y, start_z);
            branches += self.write_cave(grid, rng, start, direction, branches);
        }

        tracing::debug!("Carved {} caves with {} branches", caves, branches);
    }

    fn start_walk<R: Rng>(
        &self,
        grid: &VoxelGrid,
        rng: &mut R,
        position: Vec3,
        direction: Vec3,
    ) -> CaveWalk {
        let half = grid.width() / 2;
        let length = if half < grid.width() {
            rng.gen_range(half..grid.width())
        } else {
            0
        };
        let axis = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        )
        .try_normalize()
        .unwrap_or(Vec3::Y);
        let max_curve = self.settings.max_curve_degrees.abs();
        let degrees = rng.gen_range(-max_curve..=max_curve);

        CaveWalk {
            position,
            direction,
            curve: Quat::from_axis_angle(axis, degrees.to_radians()),
            length,
            step: 0,
        }
    }

    /// Bore one cave and all of its branches. Returns the number of branches spawned.
    ///
    /// Walks are processed depth-first: a branch runs to completion before its
    /// parent resumes, so the random stream is consumed in call order.
    fn write_cave<R: Rng>(
        &self,
        grid: &mut VoxelGrid,
        rng: &mut R,
        position: Vec3,
        direction: Vec3,
        branches_before: usize,
    ) -> usize {
        let mut spawned = 0;
        let mut pending = vec![self.start_walk(grid, rng, position, direction)];

        'walks: while let Some(mut walk) = pending.pop() {
            while walk.step < walk.length {
                let cell = walk.position.floor().as_ivec3();
                if grid.is_out_of_bounds(cell.x, cell.y, cell.z) {
                    continue 'walks;
                }

                grid.write_sphere(cell.x, cell.y, cell.z, self.settings.radius, Voxel::AIR);

                walk.position += walk.direction;
                walk.direction = walk.curve * walk.direction;
                let step = walk.step;
                walk.step += 1;

                let can_branch =
                    step as f32 > walk.length as f32 * self.settings.branch_start_fraction;
                if can_branch && rng.gen_range(0.0f32..1.0) < self.settings.branch_chance {
                    if branches_before + spawned >= self.settings.max_branches {
                        tracing::trace!("Cave branch cap reached, skipping fork");
                        continue;
                    }
                    let fork_angle: f32 = if rng.gen_bool(0.5) { -90.0 } else { 90.0 };
                    let fork_direction =
                        Quat::from_axis_angle(Vec3::Y, fork_angle.to_radians()) * walk.direction;
                    let branch = self.start_walk(grid, rng, walk.position, fork_direction);

                    spawned += 1;
                    pending.push(walk);
                    pending.push(branch);
                    continue 'walks;
                }
            }
        }

        spawned
    }
}

/// Uniform sample in `[low, high)`, or the midpoint when the range is empty.
fn range_or_mid<R: Rng>(rng: &mut R, low: f32, high: f32) -> f32 {
    if low < high {
        rng.gen_range(low..high)
    } else {
        ((low + high) / 2.0).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::voxel::VoxelType;
    use crate::world::stage_rng;

    fn solid_grid(width: i32, height: i32, length: i32) -> VoxelGrid {
        let mut grid = VoxelGrid::new(width, height, length);
        for x in 0..width {
            for y in 0..height {
                for z in 0..length {
                    grid.write_voxel(x, y, z, VoxelType::Stone);
                }
            }
        }
        grid
    }

    #[test]
    fn caves_carve_air_into_solid_grid() {
        let settings = CaveSettings {
            spawn_at_surface: false,
            ..CaveSettings::default()
        };
        let mut grid = solid_grid(32, 32, 32);
        CaveGenerator::new(&settings).write_caves(&mut grid, &mut stage_rng(11));
        assert!(grid.count(VoxelType::Air) > 0);
        assert_eq!(grid.count(VoxelType::Air) + grid.count(VoxelType::Stone), 32 * 32 * 32);
    }

    #[test]
    fn caves_never_grow_the_grid_or_write_outside() {
        let settings = CaveSettings {
            branch_chance: 0.5,
            ..CaveSettings::default()
        };
        for seed in 0..20 {
            let mut grid = solid_grid(12, 10, 14);
            CaveGenerator::new(&settings).write_caves(&mut grid, &mut stage_rng(seed));
            assert_eq!(grid.dimensions(), glam::IVec3::new(12, 10, 14));
            assert_eq!(grid.count(VoxelType::Air) + grid.count(VoxelType::Stone), 12 * 10 * 14);
        }
    }

    #[test]
    fn branch_cap_bounds_work() {
        let settings = CaveSettings {
            branch_chance: 1.0,
            branch_start_fraction: 0.0,
            max_branches: 5,
            spawn_at_surface: false,
            ..CaveSettings::default()
        };
        let mut grid = solid_grid(40, 40, 40);
        let mut rng = stage_rng(3);
        let caves = CaveGenerator::new(&settings);
        let spawned = caves.write_cave(&mut grid, &mut rng, Vec3::splat(20.0), Vec3::X, 0);
        assert!(spawned <= 5);
    }

    #[test]
    fn walk_stops_outside_grid() {
        let settings = CaveSettings::default();
        let mut grid = solid_grid(8, 8, 8);
        let mut rng = stage_rng(9);
        let caves = CaveGenerator::new(&settings);
        caves.write_cave(&mut grid, &mut rng, Vec3::new(-5.0, 4.0, 4.0), Vec3::X, 0);
        assert_eq!(grid.count(VoxelType::Air), 0);
    }

    #[test]
    fn same_seed_same_caves() {
        let settings = CaveSettings::default();
        let mut a = solid_grid(24, 24, 24);
        let mut b = solid_grid(24, 24, 24);
        CaveGenerator::new(&settings).write_caves(&mut a, &mut stage_rng(77));
        CaveGenerator::new(&settings).write_caves(&mut b, &mut stage_rng(77));
        assert_eq!(a, b);
    }
}
