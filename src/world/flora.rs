//! Flora placement: clusters of stamped blueprints spread by rejection sampling.
//!
//! Placement runs in two passes that share one sampler. The first spreads
//! cluster centers (forests, flower patches) around the middle of the grid, the
//! second spreads individual structures inside each cluster.

use glam::{IVec3, Vec2, Vec3};
use rand::Rng;

use crate::config::{ClusterSettings, FloraSettings, SamplingSettings};
use crate::core::grid::{VoxelGrid, voxel_distance};
use crate::world::structures::{StructureBlueprint, StructureLibrary};

/// An accepted position and the space it keeps clear around itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: IVec3,
    pub radius: f32,
}

/// One rejection-sampling pass over a disc.
#[derive(Debug, Clone, Copy)]
pub struct PlacementSampler {
    pub center: Vec2,
    pub search_radius: f32,
    pub exclusion_radius: f32,
    pub only_grass: bool,
    pub tuning: SamplingSettings,
}

impl PlacementSampler {
    /// Draw candidates until failures outpace acceptances.
    ///
    /// Accepted positions sit on the surface row of their column and are also
    /// appended to `placements`, which may already hold earlier passes.
    pub fn sample<R: Rng>(
        &self,
        grid: &VoxelGrid,
        placements: &mut Vec<Placement>,
        rng: &mut R,
    ) -> Vec<IVec3> {
        let mut openings = Vec::new();
        let mut failures: u32 = 0;

        while (failures as f32 - self.tuning.min_failures as f32)
            < openings.len() as f32 * self.tuning.failure_multiplier
        {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let reach = rng.gen_range(0.0f32..1.0) * self.search_radius;
            let x = (self.center.x + angle.cos() * reach) as i32;
            let z = (self.center.y + angle.sin() * reach) as i32;

            if grid.is_out_of_bounds(x, 0, z) {
                failures += 1;
                continue;
            }

            let crowded = placements.iter().any(|placement| {
                // Height is ignored: spacing is measured across the ground.
                let distance = voxel_distance(
                    Vec3::new(x as f32, 0.0, z as f32),
                    Vec3::new(placement.position.x as f32, 0.0, placement.position.z as f32),
                );
                distance <= self.exclusion_radius + placement.radius
            });
            if crowded {
                failures += 1;
                continue;
            }

            let y = grid.surface_y(x, z);
            if self.only_grass && !grid.read_voxel(x, y, z).kind.is_grass() {
                failures += 1;
                continue;
            }

            let position = IVec3::new(x, y, z);
            openings.push(position);
            placements.push(Placement {
                position,
                radius: self.exclusion_radius,
            });
        }

        openings
    }
}

pub struct FloraGenerator<'a> {
    settings: &'a FloraSettings,
    library: &'a StructureLibrary,
}

impl<'a> FloraGenerator<'a> {
    pub fn new(settings: &'a FloraSettings, library: &'a StructureLibrary) -> Self {
        Self { settings, library }
    }

    /// Place every configured cluster kind. Returns the accepted cluster centers.
    pub fn write_flora<R: Rng>(&self, grid: &mut VoxelGrid, rng: &mut R) -> Vec<Placement> {
        let mut cluster_placements = Vec::new();
        let mut flora_placements = Vec::new();
        let center = Vec2::new((grid.width() / 2) as f32, (grid.length() / 2) as f32);
        let search_radius = self
            .settings
            .cluster_search_radius
            .unwrap_or_else(|| grid.half_diagonal());

        for cluster in &self.settings.clusters {
            let sampler = PlacementSampler {
                center,
                search_radius,
                exclusion_radius: cluster.radius_max.max(cluster.radius_min) + cluster.padding,
                only_grass: cluster.center_on_grass,
                tuning: self.settings.cluster_sampling,
            };
            let positions = sampler.sample(grid, &mut cluster_placements, rng);

            let Some(blueprint) = self.library.get(cluster.structure) else {
                tracing::warn!("No blueprint for {:?}, skipping its clusters", cluster.structure);
                continue;
            };

            let mut stamped = 0;
            for position in &positions {
                let radius = cluster_radius(rng, cluster);
                stamped += self.write_cluster(
                    grid,
                    rng,
                    blueprint,
                    cluster,
                    *position,
                    radius,
                    &mut flora_placements,
                );
            }

            tracing::debug!(
                "Placed {} {:?} clusters with {} structures",
                positions.len(),
                cluster.structure,
                stamped
            );
        }

        cluster_placements
    }

    #[allow(clippy::too_many_arguments)]
    fn write_cluster<R: Rng>(
        &self,
        grid: &mut VoxelGrid,
        rng: &mut R,
        blueprint: &StructureBlueprint,
        cluster: &ClusterSettings,
        center: IVec3,
        radius: f32,
        placements: &mut Vec<Placement>,
    ) -> usize {
        let sampler = PlacementSampler {
            center: Vec2::new(center.x as f32, center.z as f32),
            search_radius: radius,
            exclusion_radius: blueprint.footprint_radius() + cluster.structure_padding,
            only_grass: true,
            tuning: self.settings.structure_sampling,
        };
        let spawn_positions = sampler.sample(grid, placements, rng);

        for spawn in &spawn_positions {
            grid.write_grid(
                &blueprint.grid,
                spawn.x - blueprint.grid.width() / 2,
                spawn.y + 1,
                spawn.z - blueprint.grid.length() / 2,
                false,
            );
        }

        spawn_positions.len()
    }
}

fn cluster_radius<R: Rng>(rng: &mut R, cluster: &ClusterSettings) -> f32 {
    if cluster.radius_min < cluster.radius_max {
        rng.gen_range(cluster.radius_min..cluster.radius_max)
    } else {
        cluster.radius_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::voxel::VoxelType;
    use crate::world::stage_rng;
    use crate::world::structures::StructureKind;

    fn meadow(width: i32, height: i32, length: i32, ground: i32) -> VoxelGrid {
        let mut grid = VoxelGrid::new(width, height, length);
        for x in 0..width {
            for z in 0..length {
                for y in 0..ground {
                    grid.write_voxel(x, y, z, VoxelType::Dirt);
                }
                grid.write_voxel(x, ground, z, VoxelType::Grass);
            }
        }
        grid
    }

    fn horizontal_distance(a: IVec3, b: IVec3) -> f32 {
        Vec2::new((a.x - b.x) as f32, (a.z - b.z) as f32).length()
    }

    #[test]
    fn accepted_placements_are_strictly_separated() {
        let grid = meadow(48, 16, 48, 5);
        for seed in 0..10 {
            let sampler = PlacementSampler {
                center: Vec2::new(24.0, 24.0),
                search_radius: grid.half_diagonal(),
                exclusion_radius: 6.0,
                only_grass: false,
                tuning: SamplingSettings::default(),
            };
            let mut placements = Vec::new();
            let accepted = sampler.sample(&grid, &mut placements, &mut stage_rng(seed));
            assert!(!accepted.is_empty());
            assert_eq!(accepted.len(), placements.len());

            for (i, a) in placements.iter().enumerate() {
                for b in &placements[i + 1..] {
                    assert!(horizontal_distance(a.position, b.position) > a.radius + b.radius);
                }
            }
        }
    }

    #[test]
    fn accepted_positions_sit_on_the_surface() {
        let grid = meadow(20, 10, 20, 3);
        let sampler = PlacementSampler {
            center: Vec2::new(10.0, 10.0),
            search_radius: 8.0,
            exclusion_radius: 1.0,
            only_grass: true,
            tuning: SamplingSettings::default(),
        };
        let positions = sampler.sample(&grid, &mut Vec::new(), &mut stage_rng(4));
        assert!(!positions.is_empty());
        for p in positions {
            assert_eq!(p.y, 3);
            assert!(!grid.is_out_of_bounds(p.x, p.y, p.z));
        }
    }

    #[test]
    fn grass_filter_rejects_bare_ground() {
        let mut grid = VoxelGrid::new(16, 8, 16);
        for x in 0..16 {
            for z in 0..16 {
                grid.write_voxel(x, 0, z, VoxelType::Stone);
            }
        }
        let sampler = PlacementSampler {
            center: Vec2::new(8.0, 8.0),
            search_radius: 6.0,
            exclusion_radius: 1.0,
            only_grass: true,
            tuning: SamplingSettings {
                min_failures: 20,
                failure_multiplier: 2.0,
            },
        };
        let positions = sampler.sample(&grid, &mut Vec::new(), &mut stage_rng(2));
        assert!(positions.is_empty());
    }

    #[test]
    fn existing_placements_block_new_ones() {
        let grid = meadow(16, 8, 16, 2);
        let mut placements = vec![Placement {
            position: IVec3::new(8, 2, 8),
            radius: 100.0,
        }];
        let sampler = PlacementSampler {
            center: Vec2::new(8.0, 8.0),
            search_radius: 8.0,
            exclusion_radius: 1.0,
            only_grass: false,
            tuning: SamplingSettings::default(),
        };
        let positions = sampler.sample(&grid, &mut placements, &mut stage_rng(8));
        assert!(positions.is_empty());
        assert_eq!(placements.len(), 1);
    }

    #[test]
    fn flora_grows_trees_and_flowers_on_grass() {
        let mut grid = meadow(48, 24, 48, 8);
        let settings = FloraSettings::default();
        let library = StructureLibrary::default();
        let clusters =
            FloraGenerator::new(&settings, &library).write_flora(&mut grid, &mut stage_rng(21));

        assert!(!clusters.is_empty());
        assert!(grid.count(VoxelType::Wood) > 0);

        // Stamps never replace the ground.
        assert_eq!(grid.count(VoxelType::Dirt), 48 * 48 * 8);
        assert_eq!(grid.count(VoxelType::Grass), 48 * 48);

        for (i, a) in clusters.iter().enumerate() {
            for b in &clusters[i + 1..] {
                assert!(horizontal_distance(a.position, b.position) > a.radius + b.radius);
            }
        }
    }

    #[test]
    fn flower_patches_root_one_row_above_grass() {
        let mut grid = meadow(32, 12, 32, 4);
        let mut settings = FloraSettings::default();
        settings.clusters.retain(|c| c.structure == StructureKind::Flower);
        let library = StructureLibrary::default();
        FloraGenerator::new(&settings, &library).write_flora(&mut grid, &mut stage_rng(3));

        assert!(grid.count(VoxelType::Rose) > 0);
        for (pos, voxel) in grid.iter() {
            if voxel.kind == VoxelType::Rose {
                assert_eq!(pos.y, 5);
                assert_eq!(grid.read_voxel(pos.x, 4, pos.z).kind, VoxelType::Grass);
            }
        }
    }

    #[test]
    fn missing_blueprint_is_skipped() {
        let mut grid = meadow(24, 12, 24, 4);
        let settings = FloraSettings::default();
        let mut library = StructureLibrary::empty();
        library.insert(StructureKind::Flower, crate::world::structures::library::flower());
        FloraGenerator::new(&settings, &library).write_flora(&mut grid, &mut stage_rng(5));
        assert_eq!(grid.count(VoxelType::Wood), 0);
    }

    #[test]
    fn same_seed_same_flora() {
        let settings = FloraSettings::default();
        let library = StructureLibrary::default();
        let mut a = meadow(32, 16, 32, 6);
        let mut b = a.clone();
        FloraGenerator::new(&settings, &library).write_flora(&mut a, &mut stage_rng(13));
        FloraGenerator::new(&settings, &library).write_flora(&mut b, &mut stage_rng(13));
        assert_eq!(a, b);
    }
}
