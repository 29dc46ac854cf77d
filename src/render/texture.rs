use std::path::Path;

use crate::constants::{ATLAS_BLOCK_WIDTH, TEXTURE_SIZE};
use crate::core::voxel::Rgba8;
use crate::error::{Result, SceneryError};
use crate::world::theme::Theme;

/// RGBA pixels of a texture atlas.
///
/// Rows are stored bottom-up so pixel coordinates line up with UV space:
/// `(0, 0)` is the bottom-left corner of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasBitmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl AtlasBitmap {
    /// Fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        if x >= self.width || y >= self.height {
            return Rgba8::TRANSPARENT;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    /// Convert a top-down image into a bottom-up bitmap.
    pub fn from_image(image: &image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let mut bitmap = Self::new(width, height);
        for (x, y, pixel) in image.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            bitmap.set_pixel(x, height - 1 - y, Rgba8::new(r, g, b, a));
        }
        bitmap
    }
}

pub fn load_texture_atlas_from_file<P: AsRef<Path>>(path: P, block_width: u32) -> Result<AtlasBitmap> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();

    if block_width == 0 || width != height || width % block_width != 0 {
        return Err(SceneryError::AtlasDimensions {
            width,
            height,
            block_width,
        });
    }

    tracing::info!("Loaded texture atlas {}x{}", width, height);
    Ok(AtlasBitmap::from_image(&img))
}

/// Cell layout of the procedural atlas, as (column, row) from the bottom-left.
pub mod cells {
    pub const GRASS_TOP: [u32; 2] = [0, 0];
    pub const GRASS_SIDE: [u32; 2] = [1, 0];
    pub const DIRT: [u32; 2] = [2, 0];
    pub const STONE: [u32; 2] = [3, 0];
    pub const WOOD_SIDE: [u32; 2] = [0, 1];
    pub const WOOD_TOP: [u32; 2] = [1, 1];
    pub const LEAVES: [u32; 2] = [2, 1];
    pub const ROSE: [u32; 2] = [3, 1];
    pub const BLANK: [u32; 2] = [0, 2];
    pub const BLUEPRINT: [u32; 2] = [1, 2];
    pub const DRIP_GRASS_SIDE: [u32; 2] = [2, 2];
}

struct Palette {
    grass: [i32; 3],
    leaves: [i32; 3],
    petals: [i32; 3],
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Spring => Palette {
            grass: [90, 170, 60],
            leaves: [80, 160, 70],
            petals: [220, 50, 80],
        },
        Theme::Summer => Palette {
            grass: [60, 140, 40],
            leaves: [40, 110, 30],
            petals: [230, 40, 40],
        },
        Theme::Fall => Palette {
            grass: [150, 130, 50],
            leaves: [200, 90, 30],
            petals: [170, 40, 90],
        },
        Theme::Winter => Palette {
            grass: [225, 230, 240],
            leaves: [190, 205, 215],
            petals: [140, 170, 240],
        },
    }
}

fn hash(x: u32, y: u32, seed: u32) -> u8 {
    let n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(seed);
    let n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    ((n ^ (n >> 16)) & 0xFF) as u8
}

fn shade(base: [i32; 3], noise: u8, amount: i32) -> Rgba8 {
    let delta = (noise as i32 - 128) * amount / 128;
    Rgba8::opaque(
        (base[0] + delta).clamp(0, 255) as u8,
        (base[1] + delta).clamp(0, 255) as u8,
        (base[2] + delta).clamp(0, 255) as u8,
    )
}

/// Paint a themed atlas procedurally so the pipeline runs without assets.
pub fn generate_texture_atlas(theme: Theme) -> AtlasBitmap {
    let size = TEXTURE_SIZE;
    let mut atlas = AtlasBitmap::new(size * ATLAS_BLOCK_WIDTH, size * ATLAS_BLOCK_WIDTH);
    let palette = palette(theme);
    let dirt = [134, 96, 67];

    let mut paint = |cell: [u32; 2], painter: &dyn Fn(u32, u32) -> Rgba8| {
        for y in 0..size {
            for x in 0..size {
                atlas.set_pixel(cell[0] * size + x, cell[1] * size + y, painter(x, y));
            }
        }
    };

    paint(cells::GRASS_TOP, &|x, y| shade(palette.grass, hash(x, y, 0), 20));
    paint(cells::GRASS_SIDE, &|x, y| {
        // Grass strip along the top edge
        if y >= size - 3 {
            shade(palette.grass, hash(x, y, 1), 20)
        } else {
            shade(dirt, hash(x, y, 2), 18)
        }
    });
    paint(cells::DRIP_GRASS_SIDE, &|x, y| {
        let drip = 3 + (hash(x, 0, 9) % 5) as u32;
        if y >= size - drip {
            shade(palette.grass, hash(x, y, 10), 20)
        } else {
            shade(dirt, hash(x, y, 11), 18)
        }
    });
    paint(cells::DIRT, &|x, y| shade(dirt, hash(x, y, 3), 18));
    paint(cells::STONE, &|x, y| shade([128, 128, 128], hash(x, y, 4), 24));
    paint(cells::WOOD_SIDE, &|x, y| {
        let stripe = if x % 4 == 0 { -20 } else { 0 };
        shade([110 + stripe, 80 + stripe, 50 + stripe], hash(x, y, 5), 10)
    });
    paint(cells::WOOD_TOP, &|x, y| {
        let dx = x as f32 - size as f32 / 2.0 + 0.5;
        let dy = y as f32 - size as f32 / 2.0 + 0.5;
        let ring = ((dx * dx + dy * dy).sqrt() as i32 % 3 == 0) as i32 * 25;
        shade([160 - ring, 125 - ring, 80 - ring], hash(x, y, 6), 8)
    });
    paint(cells::LEAVES, &|x, y| {
        let noise = hash(x, y, 7);
        if noise % 7 == 0 {
            Rgba8::TRANSPARENT
        } else {
            shade(palette.leaves, noise, 30)
        }
    });
    paint(cells::ROSE, &|x, y| {
        let fx = x as f32 - 7.5;
        let fy = y as f32 - 11.5;
        let petal_distance = (fx * fx + fy * fy).sqrt();
        if petal_distance < 1.2 {
            Rgba8::opaque(240, 210, 60)
        } else if petal_distance < 3.5 {
            shade(palette.petals, hash(x, y, 8), 20)
        } else if (x == 7 || x == 8) && y < 10 {
            Rgba8::opaque(50, 120, 40)
        } else if (5..=6).contains(&x) && (3..=4).contains(&y) {
            Rgba8::opaque(60, 140, 45)
        } else {
            Rgba8::TRANSPARENT
        }
    });
    paint(cells::BLANK, &|_, _| Rgba8::WHITE);
    paint(cells::BLUEPRINT, &|x, y| {
        if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
            Rgba8::new(220, 235, 255, 255)
        } else {
            Rgba8::new(40, 90, 200, 160)
        }
    });

    atlas
}
