//! Gradient (Perlin-style) noise with fractal summation and cloud masks
//!
//! Gradients are generated lazily per integer lattice cell and cached for
//! the lifetime of the instance, so noise is a deterministic function of
//! position for a fixed seed. The cache is never evicted; in practice it is
//! bounded by the mask resolution divided by the sampling scale.

use std::collections::HashMap;

use image::GrayImage;
use smokesim_core::{Result, SeededRng, SmokeError};

use crate::param::Param;

/// Dimensionality of the noise lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseDimension {
    #[default]
    Two,
    Three,
}

impl NoiseDimension {
    /// Parse from the numeric form used by configuration inputs.
    pub fn from_u32(n: u32) -> Result<Self> {
        match n {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(SmokeError::InvalidConfig(format!(
                "noise_dimension must be 2 or 3, got {other}"
            ))),
        }
    }
}

/// Construction parameters for [`PerlinNoise`]. Each scalar may be fixed or
/// a range sampled once with the instance's own RNG.
#[derive(Debug, Clone, Copy)]
pub struct NoiseConfig {
    pub octaves: Param,
    pub persistence: Param,
    pub lacunarity: Param,
    pub falloff: Param,
    pub dimension: NoiseDimension,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: Param::Fixed(1.0),
            persistence: Param::Fixed(0.5),
            lacunarity: Param::Fixed(2.0),
            falloff: Param::Fixed(1.2),
            dimension: NoiseDimension::Two,
        }
    }
}

/// Per-mask generation options; fields left `None` keep the instance values.
#[derive(Debug, Clone, Copy)]
pub struct MaskOptions {
    pub scale: Param,
    pub octaves: Option<Param>,
    pub persistence: Option<Param>,
    pub lacunarity: Option<Param>,
    pub falloff: Option<Param>,
}

impl MaskOptions {
    pub fn with_scale(scale: impl Into<Param>) -> Self {
        Self {
            scale: scale.into(),
            octaves: None,
            persistence: None,
            lacunarity: None,
            falloff: None,
        }
    }
}

/// Seeded coherent-noise generator
pub struct PerlinNoise {
    rng: SeededRng,
    octaves: u32,
    persistence: f32,
    lacunarity: f32,
    falloff: f32,
    dimension: NoiseDimension,
    grad2: HashMap<(i64, i64), [f32; 2]>,
    grad3: HashMap<(i64, i64, i64), [f32; 3]>,
}

impl PerlinNoise {
    /// Single-octave 2D noise with default shaping parameters.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SeededRng::new(seed),
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2.0,
            falloff: 1.2,
            dimension: NoiseDimension::Two,
            grad2: HashMap::new(),
            grad3: HashMap::new(),
        }
    }

    pub fn with_config(seed: u64, config: NoiseConfig) -> Result<Self> {
        let mut rng = SeededRng::new(seed);
        let octaves = config.octaves.resolve(&mut rng);
        if octaves < 1.0 {
            return Err(SmokeError::InvalidConfig(format!(
                "octaves must be >= 1, got {octaves}"
            )));
        }
        let persistence = config.persistence.resolve(&mut rng);
        let lacunarity = config.lacunarity.resolve(&mut rng);
        let falloff = config.falloff.resolve(&mut rng);
        Ok(Self {
            rng,
            octaves: octaves as u32,
            persistence,
            lacunarity,
            falloff,
            dimension: config.dimension,
            grad2: HashMap::new(),
            grad3: HashMap::new(),
        })
    }

    fn fade(t: f32) -> f32 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + t * (b - a)
    }

    fn dot_grid_gradient(&mut self, ix: i64, iy: i64, x: f32, y: f32) -> f32 {
        let rng = &mut self.rng;
        let g = self.grad2.entry((ix, iy)).or_insert_with(|| {
            let angle = rng.range(0.0, std::f32::consts::TAU);
            [angle.cos(), angle.sin()]
        });
        let dx = x - ix as f32;
        let dy = y - iy as f32;
        dx * g[0] + dy * g[1]
    }

    fn dot_grid_gradient_3d(&mut self, ix: i64, iy: i64, iz: i64, x: f32, y: f32, z: f32) -> f32 {
        let rng = &mut self.rng;
        let g = self.grad3.entry((ix, iy, iz)).or_insert_with(|| {
            let theta = rng.range(0.0, std::f32::consts::TAU);
            let phi = rng.range(0.0, std::f32::consts::PI);
            [phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos()]
        });
        let dx = x - ix as f32;
        let dy = y - iy as f32;
        let dz = z - iz as f32;
        dx * g[0] + dy * g[1] + dz * g[2]
    }

    /// Single-octave 2D noise, range approximately [-1, 1].
    pub fn noise2(&mut self, x: f32, y: f32) -> f32 {
        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;
        let (x1, y1) = (x0 + 1, y0 + 1);

        let sx = Self::fade(x - x0 as f32);
        let sy = Self::fade(y - y0 as f32);

        let n0 = self.dot_grid_gradient(x0, y0, x, y);
        let n1 = self.dot_grid_gradient(x1, y0, x, y);
        let ix0 = Self::lerp(n0, n1, sx);

        let n0 = self.dot_grid_gradient(x0, y1, x, y);
        let n1 = self.dot_grid_gradient(x1, y1, x, y);
        let ix1 = Self::lerp(n0, n1, sx);

        Self::lerp(ix0, ix1, sy)
    }

    /// Single-octave 3D noise, range approximately [-1, 1].
    pub fn noise3(&mut self, x: f32, y: f32, z: f32) -> f32 {
        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;
        let z0 = z.floor() as i64;
        let (x1, y1, z1) = (x0 + 1, y0 + 1, z0 + 1);

        let sx = Self::fade(x - x0 as f32);
        let sy = Self::fade(y - y0 as f32);
        let sz = Self::fade(z - z0 as f32);

        let n000 = self.dot_grid_gradient_3d(x0, y0, z0, x, y, z);
        let n100 = self.dot_grid_gradient_3d(x1, y0, z0, x, y, z);
        let n010 = self.dot_grid_gradient_3d(x0, y1, z0, x, y, z);
        let n110 = self.dot_grid_gradient_3d(x1, y1, z0, x, y, z);
        let n001 = self.dot_grid_gradient_3d(x0, y0, z1, x, y, z);
        let n101 = self.dot_grid_gradient_3d(x1, y0, z1, x, y, z);
        let n011 = self.dot_grid_gradient_3d(x0, y1, z1, x, y, z);
        let n111 = self.dot_grid_gradient_3d(x1, y1, z1, x, y, z);

        let ix00 = Self::lerp(n000, n100, sx);
        let ix10 = Self::lerp(n010, n110, sx);
        let ix01 = Self::lerp(n001, n101, sx);
        let ix11 = Self::lerp(n011, n111, sx);

        let iy0 = Self::lerp(ix00, ix10, sy);
        let iy1 = Self::lerp(ix01, ix11, sy);

        Self::lerp(iy0, iy1, sz)
    }

    /// Octave-summed 2D noise, normalized to [-1, 1].
    pub fn fractal_noise2(&mut self, x: f32, y: f32) -> f32 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;
        for _ in 0..self.octaves {
            total += self.noise2(x * frequency, y * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }
        total / max_value
    }

    /// Octave-summed 3D noise, normalized to [-1, 1].
    pub fn fractal_noise3(&mut self, x: f32, y: f32, z: f32) -> f32 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;
        for _ in 0..self.octaves {
            total += self.noise3(x * frequency, y * frequency, z * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }
        total / max_value
    }

    /// Generate a softly-edged grayscale cloud texture.
    ///
    /// Every pixel samples fractal noise at `(x/scale, y/scale)` (3D mode
    /// adds a random z layer per pixel), remapped from [-1, 1] to [0, 255],
    /// then shaped by a radial falloff so opacity fades toward the edges.
    pub fn generate_cloud_mask(
        &mut self,
        width: u32,
        height: u32,
        options: &MaskOptions,
    ) -> Result<GrayImage> {
        if width == 0 || height == 0 {
            return Err(SmokeError::InvalidConfig(format!(
                "mask dimensions must be positive, got {width}x{height}"
            )));
        }
        let scale = options.scale.resolve(&mut self.rng);
        if scale <= 0.0 {
            return Err(SmokeError::InvalidConfig(format!(
                "mask scale must be positive, got {scale}"
            )));
        }
        if let Some(octaves) = options.octaves {
            let n = octaves.resolve(&mut self.rng);
            if n < 1.0 {
                return Err(SmokeError::InvalidConfig(format!(
                    "octaves must be >= 1, got {n}"
                )));
            }
            self.octaves = n as u32;
        }
        if let Some(p) = options.persistence {
            self.persistence = p.resolve(&mut self.rng);
        }
        if let Some(l) = options.lacunarity {
            self.lacunarity = l.resolve(&mut self.rng);
        }
        if let Some(f) = options.falloff {
            self.falloff = f.resolve(&mut self.rng);
        }

        let mut mask = GrayImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let noise_value = match self.dimension {
                    NoiseDimension::Two => {
                        self.fractal_noise2(x as f32 / scale, y as f32 / scale)
                    }
                    NoiseDimension::Three => {
                        let z = self.rng.range(0.0, 1.0);
                        self.fractal_noise3(x as f32 / scale, y as f32 / scale, z)
                    }
                };
                let normalized = (noise_value + 1.0) / 2.0;
                mask.put_pixel(x, y, image::Luma([(normalized * 255.0) as u8]));
            }
        }

        apply_radial_falloff(&mut mask, self.falloff);
        Ok(mask)
    }
}

/// Darken a mask toward its edges: each pixel is scaled by
/// `((max_dist - dist_to_center) / max_dist) ^ falloff` plus a small bias
/// so the edges never go fully transparent.
fn apply_radial_falloff(mask: &mut GrayImage, falloff: f32) {
    let (width, height) = mask.dimensions();
    let center_x = (width / 2) as f32;
    let center_y = (height / 2) as f32;
    let max_distance = (center_x * center_x + center_y * center_y).sqrt();
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let distance_to_edge = max_distance - (dx * dx + dy * dy).sqrt();
            let edge_factor = (distance_to_edge / max_distance).max(0.0).powf(falloff);
            let v = mask.get_pixel(x, y).0[0] as f32;
            mask.put_pixel(x, y, image::Luma([(v * edge_factor + 5.0).min(255.0) as u8]));
        }
    }
}

/// The built-in fallback sprite mask: a plain radial gradient with the same
/// edge shaping as the generated clouds, but no noise. Deterministic and
/// seed-free.
pub fn default_mask(size: u32) -> GrayImage {
    let mut mask = GrayImage::from_pixel(size.max(1), size.max(1), image::Luma([200]));
    apply_radial_falloff(&mut mask, 1.2);
    mask
}
