//! smokesim-noise - Perlin-style gradient noise and cloud mask synthesis
//!
//! Provides the organic-looking grayscale opacity textures used for
//! particle sprites:
//! - 2D/3D gradient noise over a lazily-cached lattice of unit gradients
//! - Fractal (octave) summation with persistence/lacunarity controls
//! - Radial-falloff cloud masks as `image::GrayImage`

mod param;
mod perlin;

pub use param::Param;
pub use perlin::{default_mask, MaskOptions, NoiseConfig, NoiseDimension, PerlinNoise};
