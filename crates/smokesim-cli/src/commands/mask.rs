//! `smokesim mask` - render a standalone cloud opacity mask

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use smokesim_noise::{MaskOptions, NoiseConfig, NoiseDimension, Param, PerlinNoise};

#[derive(Args)]
pub struct MaskArgs {
    /// Output PNG path
    #[arg(long, default_value = "cloud_mask.png")]
    pub out: PathBuf,

    /// Mask edge size in pixels
    #[arg(long, default_value_t = 64)]
    pub size: u32,

    /// Noise seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Sampling scale; defaults to the mask size
    #[arg(long)]
    pub scale: Option<f32>,

    #[arg(long, default_value_t = 4)]
    pub octaves: u32,

    #[arg(long, default_value_t = 0.5)]
    pub persistence: f32,

    #[arg(long, default_value_t = 2.0)]
    pub lacunarity: f32,

    /// Radial edge-fade exponent
    #[arg(long, default_value_t = 1.2)]
    pub falloff: f32,

    /// Noise dimension (2 or 3)
    #[arg(long, default_value_t = 2)]
    pub dimension: u32,
}

pub fn execute(args: MaskArgs) -> Result<()> {
    let config = NoiseConfig {
        octaves: Param::Fixed(args.octaves as f32),
        persistence: Param::Fixed(args.persistence),
        lacunarity: Param::Fixed(args.lacunarity),
        falloff: Param::Fixed(args.falloff),
        dimension: NoiseDimension::from_u32(args.dimension)?,
    };
    let mut noise = PerlinNoise::with_config(args.seed, config)?;
    let scale = args.scale.unwrap_or(args.size as f32);
    let mask = noise.generate_cloud_mask(args.size, args.size, &MaskOptions::with_scale(scale))?;
    mask.save(&args.out)
        .with_context(|| format!("writing mask to '{}'", args.out.display()))?;
    println!("[mask] wrote {}x{} mask to {}", args.size, args.size, args.out.display());
    Ok(())
}
