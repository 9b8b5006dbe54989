//! `smokesim run` - augment an image with simulated smoke

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use smokesim_render::Augmentation;
use smokesim_sim::SmokeProperty;

#[derive(Args)]
pub struct RunArgs {
    /// Background image; omit for a black background
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Output PNG path (a sibling `<stem>_mask.png` is written too)
    #[arg(long, default_value = "augmented_smoke.png")]
    pub out: PathBuf,

    /// Number of simulation steps
    #[arg(long, default_value_t = 2)]
    pub steps: u32,

    /// Simulated time advanced per step
    #[arg(long, default_value_t = 30.0)]
    pub time_step: f32,

    /// Top-level random seed
    #[arg(long, default_value_t = 100)]
    pub seed: u64,

    /// Screen width
    #[arg(long, default_value_t = 500)]
    pub width: u32,

    /// Screen height
    #[arg(long, default_value_t = 700)]
    pub height: u32,

    /// TOML scene file with `[[smoke]]` tables; omit for one centered smoke
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Scene file shape: a list of smoke property tables
#[derive(Deserialize)]
struct SceneConfig {
    #[serde(default)]
    smoke: Vec<SmokeProperty>,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let mut augmentation = Augmentation::new(
        args.image.as_deref(),
        (args.width, args.height),
        args.seed,
    )?;

    let smokes = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading scene config '{}'", path.display()))?;
            let scene: SceneConfig = toml::from_str(&text)
                .with_context(|| format!("parsing scene config '{}'", path.display()))?;
            scene.smoke
        }
        None => vec![SmokeProperty {
            origin: (args.width as f32 / 2.0, args.height as f32 * 0.8),
            ..Default::default()
        }],
    };

    for property in smokes {
        augmentation.add_smoke(property)?;
    }

    augmentation.augment(args.steps, args.time_step)?;
    augmentation.save_as(&args.out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_config_parses_multiple_smokes() {
        let text = r#"
[[smoke]]
origin = [100.0, 200.0]
particle_count = 10

[[smoke]]
origin = [300.0, 400.0]
lifetime = 500.0
use_perlin_rate = 1.0
"#;
        let scene: SceneConfig = toml::from_str(text).unwrap();
        assert_eq!(scene.smoke.len(), 2);
        assert_eq!(scene.smoke[0].particle_count, Some(10));
        assert_eq!(scene.smoke[1].lifetime, 500.0);
        assert_eq!(scene.smoke[1].use_perlin_rate, 1.0);
    }

    #[test]
    fn empty_scene_config_is_valid() {
        let scene: SceneConfig = toml::from_str("").unwrap();
        assert!(scene.smoke.is_empty());
    }
}
