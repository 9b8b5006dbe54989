//! Immutable property templates for particles and smokes
//!
//! Plain typed structs with defaulted fields, deserializable from TOML.
//! Fields the machine can fill in (three-tier resolution: explicit value >
//! machine default > type default) are `Option` so absence stays typed.

use serde::{Deserialize, Serialize};
use smokesim_core::Color;

/// Template shared by every particle a smoke emits. One copy is stamped
/// with a fresh `random_seed` and `id` per particle at spawn time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleProperty {
    /// Fixed x velocity; sampled from `min_vx..max_vx` when `None`
    pub startvx: Option<f32>,
    /// Fixed y velocity; sampled from `min_vy..max_vy` when `None`
    pub startvy: Option<f32>,
    /// Fixed initial scale; sampled from `min_scale..max_scale` when `None`
    pub scale: Option<f32>,
    /// Fixed lifetime; sampled from `min_lifetime..max_lifetime` when `None`
    pub lifetime: Option<f32>,
    /// Initial age offset in simulated time units
    pub age: f32,
    pub min_vx: f32,
    pub max_vx: f32,
    pub min_vy: f32,
    pub max_vy: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Fractional bounds for the final scale relative to the initial scale
    pub scale_range: (f32, f32),
    pub min_lifetime: f32,
    pub max_lifetime: f32,
    pub color: Color,
    /// Edge size of the sprite mask in pixels
    pub smoke_sprite_size: u32,
    /// Flat per-tick alpha decrement (measured in ticks, not simulated time)
    pub fade_speed: f32,
    /// Initial opacity
    pub alpha: f32,
    pub id: String,
    pub random_seed: u64,
}

impl Default for ParticleProperty {
    fn default() -> Self {
        Self {
            startvx: None,
            startvy: None,
            scale: None,
            lifetime: None,
            age: 0.0,
            min_vx: -4.0 / 100.0,
            max_vx: 4.0 / 100.0,
            min_vy: -4.0 / 10.0,
            max_vy: -1.0 / 10.0,
            min_scale: 20.0,
            max_scale: 40.0,
            scale_range: (0.01, 1.5),
            min_lifetime: 2000.0,
            max_lifetime: 8000.0,
            color: Color::SMOKE,
            smoke_sprite_size: 20,
            fade_speed: 1.0,
            alpha: 255.0,
            id: String::new(),
            random_seed: 1000,
        }
    }
}

/// Template for one smoke source. `None` fields inherit the machine's
/// ambient defaults in `SmokeMachine::add_smoke`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeProperty {
    pub origin: (f32, f32),
    pub particle_count: Option<usize>,
    pub color: Option<Color>,
    pub particle_property: Option<ParticleProperty>,
    pub sprite_size: Option<u32>,
    /// Simulated-time lifespan; <= 0 means the smoke never expires
    pub lifetime: f32,
    pub age: f32,
    pub id: Option<u32>,
    pub random_seed: Option<u64>,
    /// Probability of texturing particles with a generated cloud mask
    /// instead of the built-in radial default
    pub use_perlin_rate: f32,
    /// Optional hard cap on the particle list length. `None` preserves the
    /// unbounded replenishment of the original model.
    pub max_particles: Option<usize>,
}

impl Default for SmokeProperty {
    fn default() -> Self {
        Self {
            origin: (100.0, 100.0),
            particle_count: None,
            color: None,
            particle_property: None,
            sprite_size: None,
            lifetime: -1.0,
            age: 0.0,
            id: None,
            random_seed: None,
            use_perlin_rate: 0.5,
            max_particles: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_defaults_match_template() {
        let p = ParticleProperty::default();
        assert!(p.startvx.is_none());
        assert_eq!(p.min_scale, 20.0);
        assert_eq!(p.max_scale, 40.0);
        assert_eq!(p.scale_range, (0.01, 1.5));
        assert_eq!(p.alpha, 255.0);
        assert_eq!(p.color, Color::SMOKE);
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r#"
origin = [50.0, 50.0]
particle_count = 1
sprite_size = 25
lifetime = 300.0

[particle_property]
lifetime = 20.0
startvy = 5.0
color = [200, 200, 200]
"#;
        let property: SmokeProperty = toml::from_str(toml_str).unwrap();
        assert_eq!(property.origin, (50.0, 50.0));
        assert_eq!(property.particle_count, Some(1));
        assert_eq!(property.sprite_size, Some(25));
        assert_eq!(property.lifetime, 300.0);
        let particle = property.particle_property.unwrap();
        assert_eq!(particle.lifetime, Some(20.0));
        assert_eq!(particle.startvy, Some(5.0));
        assert_eq!(particle.color, Color::new(200, 200, 200));
        // Unset fields keep their type defaults
        assert_eq!(particle.fade_speed, 1.0);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let property: SmokeProperty = toml::from_str("").unwrap();
        assert_eq!(property, SmokeProperty::default());
    }
}
