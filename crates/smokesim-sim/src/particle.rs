//! Single particle: kinematics, scale ramp, alpha fade, death

use smokesim_core::{Color, Result, SeededRng, SmokeError};

use crate::properties::ParticleProperty;

/// One kinematic sprite unit, owned by exactly one `Smoke`.
///
/// All sampling happens at construction with an RNG seeded from the
/// property's `random_seed`, in a fixed order (startvx, startvy, scale,
/// lifetime, final scale), so rebuilding with the same seed reproduces the
/// same trajectory.
pub struct Particle {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Current sprite edge size; drifts linearly toward the sampled final scale
    pub scale: f32,
    /// Current opacity in [0, 255]; decremented by `fade_speed` each tick
    pub alpha: f32,
    pub age: f32,
    pub lifetime: f32,
    pub is_alive: bool,
    pub color: Color,
    startvx: f32,
    startvy: f32,
    scale_step: f32,
    fade_speed: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, property: &ParticleProperty) -> Result<Self> {
        let mut rng = SeededRng::new(property.random_seed);
        let startvx = property
            .startvx
            .unwrap_or_else(|| rng.range(property.min_vx, property.max_vx));
        let startvy = property
            .startvy
            .unwrap_or_else(|| rng.range(property.min_vy, property.max_vy));
        let scale = property
            .scale
            .unwrap_or_else(|| rng.range(property.min_scale, property.max_scale).trunc());
        let lifetime = property
            .lifetime
            .unwrap_or_else(|| rng.range(property.min_lifetime, property.max_lifetime));
        if lifetime <= 0.0 {
            return Err(SmokeError::InvalidConfig(format!(
                "particle lifetime must be positive, got {lifetime}"
            )));
        }
        let final_scale = rng.range(scale * property.scale_range.0, scale * property.scale_range.1);
        Ok(Self {
            id: property.id.clone(),
            x,
            y,
            vx: startvx,
            vy: startvy,
            scale,
            alpha: property.alpha,
            age: property.age,
            lifetime,
            is_alive: true,
            color: property.color,
            startvx,
            startvy,
            scale_step: (final_scale - scale) / lifetime,
            fade_speed: property.fade_speed,
        })
    }

    /// Advance simulated time by `time_step`.
    ///
    /// Velocity is recomputed each tick as `(1 - sqrt(age/lifetime))` of the
    /// start velocity rather than integrated, so a particle's speed at a
    /// given age does not depend on how the caller sliced the time steps.
    /// Alpha fades by a flat `fade_speed` per call. Dead particles are
    /// never mutated again.
    pub fn update(&mut self, time_step: f32) {
        if !self.is_alive {
            return;
        }
        self.age += time_step;
        self.x += self.vx * time_step;
        self.y += self.vy * time_step;
        let frac = (self.age / self.lifetime).sqrt();
        self.vx = (1.0 - frac) * self.startvx;
        self.vy = (1.0 - frac) * self.startvy;
        self.scale += time_step * self.scale_step;
        self.alpha -= self.fade_speed;

        if self.alpha < 0.0 || self.age > self.lifetime || self.scale < 1.0 {
            self.is_alive = false;
        }
    }

    /// Mark dead. Used by the rendering collaborator for bounds culling;
    /// death is monotonic, there is no way back.
    pub fn kill(&mut self) {
        self.is_alive = false;
    }
}
