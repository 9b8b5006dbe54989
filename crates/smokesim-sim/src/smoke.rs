//! A smoke source: particle emission, replenishment, and aging

use image::GrayImage;
use smokesim_core::{Color, Result, SeededRng};
use smokesim_noise::{default_mask, MaskOptions, NoiseConfig, NoiseDimension, Param, PerlinNoise};

use crate::particle::Particle;
use crate::properties::{ParticleProperty, SmokeProperty};

/// Shaping parameters for generated cloud masks
const CLOUD_NOISE: NoiseConfig = NoiseConfig {
    octaves: Param::Range(2.0, 5.0),
    persistence: Param::Range(0.4, 0.6),
    lacunarity: Param::Range(1.5, 2.5),
    falloff: Param::Range(1.0, 2.0),
    dimension: NoiseDimension::Two,
};

/// A cluster of particles sharing an origin and property template.
///
/// Owns its particles, its RNG, and the opacity mask its sprites are
/// textured with. Every tick, still-alive particles advance and
/// `particle_count` fresh ones are emitted; dead particles stay in the list
/// but are never updated, drawn, or revived. Once `age` passes a positive
/// `lifetime` the smoke clears its particles and goes dormant until the
/// owning machine prunes it.
pub struct Smoke {
    pub id: u32,
    pub origin: (f32, f32),
    pub particle_count: usize,
    pub color: Color,
    pub sprite_size: u32,
    pub lifetime: f32,
    pub age: f32,
    pub max_particles: Option<usize>,
    pub particles: Vec<Particle>,
    /// Opacity mask shared by all sprites of this smoke
    pub mask: GrayImage,
    template: ParticleProperty,
    rng: SeededRng,
    /// Particles ever created; ids are never reused
    created: u64,
}

impl Smoke {
    /// Build a smoke from a property whose `None` fields fall back to type
    /// defaults. `SmokeMachine::add_smoke` fills in ambient defaults first.
    pub fn new(property: SmokeProperty) -> Result<Self> {
        let id = property.id.unwrap_or(0);
        let color = property.color.unwrap_or(Color::SMOKE);
        let particle_count = property.particle_count.unwrap_or(100);
        let sprite_size = property.sprite_size.unwrap_or(20);
        let mut rng = SeededRng::new(property.random_seed.unwrap_or(1000));

        // One draw decides this smoke's mask source for its whole life
        let mask = if rng.next_f32() < property.use_perlin_rate {
            let noise_seed = rng.randint(0, 100) as u64 * id as u64;
            let mut noise = PerlinNoise::with_config(noise_seed, CLOUD_NOISE)?;
            noise.generate_cloud_mask(
                sprite_size,
                sprite_size,
                &MaskOptions::with_scale(sprite_size as f32),
            )?
        } else {
            default_mask(sprite_size)
        };

        let template = property.particle_property.unwrap_or_else(|| ParticleProperty {
            color,
            smoke_sprite_size: sprite_size,
            ..Default::default()
        });

        let mut smoke = Self {
            id,
            origin: property.origin,
            particle_count,
            color,
            sprite_size,
            lifetime: property.lifetime,
            age: property.age,
            max_particles: property.max_particles,
            particles: Vec::new(),
            mask,
            template,
            rng,
            created: 0,
        };
        smoke.create_particles()?;
        Ok(smoke)
    }

    /// Emit up to `particle_count` fresh particles at the origin, each with
    /// a seed derived from this smoke's RNG and a unique id.
    fn create_particles(&mut self) -> Result<()> {
        let mut count = self.particle_count;
        if let Some(cap) = self.max_particles {
            count = count.min(cap.saturating_sub(self.particles.len()));
        }
        for _ in 0..count {
            let mut template = self.template.clone();
            template.random_seed = self.rng.randint(0, 100_000) as u64;
            template.id = format!("{}_{}", self.id, self.created);
            self.created += 1;
            self.particles
                .push(Particle::new(self.origin.0, self.origin.1, &template)?);
        }
        Ok(())
    }

    pub fn update(&mut self, time_step: f32) -> Result<()> {
        self.age += time_step;
        for particle in &mut self.particles {
            particle.update(time_step);
        }
        if self.expired() {
            self.particles.clear();
        } else {
            self.create_particles()?;
        }
        Ok(())
    }

    /// A finite-lifetime smoke past its lifetime; pruned by the machine.
    pub fn expired(&self) -> bool {
        self.lifetime > 0.0 && self.age > self.lifetime
    }

    pub fn live_particle_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_lived_template() -> ParticleProperty {
        ParticleProperty {
            lifetime: Some(20.0),
            ..Default::default()
        }
    }

    fn one_particle_smoke() -> SmokeProperty {
        SmokeProperty {
            particle_count: Some(1),
            origin: (50.0, 50.0),
            random_seed: Some(42),
            particle_property: Some(short_lived_template()),
            ..Default::default()
        }
    }

    #[test]
    fn initial_population_matches_particle_count() {
        let property = SmokeProperty {
            particle_count: Some(5),
            random_seed: Some(1),
            ..Default::default()
        };
        let smoke = Smoke::new(property).unwrap();
        assert_eq!(smoke.particles.len(), 5);
        assert_eq!(smoke.live_particle_count(), 5);
    }

    #[test]
    fn replenishes_every_tick_keeping_dead() {
        let mut smoke = Smoke::new(one_particle_smoke()).unwrap();
        smoke.update(30.0).unwrap();
        // First particle aged past its 20-tick lifetime, one fresh emitted
        assert_eq!(smoke.particles.len(), 2);
        assert!(!smoke.particles[0].is_alive);
        assert!(smoke.particles[1].is_alive);

        smoke.update(30.0).unwrap();
        assert_eq!(smoke.particles.len(), 3);
        assert!(!smoke.particles[1].is_alive);
        assert_eq!(smoke.particles[1].age, 30.0);
        assert!(smoke.particles[2].is_alive);
        assert_eq!(smoke.particles[2].age, 0.0);
    }

    #[test]
    fn dead_particles_never_resurrect() {
        let mut smoke = Smoke::new(one_particle_smoke()).unwrap();
        for _ in 0..5 {
            smoke.update(30.0).unwrap();
            assert!(smoke
                .particles
                .iter()
                .rev()
                .skip(1)
                .all(|p| !p.is_alive));
        }
    }

    #[test]
    fn particle_ids_are_unique_and_monotonic() {
        let mut smoke = Smoke::new(one_particle_smoke()).unwrap();
        smoke.update(30.0).unwrap();
        smoke.update(30.0).unwrap();
        let ids: Vec<&str> = smoke.particles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["0_0", "0_1", "0_2"]);
    }

    #[test]
    fn expiry_clears_particles() {
        let property = SmokeProperty {
            lifetime: 50.0,
            ..one_particle_smoke()
        };
        let mut smoke = Smoke::new(property).unwrap();
        smoke.update(30.0).unwrap();
        assert!(!smoke.expired());
        assert!(!smoke.particles.is_empty());
        smoke.update(30.0).unwrap();
        assert!(smoke.expired());
        assert!(smoke.particles.is_empty());
        // Dormant: no replenishment after expiry
        smoke.update(30.0).unwrap();
        assert!(smoke.particles.is_empty());
    }

    #[test]
    fn infinite_lifetime_never_expires() {
        let mut smoke = Smoke::new(one_particle_smoke()).unwrap();
        for _ in 0..10 {
            smoke.update(1000.0).unwrap();
        }
        assert!(!smoke.expired());
    }

    #[test]
    fn max_particles_caps_replenishment() {
        let property = SmokeProperty {
            particle_count: Some(10),
            max_particles: Some(15),
            random_seed: Some(3),
            ..Default::default()
        };
        let mut smoke = Smoke::new(property).unwrap();
        assert_eq!(smoke.particles.len(), 10);
        for _ in 0..5 {
            smoke.update(1.0).unwrap();
            assert!(smoke.particles.len() <= 15);
        }
    }

    #[test]
    fn mask_choice_follows_perlin_rate() {
        let always = SmokeProperty {
            use_perlin_rate: 1.0,
            random_seed: Some(9),
            sprite_size: Some(20),
            ..Default::default()
        };
        let never = SmokeProperty {
            use_perlin_rate: 0.0,
            random_seed: Some(9),
            sprite_size: Some(20),
            ..Default::default()
        };
        let with_noise = Smoke::new(always).unwrap();
        let without = Smoke::new(never).unwrap();
        assert_eq!(without.mask.as_raw(), default_mask(20).as_raw());
        assert_ne!(with_noise.mask.as_raw(), without.mask.as_raw());
    }

    #[test]
    fn same_seed_same_mask_and_particles() {
        let a = Smoke::new(one_particle_smoke()).unwrap();
        let b = Smoke::new(one_particle_smoke()).unwrap();
        assert_eq!(a.mask.as_raw(), b.mask.as_raw());
        assert_eq!(a.particles[0].x, b.particles[0].x);
        assert_eq!(a.particles[0].vx.to_bits(), b.particles[0].vx.to_bits());
        assert_eq!(a.particles[0].lifetime, b.particles[0].lifetime);
    }
}
