//! SmokeMachine: registry of active smokes for one simulation session

use smokesim_core::{Color, Result, SeededRng};

use crate::properties::SmokeProperty;
use crate::smoke::Smoke;

/// Ambient defaults applied to smokes that leave fields unset, plus the
/// top-level seed every derived seed traces back to.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    pub default_particle_count: usize,
    pub default_color: Color,
    pub default_sprite_size: u32,
    pub random_seed: u64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            default_particle_count: 100,
            default_color: Color::SMOKE,
            default_sprite_size: 20,
            random_seed: 100,
        }
    }
}

/// Top-level owner of all active smokes. Advances every smoke per tick and
/// prunes the ones that outlived a positive lifetime.
pub struct SmokeMachine {
    config: MachineConfig,
    rng: SeededRng,
    /// Total simulated time accumulated across update calls
    pub time: f32,
    pub smokes: Vec<Smoke>,
    last_smoke_id: i64,
}

impl SmokeMachine {
    pub fn new(config: MachineConfig) -> Self {
        let rng = SeededRng::new(config.random_seed);
        Self {
            config,
            rng,
            time: 0.0,
            smokes: Vec::new(),
            last_smoke_id: -1,
        }
    }

    pub fn with_seed(random_seed: u64) -> Self {
        Self::new(MachineConfig {
            random_seed,
            ..Default::default()
        })
    }

    /// Register a new smoke. Unset fields resolve explicit > machine
    /// default > type default; a missing seed is derived from the machine
    /// RNG so the whole session replays from one top-level seed.
    pub fn add_smoke(&mut self, mut property: SmokeProperty) -> Result<u32> {
        if property.color.is_none() {
            property.color = Some(self.config.default_color);
        }
        if property.particle_count.is_none() {
            property.particle_count = Some(self.config.default_particle_count);
        }
        if property.sprite_size.is_none() {
            property.sprite_size = Some(self.config.default_sprite_size);
        }
        if property.id.is_none() {
            property.id = Some((self.last_smoke_id + 1) as u32);
        }
        if property.random_seed.is_none() {
            property.random_seed = Some(self.rng.randint(0, 100_000) as u64);
        }
        let smoke = Smoke::new(property)?;
        let id = smoke.id;
        println!(
            "[machine] added smoke id={} particles={}",
            id,
            smoke.particles.len()
        );
        self.smokes.push(smoke);
        self.last_smoke_id += 1;
        Ok(id)
    }

    /// Advance the whole session by `time_step`, then drop smokes whose age
    /// exceeded a positive lifetime. Smokes with `lifetime <= 0` stay
    /// forever.
    pub fn update(&mut self, time_step: f32) -> Result<()> {
        self.time += time_step;
        for smoke in &mut self.smokes {
            smoke.update(time_step)?;
        }
        self.smokes.retain(|smoke| !smoke.expired());
        Ok(())
    }

    /// Hard reset: expire every smoke and clear the list immediately.
    pub fn empty(&mut self) {
        println!("[machine] emptying {} smoke(s)", self.smokes.len());
        for smoke in &mut self.smokes {
            smoke.age = smoke.lifetime;
        }
        self.smokes.clear();
    }
}
