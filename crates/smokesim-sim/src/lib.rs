//! smokesim-sim - Deterministic particle smoke simulation
//!
//! The tick-driven lifecycle core:
//! - `Particle` - one kinematic sprite unit (velocity decay, scale ramp, fade)
//! - `Smoke` - a continuously-replenished particle cluster with one origin
//! - `SmokeMachine` - registry advancing all active smokes per tick
//!
//! Everything stochastic is driven by seeded RNGs, so two machines built
//! from the same seed and stepped identically replay bit-for-bit. Rendering
//! is left to a collaborator that reads per-particle state each frame.

mod machine;
mod particle;
mod properties;
mod smoke;

pub use machine::{MachineConfig, SmokeMachine};
pub use particle::Particle;
pub use properties::{ParticleProperty, SmokeProperty};
pub use smoke::Smoke;
