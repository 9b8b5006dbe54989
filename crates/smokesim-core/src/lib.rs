//! smokesim-core - Foundational types for the smokesim workspace
//!
//! This crate provides what every other smokesim crate depends on:
//! - `SeededRng` - deterministic pseudo-random source
//! - `Color` - RGB value type
//! - Error types and Result alias

mod error;
mod rng;
mod types;

pub use error::{Result, SmokeError};
pub use rng::SeededRng;
pub use types::Color;
