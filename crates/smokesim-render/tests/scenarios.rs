//! End-to-end lifecycle scenarios across sim + render

use smokesim_render::Augmentation;
use smokesim_sim::{ParticleProperty, SmokeProperty};

/// A particle outliving its 20-tick lifetime is replaced each tick while
/// staying observable in the list: after two 30-tick steps the list holds
/// the two dead generations plus one fresh particle.
#[test]
fn short_lifetime_replacement_pattern() {
    let mut augmentation = Augmentation::new(None, (100, 100), 42).unwrap();
    augmentation
        .add_smoke(SmokeProperty {
            particle_count: Some(1),
            sprite_size: Some(25),
            origin: (50.0, 50.0),
            particle_property: Some(ParticleProperty {
                lifetime: Some(20.0),
                ..Default::default()
            }),
            ..Default::default()
        })
        .unwrap();
    augmentation.augment(2, 30.0).unwrap();

    assert_eq!(augmentation.machine.smokes.len(), 1);
    let particles = &augmentation.machine.smokes[0].particles;
    assert_eq!(particles.len(), 3);
    assert!(!particles[0].is_alive);
    assert!(!particles[1].is_alive);
    assert!(particles[2].is_alive);
    assert_eq!(particles[1].age, 30.0);
    assert_eq!(particles[2].age, 0.0);
}

/// A fast particle leaves the 100x100 screen and is culled by the draw
/// pass, not by its own kinematics.
#[test]
fn fast_particle_dies_out_of_bounds() {
    let mut augmentation = Augmentation::new(None, (100, 100), 42).unwrap();
    augmentation
        .add_smoke(SmokeProperty {
            particle_count: Some(1),
            sprite_size: Some(25),
            origin: (50.0, 50.0),
            particle_property: Some(ParticleProperty {
                lifetime: Some(1000.0),
                startvy: Some(5.0),
                ..Default::default()
            }),
            ..Default::default()
        })
        .unwrap();
    augmentation.augment(2, 50.0).unwrap();

    assert!(!augmentation.machine.smokes[0].particles[0].is_alive);
}

fn run_session(seed: u64) -> (Vec<u8>, Vec<u8>) {
    let mut augmentation = Augmentation::new(None, (80, 80), seed).unwrap();
    augmentation
        .add_smoke(SmokeProperty {
            particle_count: Some(5),
            origin: (40.0, 60.0),
            particle_property: Some(ParticleProperty {
                lifetime: Some(400.0),
                ..Default::default()
            }),
            ..Default::default()
        })
        .unwrap();
    let (composite, mask) = augmentation.augment(4, 15.0).unwrap();
    (composite.into_raw(), mask.into_raw())
}

#[test]
fn identical_seeds_render_identical_frames() {
    let (composite_a, mask_a) = run_session(42);
    let (composite_b, mask_b) = run_session(42);
    assert_eq!(composite_a, composite_b);
    assert_eq!(mask_a, mask_b);
}

#[test]
fn different_seeds_render_different_frames() {
    let (composite_a, _) = run_session(42);
    let (composite_b, _) = run_session(43);
    assert_ne!(composite_a, composite_b);
}

/// A finite-lifetime smoke disappears from the machine once its age passes
/// its lifetime, taking its particles with it.
#[test]
fn finite_smoke_expires_mid_session() {
    let mut augmentation = Augmentation::new(None, (100, 100), 7).unwrap();
    augmentation
        .add_smoke(SmokeProperty {
            particle_count: Some(2),
            lifetime: 100.0,
            ..Default::default()
        })
        .unwrap();
    augmentation
        .add_smoke(SmokeProperty {
            particle_count: Some(2),
            lifetime: -1.0,
            ..Default::default()
        })
        .unwrap();

    augmentation.augment(2, 40.0).unwrap();
    assert_eq!(augmentation.machine.smokes.len(), 2);

    augmentation.augment(1, 40.0).unwrap();
    // The finite smoke aged past 100 and is gone; the infinite one remains
    assert_eq!(augmentation.machine.smokes.len(), 1);
    assert_eq!(augmentation.machine.smokes[0].lifetime, -1.0);
}
