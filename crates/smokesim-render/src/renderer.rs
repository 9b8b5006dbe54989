//! Draw pass: sprite caching, compositing, and draw-time bounds culling

use std::collections::{HashMap, HashSet};

use smokesim_sim::SmokeMachine;

use crate::canvas::Canvas;

/// Walks every live particle of every smoke, lazily builds one base sprite
/// per particle (the smoke's mask tinted with the particle color), scales it
/// to the particle's current size, and composites it with the particle's
/// current alpha. Particles whose position leaves the canvas are marked
/// dead here; the simulation core has no notion of screen bounds.
pub struct SmokeRenderer<C: Canvas> {
    sprites: HashMap<String, C::Sprite>,
}

impl<C: Canvas> SmokeRenderer<C> {
    pub fn new() -> Self {
        Self {
            sprites: HashMap::new(),
        }
    }

    pub fn draw(&mut self, machine: &mut SmokeMachine, canvas: &mut C) {
        let (width, height) = canvas.dimensions();
        let mut seen = HashSet::new();

        for smoke in &mut machine.smokes {
            let mask = &smoke.mask;
            for particle in smoke.particles.iter_mut().filter(|p| p.is_alive) {
                if particle.x < 0.0
                    || particle.y < 0.0
                    || particle.x > width as f32
                    || particle.y > height as f32
                {
                    particle.kill();
                    continue;
                }

                if !self.sprites.contains_key(&particle.id) {
                    let sprite = canvas.make_sprite(particle.color, mask);
                    self.sprites.insert(particle.id.clone(), sprite);
                }
                seen.insert(particle.id.clone());

                let size = (particle.scale.max(1.0)) as u32;
                let alpha = particle.alpha.clamp(0.0, 255.0) / 255.0;
                let sprite = &self.sprites[&particle.id];
                canvas.blit(sprite, particle.x as i32, particle.y as i32, size, size, alpha);
            }
        }

        // Sprites of dead or pruned particles are no longer needed
        self.sprites.retain(|id, _| seen.contains(id));
    }
}

impl<C: Canvas> Default for SmokeRenderer<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ImageCanvas;
    use smokesim_sim::{ParticleProperty, SmokeProperty};

    fn machine_with_one_particle(startvy: f32, lifetime: f32) -> SmokeMachine {
        let mut machine = SmokeMachine::with_seed(42);
        machine
            .add_smoke(SmokeProperty {
                particle_count: Some(1),
                origin: (50.0, 50.0),
                sprite_size: Some(25),
                particle_property: Some(ParticleProperty {
                    lifetime: Some(lifetime),
                    startvy: Some(startvy),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap();
        machine
    }

    #[test]
    fn drawing_changes_the_canvas() {
        let mut machine = machine_with_one_particle(-0.1, 1000.0);
        let mut renderer = SmokeRenderer::new();
        let mut canvas = ImageCanvas::new(100, 100);
        machine.update(1.0).unwrap();
        renderer.draw(&mut machine, &mut canvas);
        assert!(canvas.image().pixels().any(|p| p.0 != [0, 0, 0, 255]));
    }

    #[test]
    fn out_of_bounds_particle_is_killed_at_draw_time() {
        let mut machine = machine_with_one_particle(5.0, 1000.0);
        let mut renderer = SmokeRenderer::new();
        let mut canvas = ImageCanvas::new(100, 100);
        // y = 50 + 5 * 50 = 300, well past the 100-pixel canvas
        machine.update(50.0).unwrap();
        renderer.draw(&mut machine, &mut canvas);
        assert!(!machine.smokes[0].particles[0].is_alive);
    }

    #[test]
    fn sprite_cache_drops_dead_particles() {
        let mut machine = machine_with_one_particle(-0.1, 20.0);
        let mut renderer = SmokeRenderer::new();
        let mut canvas = ImageCanvas::new(100, 100);
        machine.update(1.0).unwrap();
        renderer.draw(&mut machine, &mut canvas);
        let cached = renderer.sprites.len();
        assert!(cached > 0);
        // Age everything past its lifetime; fresh replacements get sprites,
        // dead ones are evicted
        machine.update(30.0).unwrap();
        renderer.draw(&mut machine, &mut canvas);
        assert!(renderer.sprites.len() <= cached + 1);
        let live = machine.smokes[0].live_particle_count();
        assert_eq!(renderer.sprites.len(), live);
    }
}
