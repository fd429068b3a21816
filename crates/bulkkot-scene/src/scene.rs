//! The scene state driving per-frame update, draw, and cull.

use bulkkot_core::Surface;

use crate::entity::{Entity, retain_alive};
use crate::particle::{self, Particle};
use crate::rocket::Rocket;

/// Sole owner of the active rocket and particle sets.
///
/// The app drives it from two independent clocks: [`Scene::advance`] once
/// per displayed frame, [`Scene::launch`] on the wall-clock launch interval.
/// Both run on the render thread, never concurrently.
#[derive(Debug)]
pub struct Scene {
    width: f32,
    height: f32,
    rockets: Vec<Rocket>,
    particles: Vec<Particle>,
    rng: fastrand::Rng,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            rockets: Vec::new(),
            particles: Vec::new(),
            rng: fastrand::Rng::new(),
        }
    }

    #[cfg(test)]
    fn with_seed(width: f32, height: f32, seed: u64) -> Self {
        let mut scene = Self::new(width, height);
        scene.rng = fastrand::Rng::with_seed(seed);
        scene
    }

    /// Track the viewport. Entity state is untouched, so applying the same
    /// dimensions any number of times is a no-op.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Fire one shell from a random spot on the bottom edge.
    pub fn launch(&mut self) {
        let rocket = Rocket::launch(self.width, self.height, &mut self.rng);
        self.rockets.push(rocket);
    }

    /// One simulation tick: update and cull rockets, hand each apex burst to
    /// the particle set, then update and cull particles.
    pub fn advance(&mut self) {
        let rng = &mut self.rng;

        let mut bursts = Vec::new();
        self.rockets.retain_mut(|rocket| {
            let alive = rocket.update(rng);
            if rocket.exploded() {
                bursts.push((rocket.position(), rocket.color()));
            }
            alive
        });
        for ((x, y), color) in bursts {
            self.particles.extend(particle::burst(x, y, color, rng));
        }

        retain_alive(&mut self.particles, rng);
    }

    /// Paint every live entity; rockets first, bursts over them.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for rocket in &self.rockets {
            rocket.draw(surface);
        }
        for particle in &self.particles {
            particle.draw(surface);
        }
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::BURST_COUNT;
    use crate::testing::RecordingSurface;
    use ratatui::style::Color;

    #[test]
    fn test_launch_appends_one_rocket() {
        let mut scene = Scene::with_seed(100.0, 500.0, 5);
        assert!(scene.rockets().is_empty());

        scene.launch();
        scene.launch();
        assert_eq!(scene.rockets().len(), 2);
        assert!(scene.particles().is_empty());
    }

    #[test]
    fn test_apex_burst_lands_in_the_particle_set() {
        let mut scene = Scene::with_seed(100.0, 500.0, 5);
        // A shell one tick short of its apex.
        scene.rockets.push(Rocket {
            x: 40.0,
            y: 140.0,
            launch_vy: -6.0,
            age: 119.0,
            exploded: false,
            color: Color::Cyan,
        });

        scene.advance();

        assert!(scene.rockets().is_empty());
        assert_eq!(scene.particles().len(), BURST_COUNT);
        let apex_y = 140.0 + (-6.0 + 119.0 * 0.05);
        for particle in scene.particles() {
            assert_eq!((particle.x, particle.y), (40.0, apex_y));
            assert_eq!(particle.color, Color::Cyan);
        }
    }

    #[test]
    fn test_dead_particles_never_reach_a_later_draw_pass() {
        let mut scene = Scene::with_seed(100.0, 500.0, 5);
        scene.rockets.push(Rocket {
            x: 40.0,
            y: 140.0,
            launch_vy: -6.0,
            age: 119.0,
            exploded: false,
            color: Color::Cyan,
        });
        scene.advance();
        assert_eq!(scene.particles().len(), BURST_COUNT);

        // Fragments live 100 ticks; after 100 more advances all are culled.
        for _ in 0..100 {
            scene.advance();
        }
        assert!(scene.particles().is_empty());

        let mut surface = RecordingSurface::new(100.0, 500.0);
        scene.draw(&mut surface);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_cull_preserves_survivor_order() {
        let mut scene = Scene::with_seed(100.0, 500.0, 5);
        // Particles at distinct x positions with interleaved lifetimes; the
        // two with life 1 die on the first advance.
        for (x, life) in [(1.0, 50.0), (2.0, 1.0), (3.0, 30.0), (4.0, 1.0), (5.0, 20.0)] {
            let mut particle = Particle::new(x, 0.0, Color::White, &mut scene.rng);
            particle.vx = 0.0;
            particle.vy = 0.0;
            particle.life = life;
            scene.particles.push(particle);
        }

        scene.advance();

        let xs: Vec<f32> = scene.particles().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_resize_is_idempotent_and_leaves_entities_alone() {
        let mut scene = Scene::with_seed(100.0, 500.0, 5);
        scene.launch();
        let before = scene.rockets()[0].clone();

        scene.resize(100.0, 500.0);
        scene.resize(100.0, 500.0);

        assert_eq!(scene.size(), (100.0, 500.0));
        let after = &scene.rockets()[0];
        assert_eq!((before.x, before.y), (after.x, after.y));
        assert_eq!(before.age, after.age);

        // A genuine resize still leaves entity state untouched.
        scene.resize(200.0, 500.0);
        assert_eq!(scene.size(), (200.0, 500.0));
        assert_eq!((before.x, before.y), {
            let r = &scene.rockets()[0];
            (r.x, r.y)
        });
    }
}
