//! The twinkling starfield behind the fireworks.

use bulkkot_core::Surface;
use ratatui::style::Color;

use crate::entity::Entity;

/// Largest per-frame change in a star's opacity (a uniform draw in
/// ±TWINKLE_STEP / 2).
const TWINKLE_STEP: f32 = 0.05;

/// Largest star radius, in scene units.
const MAX_RADIUS: f32 = 1.5;

/// A fixed point of light whose opacity random-walks every frame.
///
/// Position and radius never change for the lifetime of the process; only
/// the opacity moves. The walk is unbounded — the surface sees its absolute
/// value, so a star that drifts negative simply brightens again.
#[derive(Debug, Clone)]
pub struct Star {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) radius: f32,
    pub(crate) opacity: f32,
}

impl Star {
    fn new(width: f32, height: f32, rng: &mut fastrand::Rng) -> Self {
        Self {
            x: rng.f32() * width,
            y: rng.f32() * height,
            radius: rng.f32() * MAX_RADIUS,
            opacity: rng.f32(),
        }
    }

    /// Perturb the opacity by a bounded random delta.
    pub fn twinkle(&mut self, rng: &mut fastrand::Rng) {
        self.opacity += (rng.f32() - 0.5) * TWINKLE_STEP;
    }
}

impl Entity for Star {
    /// Stars never die.
    fn update(&mut self, rng: &mut fastrand::Rng) -> bool {
        self.twinkle(rng);
        true
    }

    fn draw(&self, surface: &mut dyn Surface) {
        // A true RGB white, so surfaces that express alpha by dimming have
        // channels to work with.
        surface.fill_circle(
            self.x,
            self.y,
            self.radius,
            Color::Rgb(255, 255, 255),
            self.opacity.abs(),
        );
    }
}

/// The full set of background stars.
///
/// Seeded once, on the first frame when the viewport dimensions are known;
/// never reseeded, so star positions stay fixed across resizes.
#[derive(Debug, Default)]
pub struct Starfield {
    stars: Vec<Star>,
    rng: fastrand::Rng,
}

impl Starfield {
    /// An empty, unseeded starfield.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn with_seed(seed: u64) -> Self {
        Self {
            stars: Vec::new(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Place `count` stars uniformly over the given dimensions.
    pub fn seed(&mut self, width: f32, height: f32, count: usize) {
        self.stars = (0..count)
            .map(|_| Star::new(width, height, &mut self.rng))
            .collect();
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Advance every star's twinkle by one frame.
    pub fn twinkle(&mut self) {
        for star in &mut self.stars {
            star.twinkle(&mut self.rng);
        }
    }

    /// Paint all stars.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for star in &self.stars {
            star.draw(surface);
        }
    }
}
