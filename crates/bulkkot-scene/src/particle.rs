//! Burst particles — the glowing fragments of an exploded shell.

use bulkkot_core::Surface;
use ratatui::style::Color;

use crate::entity::Entity;

/// Number of fragments a shell bursts into.
pub const BURST_COUNT: usize = 60;

/// Frames a fresh fragment stays alive.
const LIFE: f32 = 100.0;

/// Downward acceleration applied to every fragment each frame.
const GRAVITY: f32 = 0.08;

/// Half-width of the uniform velocity box a fragment is thrown into.
const SCATTER: f32 = 3.0;

const RADIUS: f32 = 2.0;

/// One fragment of an exploded shell.
///
/// Life decreases by exactly one per frame and the fragment fades with it;
/// it leaves its collection the tick life reaches zero.
#[derive(Debug, Clone)]
pub struct Particle {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) vx: f32,
    pub(crate) vy: f32,
    pub(crate) life: f32,
    pub(crate) color: Color,
}

impl Particle {
    /// A fragment thrown from the burst point with a random velocity.
    pub fn new(x: f32, y: f32, color: Color, rng: &mut fastrand::Rng) -> Self {
        Self {
            x,
            y,
            vx: (rng.f32() - 0.5) * 2.0 * SCATTER,
            vy: (rng.f32() - 0.5) * 2.0 * SCATTER,
            life: LIFE,
            color,
        }
    }

    /// Remaining life in frames.
    pub fn life(&self) -> f32 {
        self.life
    }
}

impl Entity for Particle {
    fn update(&mut self, _rng: &mut fastrand::Rng) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY;
        self.life -= 1.0;
        self.life > 0.0
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.x, self.y, RADIUS, self.color, self.life / LIFE);
    }
}

/// The full burst of fragments for a shell exploding at (`x`, `y`).
pub fn burst(x: f32, y: f32, color: Color, rng: &mut fastrand::Rng) -> Vec<Particle> {
    (0..BURST_COUNT)
        .map(|_| Particle::new(x, y, color, rng))
        .collect()
}
